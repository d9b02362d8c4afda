//! Report statistics over the materialized task history.
//!
//! The aggregator consumes the main occurrences of a materialized set
//! (generated cyclic/subtask entries are skipped) and produces the counts,
//! point sums, histograms, and time series behind the reports view. All
//! windows are computed relative to the `now` passed in; calling it twice
//! with the same snapshot yields identical output.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::occurrence::Occurrence;
use crate::status::EffectiveStatus;

/// Divisors of the provisional achievement-tier counters.
const GOLD_DIVISOR: u32 = 10;
const SILVER_DIVISOR: u32 = 5;

/// How many recently completed tasks the report surfaces.
const RECENT_LIMIT: usize = 4;

/// One day of the trailing-week completion series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaySlot {
    /// Short weekday label ("Mon", "Tue", ...)
    pub label: String,
    /// Tasks marked done ending this day
    pub completed: u32,
    /// Non-terminal tasks ending this day
    pub pending: u32,
}

/// One window of the trailing six-week points series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekSlot {
    /// "Week 1" (oldest) through "Week 6" (current)
    pub label: String,
    /// Points of tasks marked done whose end falls in this window
    pub points: i32,
}

/// Provisional achievement-tier counter.
///
/// Derived from this month's completion count by fixed divisors, pending a
/// real achievement model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AchievementTier {
    pub name: String,
    pub count: u32,
}

/// A recently completed task, for the report's highlight strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecentAchievement {
    pub title: String,
    pub completed_on: NaiveDate,
    pub points: i32,
}

/// Full statistics summary for the reports view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportStats {
    /// Tasks with effective status done, all time
    pub total_tasks_completed: u32,
    /// Point sum over all done tasks
    pub total_points: i32,
    /// Done tasks ending inside the calendar month containing `now`
    pub this_month_tasks: u32,
    pub this_month_points: i32,
    /// Done tasks over the trailing 3 calendar months, current included
    pub last_3_months_tasks: u32,
    pub last_3_months_points: i32,
    /// Histogram over all tasks, keyed by priority
    pub tasks_by_priority: BTreeMap<i32, u32>,
    /// Histogram over all tasks, keyed by effective status
    pub tasks_by_status: BTreeMap<String, u32>,
    /// Mean task span in whole days, rounded; 0 when there are no tasks
    pub avg_duration_days: i64,
    /// Exactly 7 entries, oldest first
    pub week_series: Vec<DaySlot>,
    /// Exactly 6 entries, oldest first
    pub six_week_points_series: Vec<WeekSlot>,
    pub achievements: Vec<AchievementTier>,
    pub recent_achievements: Vec<RecentAchievement>,
}

/// First day of the calendar month containing `date`.
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).expect("day 1 exists in every month")
}

/// Last day of the calendar month containing `date`.
fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Months::new(1) - Duration::days(1)
}

/// Whole-day span of an occurrence window, clamped to 1.
fn window_days(occurrence: &Occurrence) -> i64 {
    let days = (occurrence.window_end.date_naive() - occurrence.window_start.date_naive())
        .num_days();
    days.max(1)
}

/// Aggregate the main occurrences of a materialized set into report
/// statistics.
///
/// Generated cyclic and subtask entries in the input are ignored; the
/// history being reported on is the set of tasks themselves. Pure function
/// of its inputs.
pub fn aggregate(occurrences: &[Occurrence], now: DateTime<Utc>) -> ReportStats {
    let mains: Vec<&Occurrence> = occurrences.iter().filter(|o| o.kind.is_main()).collect();

    let today = now.date_naive();
    let this_month = month_start(today)..=month_end(today);
    let trailing_start = month_start(today)
        .checked_sub_months(Months::new(2))
        .unwrap_or_else(|| month_start(today));
    let trailing_months = trailing_start..=month_end(today);

    let mut stats = ReportStats::default();
    let mut duration_sum: i64 = 0;
    let mut recent: Vec<RecentAchievement> = Vec::new();

    for occurrence in &mains {
        let end_day = occurrence.end_date();
        let done = occurrence.effective_status == EffectiveStatus::Done;

        if done {
            stats.total_tasks_completed += 1;
            stats.total_points += occurrence.points;
            if this_month.contains(&end_day) {
                stats.this_month_tasks += 1;
                stats.this_month_points += occurrence.points;
                recent.push(RecentAchievement {
                    title: occurrence.display_title.clone(),
                    completed_on: end_day,
                    points: occurrence.points,
                });
            }
            if trailing_months.contains(&end_day) {
                stats.last_3_months_tasks += 1;
                stats.last_3_months_points += occurrence.points;
            }
        }

        *stats
            .tasks_by_priority
            .entry(occurrence.priority)
            .or_insert(0) += 1;
        *stats
            .tasks_by_status
            .entry(occurrence.effective_status.as_str().to_string())
            .or_insert(0) += 1;
        duration_sum += window_days(occurrence);
    }

    if !mains.is_empty() {
        stats.avg_duration_days =
            (duration_sum as f64 / mains.len() as f64).round() as i64;
    }

    stats.week_series = week_series(&mains, today);
    stats.six_week_points_series = six_week_points(&mains, today);
    stats.achievements = vec![
        AchievementTier {
            name: "Gold".to_string(),
            count: stats.this_month_tasks / GOLD_DIVISOR,
        },
        AchievementTier {
            name: "Silver".to_string(),
            count: stats.this_month_tasks / SILVER_DIVISOR,
        },
        AchievementTier {
            name: "Bronze".to_string(),
            count: stats.this_month_tasks,
        },
    ];
    let skip = recent.len().saturating_sub(RECENT_LIMIT);
    stats.recent_achievements = recent.split_off(skip);

    stats
}

/// Completion counts for the trailing 7 days, oldest first.
fn week_series(mains: &[&Occurrence], today: NaiveDate) -> Vec<DaySlot> {
    (0..7)
        .map(|k| {
            let day = today - Duration::days(6 - k);
            let mut completed = 0;
            let mut pending = 0;
            for occurrence in mains {
                if occurrence.end_date() != day {
                    continue;
                }
                match occurrence.effective_status {
                    EffectiveStatus::Done => completed += 1,
                    EffectiveStatus::Abandoned => {}
                    _ => pending += 1,
                }
            }
            DaySlot {
                label: day.format("%a").to_string(),
                completed,
                pending,
            }
        })
        .collect()
}

/// Points earned per trailing 7-day window, six windows, oldest first.
fn six_week_points(mains: &[&Occurrence], today: NaiveDate) -> Vec<WeekSlot> {
    (0..6)
        .map(|k| {
            let window_start = today - Duration::days((5 - k) * 7);
            let window = window_start..=(window_start + Duration::days(6));
            let points = mains
                .iter()
                .filter(|o| {
                    o.effective_status == EffectiveStatus::Done
                        && window.contains(&o.end_date())
                })
                .map(|o| o.points)
                .sum();
            WeekSlot {
                label: format!("Week {}", k + 1),
                points,
            }
        })
        .collect()
}
