//! Recurrence expansion for cyclic tasks.
//!
//! A cyclic task declares a frequency and a fixed occurrence count; the
//! expander turns that into concrete future dates. Every offset is applied
//! to the base date directly (never chained through a previous
//! occurrence), and month arithmetic clamps to the last valid day of the
//! target month: 2024-01-31 + one month is 2024-02-29, + two months is
//! 2024-03-31.

use chrono::{DateTime, Duration, Months, Utc};

use crate::task::{CycleFrequency, Task};

/// Add `months` calendar months to `date`, clamping the day-of-month.
///
/// Saturates at the chrono range boundary instead of failing; valid task
/// timestamps never get near it.
fn add_months_clamped(date: DateTime<Utc>, months: u32) -> DateTime<Utc> {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

/// Date of the i-th occurrence (1-based) after `base` at `frequency`.
pub fn occurrence_date(base: DateTime<Utc>, frequency: CycleFrequency, i: u32) -> DateTime<Utc> {
    match frequency {
        CycleFrequency::Daily => base + Duration::days(i64::from(i)),
        CycleFrequency::Weekly | CycleFrequency::Unknown => {
            base + Duration::days(7 * i64::from(i))
        }
        CycleFrequency::Monthly => add_months_clamped(base, i),
        CycleFrequency::Quarterly => add_months_clamped(base, 3 * i),
    }
}

/// Generate the future occurrence dates of a cyclic task.
///
/// Returns exactly `occurrences_count` strictly increasing dates, never
/// including the base date itself. A task without a consistent cyclic
/// declaration (`is_cyclic` unset, or `cycle` missing) expands to nothing.
pub fn expand_cycle(task: &Task) -> Vec<DateTime<Utc>> {
    let Some(cycle) = task.cycle.as_ref().filter(|_| task.is_cyclic) else {
        return Vec::new();
    };
    (1..=cycle.occurrences_count)
        .map(|i| occurrence_date(task.end_date, cycle.frequency, i))
        .collect()
}
