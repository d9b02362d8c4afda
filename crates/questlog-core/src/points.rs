//! Point value computation.
//!
//! A stored positive point value always wins. Otherwise points fall back
//! to `priority * hours * days` with a fixed one-hour session weight; no
//! session-duration input is incorporated. Sub-item occurrences are worth
//! zero regardless of this formula; that override lives in the
//! materializer, not here.

use chrono::{DateTime, Utc};

use crate::task::Task;

/// Fixed session weight in the fallback formula.
pub const HOURS_PER_TASK: i32 = 1;

/// Whole-day span between two timestamps, rounded up and clamped to 1.
///
/// Inverted ranges (`end < start`) also clamp to 1, so the result is never
/// zero or negative.
pub fn duration_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i32 {
    let secs = (end - start).num_seconds();
    let days = (secs + 86_399).div_euclid(86_400);
    days.max(1) as i32
}

/// Compute the point value of a task.
///
/// Returns the stored value when it is positive, the fallback formula
/// otherwise. `start_date` defaults to `end_date`, collapsing the span to
/// a single day.
pub fn compute_points(task: &Task) -> i32 {
    if let Some(points) = task.points {
        if points > 0 {
            return points;
        }
    }
    let days = duration_days(task.effective_start(), task.end_date);
    task.priority * HOURS_PER_TASK * days
}
