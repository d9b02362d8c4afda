//! Occurrence types and day-window helpers.
//!
//! Occurrences are engine-owned and ephemeral: every materialization pass
//! rebuilds the full set from scratch, and nothing here is ever persisted.
//! Identifiers are derived deterministically from the parent task id so
//! that identical inputs produce byte-identical output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::EffectiveStatus;
use crate::task::CycleFrequency;

/// What kind of calendar entry an occurrence is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OccurrenceKind {
    /// The single occurrence representing the task itself.
    Main,
    /// A generated instance of a cyclic task.
    Cyclic {
        /// 1-based position in the expansion.
        index: u32,
        frequency: CycleFrequency,
    },
    /// A declared sub-item of the task.
    Subtask { subtask_id: String },
}

impl OccurrenceKind {
    pub fn is_main(&self) -> bool {
        matches!(self, OccurrenceKind::Main)
    }
}

/// A single calendar-displayable instance derived from a task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Occurrence {
    /// Unique within one materialization pass.
    pub occurrence_id: String,
    /// Task that delete/edit/mark-done actions route to. Never synthetic.
    pub parent_task_id: String,
    #[serde(flatten)]
    pub kind: OccurrenceKind,
    /// Title with decomposition/recurrence annotations applied.
    pub display_title: String,
    /// Midnight of the occurrence's first day.
    pub window_start: DateTime<Utc>,
    /// 23:59:59.999 of the occurrence's last day.
    pub window_end: DateTime<Utc>,
    pub priority: i32,
    /// Always 0 for subtask occurrences.
    pub points: i32,
    pub effective_status: EffectiveStatus,
}

impl Occurrence {
    /// Calendar date the occurrence ends on.
    pub fn end_date(&self) -> chrono::NaiveDate {
        self.window_end.date_naive()
    }
}

/// 00:00:00.000 of the timestamp's day.
pub fn day_start(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive()
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid clock time")
        .and_utc()
}

/// 23:59:59.999 of the timestamp's day.
pub fn day_end(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.date_naive()
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("23:59:59.999 is a valid clock time")
        .and_utc()
}
