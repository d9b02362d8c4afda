//! Task records as handed over by the task repository.
//!
//! The engine never persists or mutates these; a materialization pass
//! treats the task list as an immutable snapshot. All date fields are UTC
//! timestamps. `start_time`/`end_time` describe an intended work session
//! within the day and are advisory only.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stored lifecycle status of a task.
///
/// `Done` and `Abandoned` are terminal: once stored, the overdue rule in
/// [`crate::status::resolve_status`] never reclassifies them. The derived
/// `overdue` display status is not part of this enum; see
/// [`crate::status::EffectiveStatus`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not yet started (initial status)
    #[default]
    Pending,
    /// Work has started
    InProgress,
    /// Work finished but not yet claimed for points
    Completed,
    /// Claimed and rewarded (terminal)
    Done,
    /// Given up on (terminal)
    Abandoned,
}

impl TaskStatus {
    /// Whether this status is terminal (never reclassified).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Abandoned)
    }
}

/// Recurrence frequency for cyclic tasks.
///
/// Frequencies outside the known set deserialize to [`Unknown`] and expand
/// with weekly spacing rather than failing the whole materialization.
///
/// [`Unknown`]: CycleFrequency::Unknown
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CycleFrequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    /// Unrecognized frequency string; treated as weekly.
    #[serde(other)]
    Unknown,
}

impl CycleFrequency {
    /// Lowercase label used in display-title annotations.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly | Self::Unknown => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
        }
    }
}

/// Recurrence declaration attached to a cyclic task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleSpec {
    /// How far apart consecutive occurrences are spaced.
    pub frequency: CycleFrequency,
    /// How many occurrences to generate beyond the base date (>= 1).
    pub occurrences_count: u32,
}

/// A user-declared decomposition piece of a task.
///
/// Sub-items carry their own dates, priority, and status; lifecycle
/// actions still route to the parent task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    /// Defaults to `end_date` when absent.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub status: TaskStatus,
}

/// A persisted task record, the engine's sole input entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Task title
    pub title: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Priority value (1-10; absent in input defaults to 0)
    #[serde(default)]
    pub priority: i32,
    /// Stored lifecycle status
    #[serde(default)]
    pub status: TaskStatus,
    /// Deadline start; defaults to `end_date` when absent
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Deadline end (semantically required)
    pub end_date: DateTime<Utc>,
    /// Intended session start within the day (advisory)
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// Intended session end within the day (advisory)
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Stored point value; computed via the fallback formula when absent
    #[serde(default)]
    pub points: Option<i32>,
    /// Whether the task repeats on a fixed schedule
    #[serde(default)]
    pub is_cyclic: bool,
    /// Recurrence declaration; required when `is_cyclic`
    #[serde(default)]
    pub cycle: Option<CycleSpec>,
    /// Declared sub-items, in display order
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Create a new task with default values and a fresh id.
    pub fn new(title: impl Into<String>, end_date: DateTime<Utc>) -> Self {
        Task {
            id: format!("task-{}-{}", end_date.timestamp(), uuid::Uuid::new_v4()),
            title: title.into(),
            description: None,
            priority: 0,
            status: TaskStatus::Pending,
            start_date: None,
            end_date,
            start_time: None,
            end_time: None,
            points: None,
            is_cyclic: false,
            cycle: None,
            subtasks: Vec::new(),
        }
    }

    /// Lower bound of the task's date range (`start_date`, defaulting to
    /// `end_date`).
    pub fn effective_start(&self) -> DateTime<Utc> {
        self.start_date.unwrap_or(self.end_date)
    }

    /// Caller-side precondition checks.
    ///
    /// The engine itself never calls this and degrades gracefully on the
    /// same conditions; the repository layer is expected to reject records
    /// that fail here before they are persisted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=10).contains(&self.priority) {
            return Err(ValidationError::InvalidPriority {
                task_id: self.id.clone(),
                value: self.priority,
            });
        }
        if let Some(start) = self.start_date {
            if self.end_date < start {
                return Err(ValidationError::InvalidTimeRange {
                    task_id: self.id.clone(),
                    start,
                    end: self.end_date,
                });
            }
        }
        match (self.is_cyclic, &self.cycle) {
            (true, None) => {
                return Err(ValidationError::CyclicWithoutSpec {
                    task_id: self.id.clone(),
                })
            }
            (true, Some(cycle)) if cycle.occurrences_count == 0 => {
                return Err(ValidationError::EmptyCycle {
                    task_id: self.id.clone(),
                })
            }
            _ => {}
        }
        Ok(())
    }
}
