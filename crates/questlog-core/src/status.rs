//! Effective display status derivation.
//!
//! The stored status is what the repository persisted; the effective
//! status is what views and reports consume after the overdue rule is
//! applied on top. Because the rule depends on `now`, it is re-evaluated
//! on every materialization pass rather than cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::TaskStatus;

/// Display status after overdue derivation.
///
/// Extends [`TaskStatus`] with the transient `Overdue` variant, which is
/// never stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    Pending,
    InProgress,
    Completed,
    /// Deadline passed while the task was still open
    Overdue,
    Done,
    Abandoned,
}

impl EffectiveStatus {
    /// Whether this status is terminal (`done` or `abandoned`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, EffectiveStatus::Done | EffectiveStatus::Abandoned)
    }

    /// Stable string key, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
            Self::Done => "done",
            Self::Abandoned => "abandoned",
        }
    }
}

impl From<TaskStatus> for EffectiveStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Pending => Self::Pending,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Completed => Self::Completed,
            TaskStatus::Done => Self::Done,
            TaskStatus::Abandoned => Self::Abandoned,
        }
    }
}

/// Resolve the effective display status of a task occurrence.
///
/// Terminal stored statuses pass through untouched. Anything else whose
/// deadline has passed becomes [`EffectiveStatus::Overdue`]; otherwise the
/// stored status maps across unchanged. Pure function of its three inputs.
pub fn resolve_status(
    stored: TaskStatus,
    end_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> EffectiveStatus {
    if stored.is_terminal() {
        return stored.into();
    }
    if end_date < now {
        return EffectiveStatus::Overdue;
    }
    stored.into()
}
