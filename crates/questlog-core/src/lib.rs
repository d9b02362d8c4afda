//! # Questlog Core Library
//!
//! This library provides the core business logic for Questlog, a personal
//! task/calendar application with gamified points. It implements the task
//! materialization and analytics engine: the deterministic transformation
//! from a snapshot of persisted task records into the concrete set of
//! displayable calendar occurrences, and the aggregation of that set into
//! report statistics.
//!
//! ## Architecture
//!
//! - **Materialization**: per task, the engine resolves the effective
//!   display status, computes the point value, and expands recurrence
//!   rules and sub-item decompositions into a flat occurrence set
//! - **Analytics**: the materialized history feeds the weekly/monthly/
//!   priority/status statistics behind the reports view
//!
//! The engine is pure: it owns no storage, performs no I/O, and reads no
//! ambient clock. `now` is threaded through every operation explicitly,
//! so repeated invocation with identical inputs is idempotent and
//! byte-identical. Persistence, authentication, and rendering live in the
//! surrounding application, which re-invokes materialization whenever the
//! task set or the clock changes meaningfully.
//!
//! ## Key Components
//!
//! - [`materialize`]: raw tasks + now → partitioned occurrence set
//! - [`aggregate`]: main occurrences + now → [`ReportStats`]
//! - [`resolve_status`]: overdue derivation on top of the stored status
//! - [`expand_cycle`]: recurrence-date generation for cyclic tasks

pub mod cycle;
pub mod error;
pub mod materialize;
pub mod occurrence;
pub mod points;
pub mod report;
pub mod status;
pub mod task;

pub use cycle::expand_cycle;
pub use error::{CoreError, Result, ValidationError};
pub use materialize::{expand_subtasks, materialize, MaterializedSet};
pub use occurrence::{Occurrence, OccurrenceKind};
pub use points::compute_points;
pub use report::{aggregate, ReportStats};
pub use status::{resolve_status, EffectiveStatus};
pub use task::{CycleFrequency, CycleSpec, Subtask, Task, TaskStatus};
