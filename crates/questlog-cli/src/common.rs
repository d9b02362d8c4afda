//! Shared helpers for CLI commands.

use std::error::Error;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use questlog_core::Task;

/// Read a task snapshot from a JSON file (an array of task records).
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, Box<dyn Error>> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let tasks: Vec<Task> = serde_json::from_str(&data)
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;
    Ok(tasks)
}

/// Resolve the reference time: an explicit RFC 3339 value for
/// reproducible runs, the wall clock otherwise.
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>, Box<dyn Error>> {
    match now {
        Some(raw) => {
            let parsed = DateTime::parse_from_rfc3339(raw)
                .map_err(|e| format!("invalid --now value '{raw}': {e}"))?;
            Ok(parsed.with_timezone(&Utc))
        }
        None => Ok(Utc::now()),
    }
}
