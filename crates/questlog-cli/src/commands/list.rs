use std::error::Error;
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use questlog_core::{materialize, Occurrence};

use crate::common::{load_tasks, resolve_now};

#[derive(Clone, Copy, ValueEnum)]
pub enum ListMode {
    /// Open tasks
    Active,
    /// Done and abandoned tasks
    Done,
}

#[derive(Args)]
pub struct ListArgs {
    /// Task snapshot file (JSON array of task records)
    #[arg(long)]
    pub tasks: PathBuf,
    /// Reference time as RFC 3339; defaults to the current time
    #[arg(long)]
    pub now: Option<String>,
    /// Which partition to list
    #[arg(long, value_enum, default_value = "active")]
    pub mode: ListMode,
    /// Only entries with this effective status (e.g. "overdue")
    #[arg(long)]
    pub status: Option<String>,
    /// Case-insensitive title search
    #[arg(long)]
    pub search: Option<String>,
}

pub fn run(args: ListArgs) -> Result<(), Box<dyn Error>> {
    let tasks = load_tasks(&args.tasks)?;
    let now = resolve_now(args.now.as_deref())?;

    let set = materialize(&tasks, now);
    let entries = match args.mode {
        ListMode::Active => set.active_list(),
        ListMode::Done => set.done_list(),
    };

    let needle = args.search.as_deref().map(str::to_lowercase);
    let filtered: Vec<&Occurrence> = entries
        .into_iter()
        .filter(|o| match args.status.as_deref() {
            Some(status) => o.effective_status.as_str() == status,
            None => true,
        })
        .filter(|o| match needle.as_deref() {
            Some(q) => o.display_title.to_lowercase().contains(q),
            None => true,
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&filtered)?);
    Ok(())
}
