use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use questlog_core::materialize;

use crate::common::{load_tasks, resolve_now};

#[derive(Args)]
pub struct CalendarArgs {
    /// Task snapshot file (JSON array of task records)
    #[arg(long)]
    pub tasks: PathBuf,
    /// Reference time as RFC 3339; defaults to the current time
    #[arg(long)]
    pub now: Option<String>,
}

pub fn run(args: CalendarArgs) -> Result<(), Box<dyn Error>> {
    let tasks = load_tasks(&args.tasks)?;
    let now = resolve_now(args.now.as_deref())?;

    let set = materialize(&tasks, now);
    println!("{}", serde_json::to_string_pretty(&set)?);
    Ok(())
}
