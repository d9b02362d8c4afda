use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use crate::common::load_tasks;

#[derive(Args)]
pub struct ValidateArgs {
    /// Task snapshot file (JSON array of task records)
    #[arg(long)]
    pub tasks: PathBuf,
}

pub fn run(args: ValidateArgs) -> Result<(), Box<dyn Error>> {
    let tasks = load_tasks(&args.tasks)?;
    let total = tasks.len();

    let mut failures = 0usize;
    for task in &tasks {
        if let Err(e) = task.validate() {
            failures += 1;
            println!("{}: {e}", task.id);
        }
    }

    if failures > 0 {
        return Err(format!("{failures} of {total} tasks failed validation").into());
    }
    println!("{total} tasks OK");
    Ok(())
}
