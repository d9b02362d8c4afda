use clap::{Parser, Subcommand};

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "questlog", version, about = "Questlog CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Materialize the full occurrence set for calendar rendering
    Calendar(commands::calendar::CalendarArgs),
    /// Task-list view over the materialized set
    List(commands::list::ListArgs),
    /// Report statistics over the task history
    Report(commands::report::ReportArgs),
    /// Validate a task snapshot file
    Validate(commands::validate::ValidateArgs),
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Calendar(args) => commands::calendar::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::Report(args) => commands::report::run(args),
        Commands::Validate(args) => commands::validate::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
