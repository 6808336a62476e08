use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan, execute and report one goal.
    Run {
        /// Goal text; prompted for on stdin when omitted.
        #[arg(long)]
        goal: Option<String>,
        /// Also write the execution summary as JSON to this path.
        #[arg(long)]
        export: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        events: EventsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Execute a plan file without contacting the planner or reporter.
    Execute {
        plan: PathBuf,
        #[arg(long)]
        export: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        events: EventsArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List every operation the configured services expose.
    Catalog {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show recent run log records, newest first.
    History {
        #[arg(long, default_value_t = 20)]
        limit: i64,
        /// Also write the records to this path; `.csv` gives CSV, anything else JSON.
        #[arg(long)]
        export: Option<PathBuf>,
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        store: StoreArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
