use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "composer", version, about = "Plan, execute and report API integration goals")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    // A missing .env is fine; the environment may already be populated.
    let _ = dotenvy::dotenv();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            goal,
            export,
            config,
            store,
            events,
            output,
        } => cmd::run::run_cmd(goal, export.as_deref(), config, store, events, output).await,
        Command::Execute {
            plan,
            export,
            config,
            events,
            output,
        } => cmd::execute::execute_cmd(&plan, export.as_deref(), config, events, output).await,
        Command::Catalog { config, output } => cmd::catalog::catalog_cmd(config, output).await,
        Command::History {
            limit,
            export,
            config,
            store,
            output,
        } => cmd::history::history_cmd(limit, export.as_deref(), config, store, output).await,
    }
}
