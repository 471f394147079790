use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};
use anyhow::Result;

use schedweave::presentation::cli::{Cli, Commands};
use schedweave::presentation::cli::commands::ScheduleCommand;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("schedweave=debug,info")
    } else {
        EnvFilter::new("schedweave=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Schedule { input, user_id, mode, direction, output } => {
            ScheduleCommand::execute(&input, &user_id, mode, direction, output.as_ref())?;
        }
    }

    Ok(())
}
