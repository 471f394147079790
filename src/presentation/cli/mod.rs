pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "schedweave")]
#[command(author = "SchedWeave Team")]
#[command(version = "0.1.0")]
#[command(about = "Manufacturing job scheduling engine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Schedule a job's operations from a scenario fixture")]
    Schedule {
        #[arg(short, long, value_name = "FILE", help = "Scenario fixture JSON file")]
        input: PathBuf,

        #[arg(long, default_value = "cli-user", help = "User id recorded on the run")]
        user_id: String,

        #[arg(long, value_enum, default_value = "initial", help = "Scheduling mode")]
        mode: CliScheduleMode,

        #[arg(long, value_enum, default_value = "backward", help = "Scheduling direction")]
        direction: CliScheduleDirection,

        #[arg(short, long, value_name = "FILE", help = "Write the JSON response here instead of stdout")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliScheduleMode {
    Initial,
    Reschedule,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliScheduleDirection {
    Backward,
    Forward,
}
