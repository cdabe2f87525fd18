pub mod check;
pub mod run;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "watchman")]
#[command(about = "Periodic health reports for a fleet of services.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the health report and email it to the configured recipients
    #[command(alias = "r")]
    Run,
    /// Build the health report and print it, without sending anything
    #[command(alias = "c")]
    Check,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
