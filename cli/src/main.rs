mod commands;
mod terminal;

use commands::{CommandLine, Commands, check, run};
use terminal::logging;
use watchman_common::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    let cfg = Config::from_env();

    match commands.command {
        Commands::Run => run::run(&cfg).await,
        Commands::Check => check::check(&cfg).await,
    }
}
