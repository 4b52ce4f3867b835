//! Command routing.

use tokio::sync::watch;

use crate::adapter::inbound::cli::command::{Cli, Commands};
use crate::adapter::inbound::cli::{check, run};
use crate::error::Result;

/// Route a parsed command line to its handler.
pub async fn dispatch(cli: &Cli, cancel: watch::Receiver<bool>) -> Result<()> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        Commands::Run(args) => run::execute(config_path, args, cli.verbose, cancel).await,
        Commands::Check(args) => check::execute(config_path, args, cli.verbose).await,
    }
}
