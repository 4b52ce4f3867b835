use clap::Parser;
use sprinkle::adapter::inbound::cli::command::Cli;
use sprinkle::adapter::inbound::cli::output::{self, OutputConfig};
use sprinkle::adapter::inbound::cli::router::dispatch;
use sprinkle::adapter::inbound::cli::{diagnostic, paths};
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        &cli.color,
    ));

    let (stop, cancel) = watch::channel(false);
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            warn!("Shutdown signal received; finishing in-flight transfers");
            let _ = stop.send(true);
        }
    });

    if let Err(e) = dispatch(&cli, cancel).await {
        let path = paths::resolve_config(cli.config.as_deref());
        eprintln!("{:?}", diagnostic::report(&e, path.as_deref()));
        std::process::exit(if e.is_startup_fatal() { 1 } else { 2 });
    }

    info!("sprinkle stopped");
}
