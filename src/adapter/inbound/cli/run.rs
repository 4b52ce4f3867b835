//! Handler for the `run` command.

use std::path::Path;
use std::sync::Arc;

use serde_json::json;
use tabled::{Table, Tabled};
use tokio::sync::watch;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::console::ConsoleNotifier;
use crate::adapter::inbound::cli::{config, output, prompt};
use crate::domain::units::wei_to_ether;
use crate::domain::{RunReport, WalletRunSummary};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::Config;
use crate::port::Notifier;

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Wallet")]
    wallet: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Succeeded")]
    succeeded: u32,
    #[tabled(rename = "Attempted")]
    attempted: u32,
    #[tabled(rename = "Next nonce")]
    next_nonce: u64,
    #[tabled(rename = "Remaining ETH")]
    remaining: String,
}

impl From<&WalletRunSummary> for SummaryRow {
    fn from(summary: &WalletRunSummary) -> Self {
        Self {
            wallet: summary.address.to_string(),
            status: summary.status.to_string(),
            succeeded: summary.success_count,
            attempted: summary.total_attempted,
            next_nonce: summary.next_nonce,
            remaining: wei_to_ether(summary.remaining_balance).to_string(),
        }
    }
}

/// Execute the run command.
pub async fn execute(
    config_path: Option<&Path>,
    args: &RunArgs,
    verbose: u8,
    cancel: watch::Receiver<bool>,
) -> Result<()> {
    let config = prepare_config(config_path, args)?;

    let mut logging = config.logging.clone().with_verbosity(verbose);
    if args.json_logs {
        logging.format = "json".into();
    }
    logging.init();

    print_startup_config(&config);

    let chain = bootstrap::build_chain_client(&config)?;
    let notifier: Arc<dyn Notifier> = Arc::new(bootstrap::build_notifier_registry(vec![
        Box::new(ConsoleNotifier),
    ]));

    let pb = output::spinner("Connecting to node...");
    match bootstrap::verify_connection(chain.as_ref(), &config, notifier.as_ref()).await {
        Ok(chain_id) => {
            output::spinner_success(&pb, &format!("Connected to chain {chain_id}"));
        }
        Err(e) => {
            output::spinner_fail(&pb, "Could not reach the node");
            return Err(e);
        }
    }

    let count = match config.dispatch.count {
        Some(count) => count,
        None => prompt::transfer_count()?,
    };

    let runner = bootstrap::build_runner(&config, chain, notifier)?;
    let report = bootstrap::run_wallets(&runner, &config, count, cancel).await;

    print_report(&report);
    Ok(())
}

/// Load the config and apply the `run` flags on top.
#[allow(clippy::result_large_err)]
fn prepare_config(config_path: Option<&Path>, args: &RunArgs) -> Result<Config> {
    let mut config = config::load(config_path, &args.network)?;
    if let Some(count) = args.count {
        config.dispatch.count = Some(count);
    }
    if let Some(workers) = args.concurrency {
        config.dispatch.concurrency = workers;
    }
    config.validate()?;
    Ok(config)
}

/// Print startup configuration using Astral-style output.
fn print_startup_config(config: &Config) {
    output::header(env!("CARGO_PKG_VERSION"));
    if let Some(url) = &config.network.rpc_url {
        output::field("Endpoint", url);
    }
    if let Some(chain_id) = config.network.chain_id {
        output::field("Chain ID", chain_id);
    }
    output::field("Wallets", config.wallet.private_keys.len());
    output::field(
        "Amount",
        format!(
            "{} - {} ETH",
            config.dispatch.min_amount_eth, config.dispatch.max_amount_eth
        ),
    );
    if output::verbosity() > 0 {
        output::field("Concurrency", config.dispatch.concurrency);
        output::field(
            "Timeout",
            format!("{}s", config.dispatch.receipt_timeout_secs),
        );
    }
}

fn print_report(report: &RunReport) {
    if output::is_json() {
        let wallets: Vec<_> = report
            .summaries
            .iter()
            .map(|s| {
                json!({
                    "address": s.address.to_string(),
                    "status": s.status.to_string(),
                    "success_count": s.success_count,
                    "total_attempted": s.total_attempted,
                    "next_nonce": s.next_nonce,
                    "remaining_balance_wei": s.remaining_balance.to_string(),
                    "unresolved_nonces": s.unresolved_nonces,
                })
            })
            .collect();
        output::json_output(json!({
            "command": "run",
            "run_id": report.run_id.to_string(),
            "started_at": report.started_at.to_rfc3339(),
            "finished_at": report.finished_at.to_rfc3339(),
            "wallets": wallets,
            "invalid_keys": report.invalid_keys.len(),
            "successes": report.total_successes(),
            "attempted": report.total_attempted(),
        }));
        return;
    }
    if output::is_quiet() {
        return;
    }

    output::section("Summary");
    if !report.summaries.is_empty() {
        let rows: Vec<SummaryRow> = report.summaries.iter().map(SummaryRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }
    output::field(
        "Succeeded",
        format!(
            "{} of {} attempted",
            report.total_successes(),
            report.total_attempted()
        ),
    );
    if !report.invalid_keys.is_empty() {
        output::warning(&format!(
            "{} private key(s) could not be parsed",
            report.invalid_keys.len()
        ));
    }
    let elapsed = report.finished_at - report.started_at;
    output::field("Elapsed", format!("{}s", elapsed.num_seconds()));
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, U256};

    use super::*;
    use crate::domain::WalletStatus;

    #[test]
    fn summary_row_formats_balance_in_ether() {
        let mut summary =
            WalletRunSummary::new(Address::ZERO, 7, U256::from(1_500_000_000_000_000_000u128));
        summary.status = WalletStatus::Cancelled;

        let row = SummaryRow::from(&summary);

        assert_eq!(row.remaining, "1.5");
        assert_eq!(row.status, "cancelled");
        assert_eq!(row.next_nonce, 7);
    }
}
