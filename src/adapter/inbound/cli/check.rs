//! Handler for the `check` command.
//!
//! Verifies the node and lists every funding wallet without broadcasting.

use std::path::Path;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::NetworkArgs;
use crate::adapter::inbound::cli::{config, output};
use crate::application::{Inspection, WalletSnapshot};
use crate::domain::units::wei_to_ether;
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::port::NullNotifier;

#[derive(Tabled)]
struct WalletRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Balance ETH")]
    balance: String,
    #[tabled(rename = "Nonce")]
    nonce: u64,
}

impl From<&WalletSnapshot> for WalletRow {
    fn from(wallet: &WalletSnapshot) -> Self {
        Self {
            index: wallet.index + 1,
            address: wallet.address.to_string(),
            balance: wei_to_ether(wallet.balance).to_string(),
            nonce: wallet.nonce,
        }
    }
}

/// Execute the check command.
pub async fn execute(config_path: Option<&Path>, args: &NetworkArgs, verbose: u8) -> Result<()> {
    let config = config::load(config_path, args)?;
    config.validate()?;
    config.logging.clone().with_verbosity(verbose).init();

    output::header(env!("CARGO_PKG_VERSION"));
    let chain = bootstrap::build_chain_client(&config)?;

    let pb = output::spinner("Connecting to node...");
    let chain_id = match bootstrap::verify_connection(chain.as_ref(), &config, &NullNotifier).await
    {
        Ok(chain_id) => {
            output::spinner_success(&pb, &format!("Connected to chain {chain_id}"));
            chain_id
        }
        Err(e) => {
            output::spinner_fail(&pb, "Could not reach the node");
            return Err(e);
        }
    };

    let inspection = bootstrap::inspect_wallets(chain.as_ref(), &config).await?;

    print_inspection(chain.url().as_str(), chain_id, &inspection);
    Ok(())
}

fn print_inspection(endpoint: &str, chain_id: u64, inspection: &Inspection) {
    if output::is_json() {
        let wallets: Vec<_> = inspection
            .wallets
            .iter()
            .map(|w| {
                json!({
                    "index": w.index,
                    "address": w.address.to_string(),
                    "balance_wei": w.balance.to_string(),
                    "nonce": w.nonce,
                })
            })
            .collect();
        let invalid: Vec<_> = inspection
            .invalid_keys
            .iter()
            .map(|k| json!({ "index": k.index, "key": k.masked, "reason": k.reason }))
            .collect();
        output::json_output(json!({
            "command": "check",
            "endpoint": endpoint,
            "chain_id": chain_id,
            "wallets": wallets,
            "invalid_keys": invalid,
            "total_balance_wei": inspection.total_balance().to_string(),
        }));
        return;
    }

    output::field("Endpoint", endpoint);
    output::section("Wallets");
    for key in &inspection.invalid_keys {
        output::error(&format!(
            "Invalid private key #{} ({}): {}",
            key.index + 1,
            key.masked,
            key.reason
        ));
    }
    if output::is_quiet() {
        return;
    }
    if !inspection.wallets.is_empty() {
        let rows: Vec<WalletRow> = inspection.wallets.iter().map(WalletRow::from).collect();
        output::lines(&Table::new(rows).to_string());
    }
    output::field(
        "Total",
        format!("{} ETH", wei_to_ether(inspection.total_balance())),
    );
    let empty = inspection.empty_wallets().count();
    if empty > 0 {
        output::hint(&format!(
            "{empty} wallet(s) hold no funds and will be skipped by {}",
            output::highlight("sprinkle run")
        ));
    }
}
