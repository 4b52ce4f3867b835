//! Terminal rendering of dispatch events.

use serde_json::json;

use super::output;
use crate::domain::units::{wei_to_ether, wei_to_gwei};
use crate::domain::TransferOutcome;
use crate::port::{Event, Notifier};

/// Prints one line per event through [`output`], or one JSON line per event
/// in `--json` mode.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: Event) {
        if output::is_json() {
            emit_json(&event);
            return;
        }

        match event {
            Event::Connected(_) | Event::RunCompleted(_) => {}
            Event::WalletStarted(e) => {
                output::section(&format!("Wallet {}", e.address));
                output::info(&format!(
                    "Current balance of {}: {} ETH",
                    e.address,
                    wei_to_ether(e.balance)
                ));
                if output::verbosity() > 0 {
                    output::field("Nonce", e.nonce);
                }
            }
            Event::WalletSkipped(e) => {
                output::error(&format!("Wallet {} skipped: {}", e.address, e.reason));
            }
            Event::InvalidKey(e) => {
                output::error(&format!(
                    "Invalid private key #{} ({}): {}",
                    e.index + 1,
                    e.masked,
                    e.reason
                ));
            }
            Event::Attempt(e) => match &e.record.outcome {
                TransferOutcome::Confirmed(hash) => {
                    output::success(&format!(
                        "Transaction successful with hash: {}",
                        output::highlight(hash)
                    ));
                }
                TransferOutcome::Failed(reason) => {
                    output::error(&format!("Transaction failed: {reason}"));
                }
                TransferOutcome::Skipped(reason) => {
                    output::warning(&format!("Transaction skipped: {reason}"));
                }
            },
            Event::ReplacementRetry(e) => {
                output::warning(&format!(
                    "Replacement underpriced at nonce {}; retrying at {} gwei",
                    e.nonce,
                    wei_to_gwei(e.gas_price)
                ));
            }
            Event::NonceGap(e) => {
                output::warning(&format!(
                    "Transaction {} failed on chain; nonce {} not advanced",
                    e.tx_hash, e.nonce
                ));
            }
            Event::WalletHalted(e) => {
                output::error(&format!("Stopping wallet {}: {}", e.address, e.reason));
            }
            Event::WalletCompleted(e) => {
                output::info(&format!(
                    "Completed transfers from wallet {}. Successful transactions: {}",
                    e.address, e.success_count
                ));
            }
        }
    }
}

fn emit_json(event: &Event) {
    let (kind, payload) = match event {
        Event::Connected(e) => (
            "connected",
            json!({ "endpoint": e.endpoint, "chain_id": e.chain_id }),
        ),
        Event::WalletStarted(e) => (
            "wallet_started",
            json!({
                "address": e.address.to_string(),
                "balance_wei": e.balance.to_string(),
                "nonce": e.nonce,
            }),
        ),
        Event::WalletSkipped(e) => (
            "wallet_skipped",
            json!({ "address": e.address.to_string(), "reason": e.reason }),
        ),
        Event::InvalidKey(e) => (
            "invalid_key",
            json!({ "index": e.index, "key": e.masked, "reason": e.reason }),
        ),
        Event::Attempt(e) => {
            let record = &e.record;
            let (status, tx_hash, reason) = match &record.outcome {
                TransferOutcome::Confirmed(hash) => ("confirmed", Some(hash.to_string()), None),
                TransferOutcome::Failed(err) => ("failed", None, Some(err.to_string())),
                TransferOutcome::Skipped(err) => ("skipped", None, Some(err.to_string())),
            };
            (
                "attempt",
                json!({
                    "address": e.address.to_string(),
                    "index": e.index,
                    "nonce": record.nonce,
                    "recipient": record.recipient.map(|a| a.to_string()),
                    "value_wei": record.value.to_string(),
                    "gas_price_wei": record.gas_price.to_string(),
                    "gas_limit": record.gas_limit,
                    "status": status,
                    "tx_hash": tx_hash,
                    "reason": reason,
                }),
            )
        }
        Event::ReplacementRetry(e) => (
            "replacement_retry",
            json!({
                "address": e.address.to_string(),
                "nonce": e.nonce,
                "previous_gas_price_wei": e.previous_gas_price.to_string(),
                "gas_price_wei": e.gas_price.to_string(),
            }),
        ),
        Event::NonceGap(e) => (
            "nonce_gap",
            json!({
                "address": e.address.to_string(),
                "nonce": e.nonce,
                "tx_hash": e.tx_hash.to_string(),
            }),
        ),
        Event::WalletHalted(e) => (
            "wallet_halted",
            json!({
                "address": e.address.to_string(),
                "reason": e.reason.to_string(),
                "success_count": e.success_count,
            }),
        ),
        Event::WalletCompleted(e) => (
            "wallet_completed",
            json!({
                "address": e.address.to_string(),
                "success_count": e.success_count,
                "total_attempted": e.total_attempted,
                "status": e.status.to_string(),
            }),
        ),
        Event::RunCompleted(e) => (
            "run_completed",
            json!({
                "run_id": e.run_id.to_string(),
                "wallets": e.wallets,
                "invalid_keys": e.invalid_keys,
                "successes": e.successes,
                "attempted": e.attempted,
            }),
        ),
    };
    output::json_event(kind, payload);
}
