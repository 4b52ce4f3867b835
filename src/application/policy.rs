//! Dispatch policy knobs.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::units::gwei;
use crate::port::AmountRange;

/// Smallest default transfer: 0.0000001 ether.
pub const DEFAULT_MIN_AMOUNT_WEI: u128 = 100_000_000_000;

/// Largest default transfer: 0.000001 ether.
pub const DEFAULT_MAX_AMOUNT_WEI: u128 = 1_000_000_000_000;

/// How the loop reacts when a transfer mines with a failed status.
///
/// The transaction consumed its nonce on chain, but the loop cannot tell
/// whether a different transaction took that slot, so the choice is left to
/// the operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationFailurePolicy {
    /// Keep the local nonce and move on to the next attempt.
    #[default]
    Continue,
    /// Re-read the pending nonce from the chain before the next attempt.
    Resync,
}

/// Parameters of the per-wallet dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Range transfer amounts are drawn from.
    pub amounts: AmountRange,
    /// Added on top of the network gas price, in wei.
    pub priority_fee: u128,
    /// Added to the gas price when a broadcast is rejected as underpriced.
    pub replacement_bump: u128,
    /// Upper bound on waiting for a receipt.
    pub receipt_timeout: Duration,
    /// Pause between attempts of the same wallet.
    pub attempt_delay: Duration,
    pub on_confirmation_failure: ConfirmationFailurePolicy,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            amounts: AmountRange::new(DEFAULT_MIN_AMOUNT_WEI, DEFAULT_MAX_AMOUNT_WEI),
            priority_fee: gwei(1),
            replacement_bump: gwei(2),
            receipt_timeout: Duration::from_secs(120),
            attempt_delay: Duration::ZERO,
            on_confirmation_failure: ConfirmationFailurePolicy::Continue,
        }
    }
}
