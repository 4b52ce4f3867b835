//! Transfer dispatch settings.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::application::{ConfirmationFailurePolicy, DispatchPolicy};
use crate::domain::units::{ether_to_wei, gwei_to_wei};
use crate::error::{ConfigError, Result};
use crate::port::AmountRange;

/// Largest single transfer accepted from configuration, in ether.
pub const MAX_TRANSFER_ETH: Decimal = dec!(1);

/// The `[dispatch]` table.
///
/// Amounts are in ether and fees in gwei so the file reads the way operators
/// think about them; [`DispatchConfig::policy`] converts everything to wei.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Transfers per wallet. Prompted for when unset.
    pub count: Option<u32>,
    pub min_amount_eth: Decimal,
    pub max_amount_eth: Decimal,
    /// Added to the network gas price on every attempt.
    pub priority_fee_gwei: Decimal,
    /// Added to the gas price for the single underpriced-replacement retry.
    pub replacement_bump_gwei: Decimal,
    pub receipt_timeout_secs: u64,
    pub receipt_poll_interval_ms: u64,
    /// Pause between attempts of one wallet.
    pub attempt_delay_ms: u64,
    /// Wallets processed at once. `1` runs them strictly in key order.
    pub concurrency: usize,
    pub on_confirmation_failure: ConfirmationFailurePolicy,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            count: None,
            min_amount_eth: dec!(0.0000001),
            max_amount_eth: dec!(0.000001),
            priority_fee_gwei: dec!(1),
            replacement_bump_gwei: dec!(2),
            receipt_timeout_secs: 120,
            receipt_poll_interval_ms: 2_000,
            attempt_delay_ms: 0,
            concurrency: 1,
            on_confirmation_failure: ConfirmationFailurePolicy::Continue,
        }
    }
}

impl DispatchConfig {
    /// Check ranges and orderings.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.min_amount_eth <= Decimal::ZERO {
            return Err(invalid("min_amount_eth", "must be greater than 0"));
        }
        if self.max_amount_eth < self.min_amount_eth {
            return Err(invalid("max_amount_eth", "must be >= min_amount_eth"));
        }
        if self.max_amount_eth > MAX_TRANSFER_ETH {
            return Err(invalid(
                "max_amount_eth",
                &format!("must not exceed {MAX_TRANSFER_ETH}"),
            ));
        }
        if self.priority_fee_gwei < Decimal::ZERO {
            return Err(invalid("priority_fee_gwei", "must be 0 or greater"));
        }
        if self.replacement_bump_gwei <= Decimal::ZERO {
            return Err(invalid("replacement_bump_gwei", "must be greater than 0"));
        }
        if self.receipt_timeout_secs == 0 {
            return Err(invalid("receipt_timeout_secs", "must be greater than 0"));
        }
        if self.receipt_poll_interval_ms == 0 {
            return Err(invalid("receipt_poll_interval_ms", "must be greater than 0"));
        }
        if self.concurrency == 0 {
            return Err(invalid("concurrency", "must be greater than 0"));
        }
        if self.count == Some(0) {
            return Err(invalid("count", "must be greater than 0"));
        }
        Ok(())
    }

    /// Convert to the wei-denominated loop policy.
    #[allow(clippy::result_large_err)]
    pub fn policy(&self) -> Result<DispatchPolicy> {
        let min = ether_to_wei(self.min_amount_eth)
            .ok_or_else(|| invalid("min_amount_eth", "out of range"))?;
        let max = ether_to_wei(self.max_amount_eth)
            .ok_or_else(|| invalid("max_amount_eth", "out of range"))?;
        let priority_fee = gwei_to_wei(self.priority_fee_gwei)
            .ok_or_else(|| invalid("priority_fee_gwei", "out of range"))?;
        let replacement_bump = gwei_to_wei(self.replacement_bump_gwei)
            .ok_or_else(|| invalid("replacement_bump_gwei", "out of range"))?;

        Ok(DispatchPolicy {
            amounts: AmountRange::new(min, max),
            priority_fee,
            replacement_bump,
            receipt_timeout: Duration::from_secs(self.receipt_timeout_secs),
            attempt_delay: Duration::from_millis(self.attempt_delay_ms),
            on_confirmation_failure: self.on_confirmation_failure,
        })
    }

    #[must_use]
    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}
