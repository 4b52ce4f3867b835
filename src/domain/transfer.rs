//! Transfer requests and their per-attempt results.

use alloy_primitives::{Address, TxHash, U256};

use crate::error::DispatchError;

/// An unsigned native-currency transfer.
///
/// Values are immutable once built; `with_*` methods return new requests so
/// every signing attempt works from its own instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub chain_id: u64,
    pub from: Address,
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
    /// Legacy gas price in wei.
    pub gas_price: u128,
    pub nonce: u64,
    /// Filled after estimation.
    pub gas_limit: Option<u64>,
}

impl TransferRequest {
    /// Copy of this request with the estimated gas limit set.
    #[must_use]
    pub fn with_gas_limit(&self, gas_limit: u64) -> Self {
        Self {
            gas_limit: Some(gas_limit),
            ..self.clone()
        }
    }

    /// Copy of this request at a different gas price, same nonce and gas limit.
    #[must_use]
    pub fn with_gas_price(&self, gas_price: u128) -> Self {
        Self {
            gas_price,
            ..self.clone()
        }
    }

    /// `value + gas_limit * gas_price`, or `None` before estimation.
    #[must_use]
    pub fn total_cost(&self) -> Option<U256> {
        let gas_limit = self.gas_limit?;
        let fee = U256::from(gas_limit).saturating_mul(U256::from(self.gas_price));
        Some(self.value.saturating_add(fee))
    }
}

/// Result of one transfer attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Mined with a successful status.
    Confirmed(TxHash),
    /// Attempted but not confirmed.
    Failed(DispatchError),
    /// Not broadcast.
    Skipped(DispatchError),
}

impl TransferOutcome {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }

    /// Error carried by a failed or skipped outcome.
    #[must_use]
    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Self::Confirmed(_) => None,
            Self::Failed(e) | Self::Skipped(e) => Some(e),
        }
    }
}

/// Receipt returned by the chain for a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub success: bool,
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

/// What happened on one iteration of a wallet's dispatch loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptRecord {
    pub nonce: u64,
    pub recipient: Option<Address>,
    pub value: U256,
    /// Gas price of the last broadcast (the bumped price after a replacement retry).
    pub gas_price: u128,
    pub gas_limit: Option<u64>,
    pub outcome: TransferOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TransferRequest {
        TransferRequest {
            chain_id: 1,
            from: Address::repeat_byte(0x01),
            to: Address::repeat_byte(0x02),
            value: U256::from(100u64),
            gas_price: 5,
            nonce: 7,
            gas_limit: None,
        }
    }

    #[test]
    fn total_cost_requires_gas_limit() {
        assert_eq!(request().total_cost(), None);
        assert_eq!(
            request().with_gas_limit(21_000).total_cost(),
            Some(U256::from(100u64 + 21_000 * 5))
        );
    }

    #[test]
    fn with_gas_price_keeps_nonce_and_gas_limit() {
        let estimated = request().with_gas_limit(21_000);
        let bumped = estimated.with_gas_price(9);

        assert_eq!(bumped.nonce, estimated.nonce);
        assert_eq!(bumped.gas_limit, Some(21_000));
        assert_eq!(bumped.gas_price, 9);
        assert_eq!(estimated.gas_price, 5);
    }

    #[test]
    fn outcome_error_accessor() {
        let failed = TransferOutcome::Failed(DispatchError::Estimation("revert".into()));
        assert!(failed.error().is_some());
        assert!(!failed.is_confirmed());
        assert!(TransferOutcome::Confirmed(TxHash::ZERO).error().is_none());
    }
}
