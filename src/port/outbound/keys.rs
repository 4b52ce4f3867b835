//! Key and address capabilities.

use alloy_primitives::Address;

use crate::domain::{SecretKey, Wallet};
use crate::error::DispatchError;

/// Turns private key material into wallets.
pub trait Keyring: Send + Sync {
    /// Derive the wallet for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidKey`] for malformed key material.
    fn derive(&self, key: &SecretKey) -> Result<Wallet, DispatchError>;
}

/// Produces one-time recipient addresses.
pub trait RecipientSource: Send + Sync {
    /// A fresh address, never handed out before.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidRecipient`] when no address can be made.
    fn next_recipient(&self) -> Result<Address, DispatchError>;
}

/// Inclusive range of transfer amounts in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountRange {
    pub min: u128,
    pub max: u128,
}

impl AmountRange {
    /// Build a range, swapping bounds given in the wrong order.
    #[must_use]
    pub fn new(a: u128, b: u128) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[must_use]
    pub fn contains(&self, value: u128) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Draws transfer amounts.
pub trait AmountSource: Send + Sync {
    /// An amount in wei within `range`.
    fn next_amount(&self, range: AmountRange) -> u128;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_range_orders_bounds() {
        let range = AmountRange::new(10, 2);
        assert_eq!(range.min, 2);
        assert_eq!(range.max, 10);
        assert!(range.contains(2));
        assert!(range.contains(10));
        assert!(!range.contains(11));
    }
}
