//! Deterministic key, recipient and amount sources.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::Address;

use crate::domain::{SecretKey, Wallet};
use crate::error::DispatchError;
use crate::port::{AmountRange, AmountSource, Keyring, RecipientSource};

/// Always returns the same amount, clamped into the requested range.
pub struct FixedAmounts(pub u128);

impl AmountSource for FixedAmounts {
    fn next_amount(&self, range: AmountRange) -> u128 {
        self.0.clamp(range.min, range.max)
    }
}

/// Hands out `0x5e5e…0001`, `0x5e5e…0002`, ... in order.
pub struct SequentialRecipients {
    next: AtomicU64,
}

impl SequentialRecipients {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl Default for SequentialRecipients {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipientSource for SequentialRecipients {
    fn next_recipient(&self) -> Result<Address, DispatchError> {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        let mut bytes = [0x5e; 20];
        bytes[12..].copy_from_slice(&n.to_be_bytes());
        Ok(Address::from(bytes))
    }
}

/// Maps known key strings to addresses; anything else is malformed.
#[derive(Default)]
pub struct StaticKeyring {
    keys: HashMap<String, Address>,
}

impl StaticKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(mut self, key: &str, address: Address) -> Self {
        self.keys.insert(key.to_string(), address);
        self
    }
}

impl Keyring for StaticKeyring {
    fn derive(&self, key: &SecretKey) -> Result<Wallet, DispatchError> {
        self.keys
            .get(key.expose())
            .map(|address| Wallet::new(key.clone(), *address))
            .ok_or_else(|| DispatchError::InvalidKey {
                reason: "unknown test key".into(),
            })
    }
}
