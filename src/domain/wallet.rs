//! Funding wallet state owned by one dispatch loop.

use alloy_primitives::{Address, U256};

use super::key::SecretKey;

/// A funding wallet and its loop-local view of chain state.
///
/// `balance` and `nonce` are refreshed from the chain when a dispatch loop
/// starts and then advanced locally as transfers confirm.
#[derive(Debug, Clone)]
pub struct Wallet {
    key: SecretKey,
    address: Address,
    /// Last known balance in wei.
    pub balance: U256,
    /// Next nonce to use.
    pub nonce: u64,
}

impl Wallet {
    /// Create a wallet with unknown balance and nonce.
    pub fn new(key: SecretKey, address: Address) -> Self {
        Self {
            key,
            address,
            balance: U256::ZERO,
            nonce: 0,
        }
    }

    #[must_use]
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Record a confirmed transfer: consume its cost and move to the next nonce.
    pub fn apply_confirmed(&mut self, cost: U256) {
        self.balance = self.balance.saturating_sub(cost);
        self.nonce += 1;
    }

    /// Record gas spent by a transaction that mined without transferring value.
    /// The nonce is left alone.
    pub fn apply_fee(&mut self, fee: U256) {
        self.balance = self.balance.saturating_sub(fee);
    }

    /// True when `cost` fits in the last known balance.
    #[must_use]
    pub fn can_afford(&self, cost: U256) -> bool {
        cost <= self.balance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet(balance: u64, nonce: u64) -> Wallet {
        let mut w = Wallet::new(SecretKey::from("k"), Address::repeat_byte(0x11));
        w.balance = U256::from(balance);
        w.nonce = nonce;
        w
    }

    #[test]
    fn apply_confirmed_advances_nonce_and_spends_balance() {
        let mut w = wallet(10, 4);
        w.apply_confirmed(U256::from(3u64));
        assert_eq!(w.nonce, 5);
        assert_eq!(w.balance, U256::from(7u64));
    }

    #[test]
    fn apply_fee_spends_balance_but_keeps_nonce() {
        let mut w = wallet(10, 4);
        w.apply_fee(U256::from(4u64));
        assert_eq!(w.nonce, 4);
        assert_eq!(w.balance, U256::from(6u64));
    }

    #[test]
    fn apply_confirmed_never_underflows() {
        let mut w = wallet(2, 0);
        w.apply_confirmed(U256::from(3u64));
        assert_eq!(w.balance, U256::ZERO);
    }

    #[test]
    fn can_afford_is_inclusive() {
        let w = wallet(3, 0);
        assert!(w.can_afford(U256::from(3u64)));
        assert!(!w.can_afford(U256::from(4u64)));
    }
}
