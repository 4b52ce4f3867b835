//! Read-only wallet inspection.

use alloy_primitives::{Address, U256};

use crate::domain::{InvalidKey, SecretKey};
use crate::error::DispatchError;
use crate::port::{ChainClient, Keyring};

/// On-chain state of one funding wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSnapshot {
    /// Position in the configured key list.
    pub index: usize,
    pub address: Address,
    pub balance: U256,
    pub nonce: u64,
}

/// Result of inspecting every configured key.
#[derive(Debug, Clone, Default)]
pub struct Inspection {
    pub wallets: Vec<WalletSnapshot>,
    pub invalid_keys: Vec<InvalidKey>,
}

impl Inspection {
    /// Sum of all wallet balances in wei.
    #[must_use]
    pub fn total_balance(&self) -> U256 {
        self.wallets
            .iter()
            .fold(U256::ZERO, |acc, w| acc.saturating_add(w.balance))
    }

    /// Wallets that hold nothing and would be skipped by a run.
    pub fn empty_wallets(&self) -> impl Iterator<Item = &WalletSnapshot> {
        self.wallets.iter().filter(|w| w.balance.is_zero())
    }
}

/// Derive every key and query its balance and pending nonce.
///
/// Malformed keys are collected rather than returned as errors; a failed
/// chain query aborts the inspection.
pub async fn inspect_wallets(
    chain: &dyn ChainClient,
    keyring: &dyn Keyring,
    keys: &[SecretKey],
) -> Result<Inspection, DispatchError> {
    let mut inspection = Inspection::default();

    for (index, key) in keys.iter().enumerate() {
        let wallet = match keyring.derive(key) {
            Ok(wallet) => wallet,
            Err(e) => {
                inspection.invalid_keys.push(InvalidKey {
                    index,
                    masked: key.masked(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let address = wallet.address();
        let balance = chain.balance(address).await?;
        let nonce = chain.pending_nonce(address).await?;
        inspection.wallets.push(WalletSnapshot {
            index,
            address,
            balance,
            nonce,
        });
    }

    Ok(inspection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::chain::ScriptedChain;
    use crate::testkit::sources::StaticKeyring;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[tokio::test]
    async fn reports_balances_nonces_and_bad_keys() {
        let chain = ScriptedChain::new()
            .with_balance(addr(0xa1), U256::from(1_000u64))
            .with_nonce(addr(0xa1), 4);
        let keyring = StaticKeyring::new()
            .with_key("alice", addr(0xa1))
            .with_key("bob", addr(0xb0));
        let keys = ["alice", "junk", "bob"].map(SecretKey::new);

        let inspection = inspect_wallets(&chain, &keyring, &keys).await.unwrap();

        assert_eq!(inspection.wallets.len(), 2);
        assert_eq!(inspection.wallets[0].nonce, 4);
        assert_eq!(inspection.wallets[1].index, 2);
        assert_eq!(inspection.invalid_keys.len(), 1);
        assert_eq!(inspection.invalid_keys[0].index, 1);
        assert_eq!(inspection.total_balance(), U256::from(1_000u64));
        assert_eq!(inspection.empty_wallets().count(), 1);
    }

    #[tokio::test]
    async fn chain_failure_aborts() {
        let chain = ScriptedChain::new().disconnected();
        let keyring = StaticKeyring::new().with_key("alice", addr(0xa1));

        let err = inspect_wallets(&chain, &keyring, &[SecretKey::new("alice")])
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Connectivity(_)));
    }
}
