//! Local key derivation and throwaway recipient generation.

use std::str::FromStr;

use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;

use crate::domain::{SecretKey, Wallet};
use crate::error::DispatchError;
use crate::port::{Keyring, RecipientSource};

/// Derives wallets from hex-encoded secp256k1 private keys.
///
/// Accepts keys with or without a `0x` prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalKeyring;

impl Keyring for LocalKeyring {
    fn derive(&self, key: &SecretKey) -> Result<Wallet, DispatchError> {
        let signer =
            PrivateKeySigner::from_str(key.expose()).map_err(|e| DispatchError::InvalidKey {
                reason: e.to_string(),
            })?;
        Ok(Wallet::new(key.clone(), signer.address()))
    }
}

/// Recipients derived from freshly generated keys.
///
/// The private half is dropped immediately, so funds sent there are not
/// recoverable by this tool.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRecipients;

impl RecipientSource for RandomRecipients {
    fn next_recipient(&self) -> Result<Address, DispatchError> {
        Ok(PrivateKeySigner::random().address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// First default anvil account.
    const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const ANVIL_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    #[test]
    fn derives_known_address_with_and_without_prefix() {
        let expected = Address::from_str(ANVIL_ADDRESS).unwrap();

        let wallet = LocalKeyring.derive(&SecretKey::from(ANVIL_KEY)).unwrap();
        assert_eq!(wallet.address(), expected);

        let bare = ANVIL_KEY.trim_start_matches("0x");
        let wallet = LocalKeyring.derive(&SecretKey::from(bare)).unwrap();
        assert_eq!(wallet.address(), expected);
    }

    #[test]
    fn malformed_keys_are_rejected() {
        for key in ["", "0x1234", "not hex at all"] {
            let err = LocalKeyring.derive(&SecretKey::from(key)).unwrap_err();
            assert!(matches!(err, DispatchError::InvalidKey { .. }));
        }
    }

    #[test]
    fn random_recipients_are_distinct_and_non_zero() {
        let a = RandomRecipients.next_recipient().unwrap();
        let b = RandomRecipients.next_recipient().unwrap();
        assert_ne!(a, b);
        assert_ne!(a, Address::ZERO);
    }
}
