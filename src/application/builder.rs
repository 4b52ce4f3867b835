//! Unsigned transfer construction.

use alloy_primitives::{Address, U256};

use crate::domain::{TransferRequest, Wallet};
use crate::error::DispatchError;

/// Builds transfer requests for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionBuilder {
    chain_id: u64,
}

impl TransactionBuilder {
    #[must_use]
    pub const fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Build an unsigned transfer from `wallet` to `recipient`. The gas limit
    /// is left unset for estimation.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidRecipient`] for the zero address or the
    /// sender's own address.
    pub fn build(
        &self,
        wallet: &Wallet,
        recipient: Address,
        value: U256,
        gas_price: u128,
        nonce: u64,
    ) -> Result<TransferRequest, DispatchError> {
        if recipient == Address::ZERO {
            return Err(DispatchError::InvalidRecipient("zero address".into()));
        }
        if recipient == wallet.address() {
            return Err(DispatchError::InvalidRecipient(format!(
                "{recipient} is the sending wallet"
            )));
        }

        Ok(TransferRequest {
            chain_id: self.chain_id,
            from: wallet.address(),
            to: recipient,
            value,
            gas_price,
            nonce,
            gas_limit: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SecretKey;

    fn wallet() -> Wallet {
        Wallet::new(SecretKey::from("key"), Address::repeat_byte(0xaa))
    }

    #[test]
    fn build_fills_every_field_but_gas_limit() {
        let builder = TransactionBuilder::new(11_155_111);
        let to = Address::repeat_byte(0xbb);
        let request = builder
            .build(&wallet(), to, U256::from(500u64), 3_000_000_000, 9)
            .unwrap();

        assert_eq!(request.chain_id, 11_155_111);
        assert_eq!(request.from, Address::repeat_byte(0xaa));
        assert_eq!(request.to, to);
        assert_eq!(request.value, U256::from(500u64));
        assert_eq!(request.gas_price, 3_000_000_000);
        assert_eq!(request.nonce, 9);
        assert_eq!(request.gas_limit, None);
    }

    #[test]
    fn build_rejects_zero_recipient() {
        let result = TransactionBuilder::new(1).build(&wallet(), Address::ZERO, U256::from(1u64), 1, 0);
        assert!(matches!(result, Err(DispatchError::InvalidRecipient(_))));
    }

    #[test]
    fn build_rejects_self_transfer() {
        let w = wallet();
        let result = TransactionBuilder::new(1).build(&w, w.address(), U256::from(1u64), 1, 0);
        assert!(matches!(result, Err(DispatchError::InvalidRecipient(_))));
    }
}
