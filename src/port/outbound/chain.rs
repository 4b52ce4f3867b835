//! Chain client port.
//!
//! The capability set the dispatch loop needs from a node: account queries,
//! gas pricing and estimation, signed broadcast, and receipt lookup.

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::domain::{Receipt, SecretKey, TransferRequest};
use crate::error::DispatchError;

/// Result type for chain operations.
pub type ChainResult<T> = std::result::Result<T, DispatchError>;

/// Port for talking to an EVM node.
///
/// Implementations are shared across wallet workers, so they must be
/// thread-safe and hold no per-wallet state.
///
/// # Errors
///
/// Query methods fail with [`DispatchError::Connectivity`]. Broadcast
/// distinguishes [`DispatchError::UnderpricedReplacement`] from every other
/// [`DispatchError::Submission`] failure.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Return whether the node answers requests.
    async fn is_connected(&self) -> bool;

    /// Chain id reported by the node.
    async fn chain_id(&self) -> ChainResult<u64>;

    /// Balance of `address` in wei.
    async fn balance(&self, address: Address) -> ChainResult<U256>;

    /// Nonce for the next transaction from `address`, counting pending ones.
    async fn pending_nonce(&self, address: Address) -> ChainResult<u64>;

    /// Current network gas price in wei.
    async fn gas_price(&self) -> ChainResult<u128>;

    /// Estimate the gas limit for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Estimation`] when the node rejects the call.
    async fn estimate_gas(&self, request: &TransferRequest) -> ChainResult<u64>;

    /// Sign `request` with `key` and broadcast it.
    ///
    /// `request` must carry a gas limit.
    async fn sign_and_send(&self, request: &TransferRequest, key: &SecretKey)
        -> ChainResult<TxHash>;

    /// Wait until `tx_hash` is mined and return its receipt.
    ///
    /// Blocks without a deadline; callers bound the wait.
    async fn wait_for_receipt(&self, tx_hash: TxHash) -> ChainResult<Receipt>;
}
