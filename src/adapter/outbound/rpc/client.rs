//! JSON-RPC chain client built on alloy.
//!
//! Queries go through one shared, type-erased HTTP provider. Broadcasts build a
//! short-lived wallet provider per call so key material never outlives the
//! request that needs it.

use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::network::{EthereumWallet, TransactionBuilder};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, trace};
use url::Url;

use crate::domain::{Receipt, SecretKey, TransferRequest};
use crate::error::DispatchError;
use crate::port::{ChainClient, ChainResult};

/// Node error fragments that mean "same nonce already pending at a higher price".
const UNDERPRICED_MARKERS: &[&str] = &[
    "replacement transaction underpriced",
    "replacement fee too low",
];

/// Default delay between receipt polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// [`ChainClient`] backed by an HTTP JSON-RPC endpoint.
pub struct RpcChainClient {
    url: Url,
    provider: DynProvider,
    poll_interval: Duration,
}

impl RpcChainClient {
    /// Create a client for `url`. No request is made until first use.
    pub fn new(url: Url) -> Self {
        let provider = ProviderBuilder::new().connect_http(url.clone()).erased();
        Self {
            url,
            provider,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

fn connectivity(err: impl std::fmt::Display) -> DispatchError {
    DispatchError::Connectivity(err.to_string())
}

/// Map a broadcast failure onto the dispatch taxonomy.
fn classify_send_error(message: String) -> DispatchError {
    let lower = message.to_lowercase();
    if UNDERPRICED_MARKERS.iter().any(|m| lower.contains(m)) {
        DispatchError::UnderpricedReplacement(message)
    } else {
        DispatchError::Submission(message)
    }
}

/// Legacy transaction with every field the node would otherwise fill in.
fn to_rpc_request(request: &TransferRequest) -> TransactionRequest {
    let tx = TransactionRequest::default()
        .with_from(request.from)
        .with_to(request.to)
        .with_value(request.value)
        .with_nonce(request.nonce)
        .with_gas_price(request.gas_price)
        .with_chain_id(request.chain_id);
    match request.gas_limit {
        Some(gas) => tx.with_gas_limit(gas),
        None => tx,
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn is_connected(&self) -> bool {
        match self.provider.get_block_number().await {
            Ok(block) => {
                trace!(block, "Node reachable");
                true
            }
            Err(e) => {
                debug!(error = %e, url = %self.url, "Node unreachable");
                false
            }
        }
    }

    async fn chain_id(&self) -> ChainResult<u64> {
        self.provider.get_chain_id().await.map_err(connectivity)
    }

    async fn balance(&self, address: Address) -> ChainResult<U256> {
        self.provider
            .get_balance(address)
            .await
            .map_err(connectivity)
    }

    async fn pending_nonce(&self, address: Address) -> ChainResult<u64> {
        self.provider
            .get_transaction_count(address)
            .pending()
            .await
            .map_err(connectivity)
    }

    async fn gas_price(&self) -> ChainResult<u128> {
        self.provider.get_gas_price().await.map_err(connectivity)
    }

    async fn estimate_gas(&self, request: &TransferRequest) -> ChainResult<u64> {
        self.provider
            .estimate_gas(to_rpc_request(request))
            .await
            .map_err(|e| DispatchError::Estimation(e.to_string()))
    }

    async fn sign_and_send(
        &self,
        request: &TransferRequest,
        key: &SecretKey,
    ) -> ChainResult<TxHash> {
        if request.gas_limit.is_none() {
            return Err(DispatchError::Submission("transfer has no gas limit".into()));
        }
        let signer = PrivateKeySigner::from_str(key.expose()).map_err(|e| {
            DispatchError::InvalidKey {
                reason: e.to_string(),
            }
        })?;
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(self.url.clone());

        let pending = provider
            .send_transaction(to_rpc_request(request))
            .await
            .map_err(|e| classify_send_error(e.to_string()))?;
        Ok(*pending.tx_hash())
    }

    async fn wait_for_receipt(&self, tx_hash: TxHash) -> ChainResult<Receipt> {
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(connectivity)?;
            if let Some(receipt) = receipt {
                return Ok(Receipt {
                    tx_hash,
                    success: receipt.status(),
                    block_number: receipt.block_number,
                    gas_used: receipt.gas_used,
                });
            }
            trace!(%tx_hash, "Receipt not yet available");
            sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn underpriced_messages_are_recognised_case_insensitively() {
        let err = classify_send_error(
            "server returned an error response: error code -32000: Replacement Transaction Underpriced"
                .into(),
        );
        assert!(matches!(err, DispatchError::UnderpricedReplacement(_)));

        let err = classify_send_error("replacement fee too low".into());
        assert!(matches!(err, DispatchError::UnderpricedReplacement(_)));
    }

    #[test]
    fn other_send_errors_are_submission_failures() {
        for msg in ["nonce too low", "insufficient funds for gas * price + value"] {
            assert!(matches!(
                classify_send_error(msg.into()),
                DispatchError::Submission(_)
            ));
        }
    }

    #[test]
    fn rpc_request_carries_every_field() {
        let request = TransferRequest {
            chain_id: 11_155_111,
            from: Address::repeat_byte(0x01),
            to: Address::repeat_byte(0x02),
            value: U256::from(1_000u64),
            gas_price: 3_000_000_000,
            nonce: 12,
            gas_limit: Some(21_000),
        };
        let tx = to_rpc_request(&request);

        assert_eq!(tx.from, Some(request.from));
        assert_eq!(tx.nonce, Some(12));
        assert_eq!(tx.gas_price, Some(3_000_000_000));
        assert_eq!(tx.gas, Some(21_000));
        assert_eq!(tx.chain_id, Some(11_155_111));
        assert_eq!(tx.value, Some(U256::from(1_000u64)));
    }

    #[tokio::test]
    async fn new_client_keeps_endpoint() {
        let url: Url = "http://127.0.0.1:8545".parse().unwrap();
        let client = RpcChainClient::new(url.clone()).with_poll_interval(Duration::from_millis(10));
        assert_eq!(client.url(), &url);
        assert_eq!(client.poll_interval, Duration::from_millis(10));
    }
}
