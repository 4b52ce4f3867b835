//! EVM JSON-RPC adapters (alloy).

pub mod client;
pub mod keys;

pub use client::{RpcChainClient, DEFAULT_POLL_INTERVAL};
pub use keys::{LocalKeyring, RandomRecipients};
