//! Outbound adapters (driven side).

pub mod amount;
pub mod rpc;
