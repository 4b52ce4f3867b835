//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the node connection, key handling, randomness
//! and event sinks the dispatch core depends on.

pub mod chain;
pub mod keys;
pub mod notifier;
