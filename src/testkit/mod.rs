//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`chain`] - [`ScriptedChain`](chain::ScriptedChain), an in-memory
//!   [`ChainClient`](crate::port::ChainClient) with scripted send and
//!   receipt results.
//! - [`sources`] - Deterministic keyring, recipient and amount sources.
//! - [`notifier`] - [`RecordingNotifier`](notifier::RecordingNotifier) for
//!   asserting on emitted events.

pub mod chain;
pub mod notifier;
pub mod sources;
