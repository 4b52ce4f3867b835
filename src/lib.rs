//! Sprinkle - bulk dispersal of small native-currency transfers.
//!
//! For every configured funding wallet, sprinkle sends a requested number of
//! randomly sized transfers to freshly generated addresses on an EVM chain,
//! tracking the nonce and balance locally and recovering from underpriced
//! replacement rejections.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Chain-agnostic types: keys, wallets, transfer requests,
//!   attempt records and run summaries
//! - **`port`** - Outbound traits the core depends on: [`port::ChainClient`],
//!   [`port::Keyring`], [`port::RecipientSource`], [`port::AmountSource`] and
//!   [`port::Notifier`]
//! - **`application`** - Use cases: the transaction builder, the per-wallet
//!   dispatch loop, the wallet runner and read-only inspection
//! - **`adapter`** - The `sprinkle` CLI (inbound) plus the JSON-RPC client,
//!   local keys and random amounts (outbound)
//! - **`infrastructure`** - Configuration loading and runtime wiring
//!
//! # Features
//!
//! - `testkit` - Scripted chain, fixed sources and a recording notifier for
//!   tests
//!
//! # Example
//!
//! ```no_run
//! use sprinkle::infrastructure::bootstrap;
//! use sprinkle::infrastructure::config::Config;
//! use sprinkle::port::LogNotifier;
//! use std::sync::Arc;
//!
//! # async fn demo() -> sprinkle::error::Result<()> {
//! let config = Config::load(None)?;
//! let chain = bootstrap::build_chain_client(&config)?;
//! bootstrap::verify_connection(chain.as_ref(), &config, &LogNotifier).await?;
//!
//! let runner = bootstrap::build_runner(&config, chain, Arc::new(LogNotifier))?;
//! let (_stop, cancel) = tokio::sync::watch::channel(false);
//! let report = bootstrap::run_wallets(&runner, &config, 10, cancel).await;
//! println!("{} transfers confirmed", report.total_successes());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
