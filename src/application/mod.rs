//! Application services (use cases).
//!
//! These services drive the domain through the outbound ports:
//! building transfers, running one wallet's dispatch loop, iterating over
//! every configured wallet, and read-only wallet inspection.

pub mod builder;
pub mod dispatch;
pub mod inspect;
pub mod policy;
pub mod runner;

pub use builder::TransactionBuilder;
pub use dispatch::Dispatcher;
pub use inspect::{inspect_wallets, Inspection, WalletSnapshot};
pub use policy::{ConfirmationFailurePolicy, DispatchPolicy};
pub use runner::Runner;
