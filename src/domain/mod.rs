//! Chain-agnostic domain types for transfer dispersal.

pub mod key;
pub mod summary;
pub mod transfer;
pub mod units;
pub mod wallet;

pub use key::SecretKey;
pub use summary::{InvalidKey, RunReport, WalletRunSummary, WalletStatus};
pub use transfer::{AttemptRecord, Receipt, TransferOutcome, TransferRequest};
pub use wallet::Wallet;
