use std::time::Duration;

use alloy_primitives::{TxHash, U256};
use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures raised while dispatching transfers for a wallet.
///
/// Variants carry only owned, cloneable data so they can be stored on
/// per-attempt outcomes and forwarded to notifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("node unreachable: {0}")]
    Connectivity(String),

    #[error("invalid private key: {reason}")]
    InvalidKey { reason: String },

    #[error("invalid recipient: {0}")]
    InvalidRecipient(String),

    #[error("insufficient balance: required {required} wei, available {available} wei")]
    InsufficientBalance { required: U256, available: U256 },

    #[error("gas estimation failed: {0}")]
    Estimation(String),

    #[error("replacement transaction underpriced: {0}")]
    UnderpricedReplacement(String),

    #[error("transaction submission failed: {0}")]
    Submission(String),

    #[error("transaction {tx_hash} was mined with a failed status")]
    ConfirmationFailure { tx_hash: TxHash },

    #[error("no receipt for {tx_hash} after {}s", .waited.as_secs())]
    Timeout { tx_hash: TxHash, waited: Duration },
}

impl DispatchError {
    /// True when this error stops the remaining attempts of the wallet.
    ///
    /// Estimation failures, failed confirmations and failed replacement
    /// retries only abandon the current attempt.
    #[must_use]
    pub fn is_wallet_fatal(&self) -> bool {
        matches!(
            self,
            Self::Connectivity(_)
                | Self::InvalidKey { .. }
                | Self::InsufficientBalance { .. }
                | Self::Submission(_)
                | Self::Timeout { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("prompt failed: {0}")]
    Prompt(String),
}

impl Error {
    /// True for failures that must stop the process before any wallet runs.
    #[must_use]
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Url(_)
                | Self::Prompt(_)
                | Self::Dispatch(DispatchError::Connectivity(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Prompt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_and_balance_errors_halt_the_wallet() {
        assert!(DispatchError::Submission("nonce too low".into()).is_wallet_fatal());
        assert!(DispatchError::InsufficientBalance {
            required: U256::from(3u64),
            available: U256::from(1u64),
        }
        .is_wallet_fatal());
        assert!(DispatchError::Timeout {
            tx_hash: TxHash::ZERO,
            waited: Duration::from_secs(5),
        }
        .is_wallet_fatal());
    }

    #[test]
    fn per_attempt_errors_do_not_halt_the_wallet() {
        assert!(!DispatchError::Estimation("execution reverted".into()).is_wallet_fatal());
        assert!(!DispatchError::UnderpricedReplacement("again".into()).is_wallet_fatal());
        assert!(!DispatchError::ConfirmationFailure {
            tx_hash: TxHash::ZERO
        }
        .is_wallet_fatal());
        assert!(!DispatchError::InvalidRecipient("zero address".into()).is_wallet_fatal());
    }

    #[test]
    fn connectivity_and_config_errors_are_startup_fatal() {
        let err: Error = DispatchError::Connectivity("refused".into()).into();
        assert!(err.is_startup_fatal());

        let err: Error = ConfigError::MissingField { field: "RPC_URL" }.into();
        assert!(err.is_startup_fatal());

        let err = Error::Prompt("stdin closed".into());
        assert!(err.is_startup_fatal());

        let err: Error = DispatchError::Submission("boom".into()).into();
        assert!(!err.is_startup_fatal());
    }

    #[test]
    fn timeout_message_reports_seconds() {
        let err = DispatchError::Timeout {
            tx_hash: TxHash::ZERO,
            waited: Duration::from_secs(90),
        };
        assert!(err.to_string().contains("after 90s"));
    }
}
