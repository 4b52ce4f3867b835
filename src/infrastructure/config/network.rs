//! Node endpoint configuration.

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, Result};

/// Target node and chain.
///
/// Both values may come from the `[network]` table, the `RPC_URL` and
/// `CHAIN_ID` env vars, or command-line flags, in increasing precedence.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkConfig {
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
}

impl NetworkConfig {
    /// Parsed endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when unset and
    /// [`ConfigError::InvalidValue`] when it is not an http(s) URL.
    #[allow(clippy::result_large_err)]
    pub fn endpoint(&self) -> Result<Url> {
        let raw = self
            .rpc_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingField { field: "RPC_URL" })?;
        let url = Url::parse(raw).map_err(|e| ConfigError::InvalidValue {
            field: "RPC_URL",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                field: "RPC_URL",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            }
            .into());
        }
        Ok(url)
    }

    /// Configured chain id.
    #[allow(clippy::result_large_err)]
    pub fn chain_id(&self) -> Result<u64> {
        Ok(self
            .chain_id
            .ok_or(ConfigError::MissingField { field: "CHAIN_ID" })?)
    }

    /// Parse a `CHAIN_ID` env value.
    #[allow(clippy::result_large_err)]
    pub fn parse_chain_id(raw: &str) -> Result<u64> {
        raw.trim().parse().map_err(|_| {
            ConfigError::InvalidValue {
                field: "CHAIN_ID",
                reason: "must be an integer".to_string(),
            }
            .into()
        })
    }
}
