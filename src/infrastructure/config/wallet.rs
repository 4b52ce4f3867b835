//! Funding wallet keys.

use serde::Deserialize;

use crate::domain::SecretKey;
use crate::error::{ConfigError, Result};

/// Funding wallet configuration.
///
/// Keys are loaded from the `PRIVATE_KEY` env var at runtime (never from the
/// config file) as a JSON list of hex strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    #[serde(skip)]
    pub private_keys: Vec<SecretKey>,
}

impl WalletConfig {
    /// Parse the `PRIVATE_KEY` value.
    ///
    /// Only the list shape is checked here; each key is validated when its
    /// wallet is derived so one bad entry does not block the others.
    #[allow(clippy::result_large_err)]
    pub fn parse_key_list(raw: &str) -> Result<Vec<SecretKey>> {
        let keys: Vec<String> = serde_json::from_str(raw).map_err(|_| ConfigError::InvalidValue {
            field: "PRIVATE_KEY",
            reason: "must be a JSON list of keys".to_string(),
        })?;
        Ok(keys.into_iter().map(SecretKey::new).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn parses_json_list() {
        let keys = WalletConfig::parse_key_list(r#"["0xabc", " 0xdef "]"#).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[1].expose(), "0xdef");
    }

    #[test]
    fn rejects_non_list_values() {
        for raw in [r#""0xabc""#, "0xabc", r#"{"key": "0xabc"}"#, "[1, 2]"] {
            let err = WalletConfig::parse_key_list(raw).unwrap_err();
            assert!(matches!(
                err,
                Error::Config(ConfigError::InvalidValue {
                    field: "PRIVATE_KEY",
                    ..
                })
            ));
        }
    }
}
