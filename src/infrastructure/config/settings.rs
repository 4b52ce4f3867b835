//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Settings come from an optional TOML file, then the `RPC_URL`, `CHAIN_ID` and
//! `PRIVATE_KEY` environment variables (typically from `.env`), then
//! command-line overrides. Private keys are never read from the file.
//!
//! # Example
//!
//! ```no_run
//! use sprinkle::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Some("sprinkle.toml".as_ref()))?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::dispatch::DispatchConfig;
use super::logging::LoggingConfig;
use super::network::NetworkConfig;
use super::wallet::WalletConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Node endpoint and chain id.
    #[serde(default)]
    pub network: NetworkConfig,

    /// Amounts, fees, timeouts and concurrency of the dispatch loop.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Funding wallet keys, populated from `PRIVATE_KEY` only.
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content without touching the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the TOML content is malformed.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    /// Read the file at `path`, or start from defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[allow(clippy::result_large_err)]
    pub fn read(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
                Self::parse_toml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    /// Overlay values from environment variables.
    ///
    /// `lookup` stands in for `std::env::var` so tests can supply a fixed
    /// environment. Unset or blank variables leave the file values alone.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when `CHAIN_ID` is not an integer
    /// or `PRIVATE_KEY` is not a JSON list.
    #[allow(clippy::result_large_err)]
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("RPC_URL") {
            self.network.rpc_url = Some(url.trim().to_string());
        }
        if let Some(raw) = get("CHAIN_ID") {
            self.network.chain_id = Some(NetworkConfig::parse_chain_id(&raw)?);
        }
        if let Some(raw) = get("PRIVATE_KEY") {
            self.wallet.private_keys = WalletConfig::parse_key_list(&raw)?;
        }
        Ok(())
    }

    /// Load from an optional file plus the process environment, then validate.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, parsing, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.network.endpoint()?;
        self.network.chain_id()?;
        if self.wallet.private_keys.is_empty() {
            return Err(ConfigError::MissingField {
                field: "PRIVATE_KEY",
            }
            .into());
        }
        self.dispatch.validate()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::application::ConfirmationFailurePolicy;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const FULL_ENV: &[(&str, &str)] = &[
        ("RPC_URL", "http://127.0.0.1:8545"),
        ("CHAIN_ID", "31337"),
        ("PRIVATE_KEY", r#"["0x01", "0x02"]"#),
    ];

    #[test]
    fn env_only_configuration_is_valid() {
        let mut config = Config::default();
        config.apply_env(env(FULL_ENV)).unwrap();
        config.validate().unwrap();

        assert_eq!(config.network.chain_id, Some(31_337));
        assert_eq!(config.wallet.private_keys.len(), 2);
        assert_eq!(config.dispatch.concurrency, 1);
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = Config::parse_toml(
            r#"
            [network]
            rpc_url = "http://file.example"
            chain_id = 1
            "#,
        )
        .unwrap();
        config.apply_env(env(FULL_ENV)).unwrap();

        assert_eq!(config.network.rpc_url.as_deref(), Some("http://127.0.0.1:8545"));
        assert_eq!(config.network.chain_id, Some(31_337));
    }

    #[test]
    fn missing_variables_name_the_field() {
        for missing in ["RPC_URL", "CHAIN_ID", "PRIVATE_KEY"] {
            let pairs: Vec<_> = FULL_ENV
                .iter()
                .copied()
                .filter(|(k, _)| *k != missing)
                .collect();
            let mut config = Config::default();
            config.apply_env(env(&pairs)).unwrap();

            match config.validate().unwrap_err() {
                Error::Config(ConfigError::MissingField { field }) => assert_eq!(field, missing),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn non_integer_chain_id_is_rejected() {
        let mut config = Config::default();
        let err = config.apply_env(env(&[("CHAIN_ID", "mainnet")])).unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "CHAIN_ID",
                ..
            })
        ));
    }

    #[test]
    fn private_keys_in_file_are_ignored() {
        let config = Config::parse_toml(
            r#"
            [wallet]
            private_keys = ["0xdeadbeef"]
            "#,
        )
        .unwrap();
        assert!(config.wallet.private_keys.is_empty());
    }

    #[test]
    fn dispatch_table_is_parsed() {
        let config = Config::parse_toml(
            r#"
            [dispatch]
            count = 25
            min_amount_eth = "0.000001"
            max_amount_eth = "0.00001"
            concurrency = 4
            on_confirmation_failure = "resync"
            "#,
        )
        .unwrap();

        assert_eq!(config.dispatch.count, Some(25));
        assert_eq!(config.dispatch.min_amount_eth, dec!(0.000001));
        assert_eq!(config.dispatch.concurrency, 4);
        assert_eq!(
            config.dispatch.on_confirmation_failure,
            ConfirmationFailurePolicy::Resync
        );
        assert_eq!(config.dispatch.priority_fee_gwei, dec!(1));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Config::parse_toml("[dispatch\ncount = 1").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
