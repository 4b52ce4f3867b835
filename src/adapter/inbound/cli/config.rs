//! Configuration assembly for CLI commands.
//!
//! Layers the optional TOML file, the process environment and command-line
//! flags, in that order. Validation is left to the caller so each command can
//! apply its own overrides first.

use std::path::Path;

use crate::adapter::inbound::cli::command::NetworkArgs;
use crate::adapter::inbound::cli::paths;
use crate::error::Result;
use crate::infrastructure::config::Config;

/// Load configuration for a command without validating it.
#[allow(clippy::result_large_err)]
pub fn load(explicit: Option<&Path>, network: &NetworkArgs) -> Result<Config> {
    load_with_env(explicit, network, |name| std::env::var(name).ok())
}

#[allow(clippy::result_large_err)]
fn load_with_env(
    explicit: Option<&Path>,
    network: &NetworkArgs,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Config> {
    let path = paths::resolve_config(explicit);
    let mut config = Config::read(path.as_deref())?;
    config.apply_env(lookup)?;
    apply_network_overrides(&mut config, network);
    Ok(config)
}

fn apply_network_overrides(config: &mut Config, network: &NetworkArgs) {
    if let Some(url) = &network.rpc_url {
        config.network.rpc_url = Some(url.clone());
    }
    if let Some(chain_id) = network.chain_id {
        config.network.chain_id = Some(chain_id);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn flags_override_file_and_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[network]\nrpc_url = \"http://file.example\"\nchain_id = 1\n"
        )
        .unwrap();

        let network = NetworkArgs {
            rpc_url: None,
            chain_id: Some(31_337),
        };
        let env = |name: &str| (name == "RPC_URL").then(|| "http://env.example".to_string());

        let config = load_with_env(Some(file.path()), &network, env).unwrap();

        assert_eq!(config.network.rpc_url.as_deref(), Some("http://env.example"));
        assert_eq!(config.network.chain_id, Some(31_337));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = load_with_env(Some(&missing), &NetworkArgs::default(), no_env).unwrap_err();
        assert!(err.is_startup_fatal());
    }
}
