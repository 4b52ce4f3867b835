//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::outbound::amount::UniformAmounts;
use crate::adapter::outbound::rpc::{LocalKeyring, RandomRecipients, RpcChainClient};
use crate::application::{self, Dispatcher, Inspection, Runner};
use crate::domain::RunReport;
use crate::error::{ConfigError, DispatchError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::{ChainClient, ConnectedEvent, Event, LogNotifier, Notifier, NotifierRegistry};

/// Build notifier registry: structured logs always, plus any extra sinks.
pub fn build_notifier_registry(extra: Vec<Box<dyn Notifier>>) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    for notifier in extra {
        registry.register(notifier);
    }
    registry
}

/// Build the JSON-RPC chain client for the configured endpoint.
#[allow(clippy::result_large_err)]
pub fn build_chain_client(config: &Config) -> Result<Arc<RpcChainClient>> {
    let url = config.network.endpoint()?;
    Ok(Arc::new(
        RpcChainClient::new(url).with_poll_interval(config.dispatch.receipt_poll_interval()),
    ))
}

/// Verify the node answers and serves the configured chain.
///
/// # Errors
///
/// [`DispatchError::Connectivity`] when the node is unreachable, and
/// [`ConfigError::InvalidValue`] on a chain id mismatch. Both are
/// startup-fatal.
pub async fn verify_connection(
    chain: &dyn ChainClient,
    config: &Config,
    notifier: &dyn Notifier,
) -> Result<u64> {
    let endpoint = config.network.endpoint()?;
    let expected = config.network.chain_id()?;

    if !chain.is_connected().await {
        return Err(DispatchError::Connectivity(format!(
            "failed to connect to the node at {endpoint}"
        ))
        .into());
    }

    let actual = chain.chain_id().await?;
    if actual != expected {
        return Err(ConfigError::InvalidValue {
            field: "CHAIN_ID",
            reason: format!("configured {expected} but the node reports {actual}"),
        }
        .into());
    }

    notifier.notify(Event::Connected(ConnectedEvent {
        endpoint: endpoint.to_string(),
        chain_id: actual,
    }));
    Ok(actual)
}

/// Wire the runner with the production keyring, recipients and amounts.
#[allow(clippy::result_large_err)]
pub fn build_runner(
    config: &Config,
    chain: Arc<dyn ChainClient>,
    notifier: Arc<dyn Notifier>,
) -> Result<Runner> {
    let dispatcher = Dispatcher::new(
        chain,
        Arc::new(RandomRecipients),
        Arc::new(UniformAmounts),
        notifier,
        config.network.chain_id()?,
        config.dispatch.policy()?,
    );
    Ok(Runner::new(dispatcher, Arc::new(LocalKeyring)))
}

/// Inspect every configured wallet with the production keyring.
pub async fn inspect_wallets(chain: &dyn ChainClient, config: &Config) -> Result<Inspection> {
    Ok(application::inspect_wallets(chain, &LocalKeyring, &config.wallet.private_keys).await?)
}

/// Run every configured wallet, sequentially or with bounded concurrency.
pub async fn run_wallets(
    runner: &Runner,
    config: &Config,
    count: u32,
    cancel: watch::Receiver<bool>,
) -> RunReport {
    let keys = &config.wallet.private_keys;
    let workers = config.dispatch.concurrency;
    info!(wallets = keys.len(), count, workers, "Dispersal starting");

    let report = if workers > 1 {
        runner.run_all_concurrent(keys, count, workers, cancel).await
    } else {
        runner.run_all(keys, count, &cancel).await
    };

    if !report.invalid_keys.is_empty() {
        warn!(
            invalid = report.invalid_keys.len(),
            "Some private keys could not be parsed"
        );
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::chain::ScriptedChain;
    use crate::testkit::notifier::RecordingNotifier;

    fn config(chain_id: u64) -> Config {
        let mut config = Config::default();
        config.network.rpc_url = Some("http://127.0.0.1:8545".into());
        config.network.chain_id = Some(chain_id);
        config
    }

    #[tokio::test]
    async fn connection_check_emits_connected_event() {
        let chain = ScriptedChain::new().with_chain_id(31_337);
        let notifier = RecordingNotifier::new();

        let id = verify_connection(&chain, &config(31_337), &notifier)
            .await
            .unwrap();

        assert_eq!(id, 31_337);
        assert_eq!(notifier.count(|e| matches!(e, Event::Connected(_))), 1);
    }

    #[tokio::test]
    async fn unreachable_node_is_startup_fatal() {
        let chain = ScriptedChain::new().disconnected();
        let err = verify_connection(&chain, &config(1), &RecordingNotifier::new())
            .await
            .unwrap_err();

        assert!(err.is_startup_fatal());
    }

    #[tokio::test]
    async fn chain_id_mismatch_is_startup_fatal() {
        let chain = ScriptedChain::new().with_chain_id(5);
        let err = verify_connection(&chain, &config(1), &RecordingNotifier::new())
            .await
            .unwrap_err();

        assert!(err.is_startup_fatal());
        assert!(err.to_string().contains("CHAIN_ID"));
    }

    #[test]
    fn registry_always_logs() {
        let registry = build_notifier_registry(vec![Box::new(RecordingNotifier::new())]);
        assert_eq!(registry.len(), 2);
    }
}
