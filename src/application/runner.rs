//! Drives the dispatch loop across every configured key.

use std::sync::Arc;

use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::{error, info_span, warn, Instrument};

use super::dispatch::Dispatcher;
use crate::domain::{InvalidKey, RunReport, SecretKey, Wallet, WalletRunSummary};
use crate::port::{Event, Keyring, RunCompletedEvent};

/// Wallet iterator.
///
/// Keys are validated up front; each valid wallet then runs the dispatch loop
/// to completion. Wallets never share mutable state, so they can run one at a
/// time or one worker each.
#[derive(Clone)]
pub struct Runner {
    dispatcher: Dispatcher,
    keyring: Arc<dyn Keyring>,
}

impl Runner {
    pub fn new(dispatcher: Dispatcher, keyring: Arc<dyn Keyring>) -> Self {
        Self {
            dispatcher,
            keyring,
        }
    }

    /// Process wallets one after another, in key-list order.
    ///
    /// Once `cancel` is set no further wallet is started.
    pub async fn run_all(
        &self,
        keys: &[SecretKey],
        count: u32,
        cancel: &watch::Receiver<bool>,
    ) -> RunReport {
        let mut report = RunReport::start();
        let wallets = self.load(keys, &mut report);
        let span = info_span!("run", run_id = %report.run_id);

        async {
            for (_, wallet) in wallets {
                if *cancel.borrow() {
                    warn!("Cancelled; remaining wallets not started");
                    break;
                }
                let span = info_span!("wallet", address = %wallet.address());
                let summary = self
                    .dispatcher
                    .run_wallet(wallet, count, cancel)
                    .instrument(span)
                    .await;
                report.summaries.push(summary);
            }
        }
        .instrument(span)
        .await;

        self.finish(report)
    }

    /// Process wallets with up to `workers` running at once.
    ///
    /// Each wallet gets its own task; attempts within a wallet stay serial.
    /// Summaries are joined from a [`JoinSet`] and returned in key-list order.
    /// A wallet still waiting for a worker when `cancel` is set is not started.
    pub async fn run_all_concurrent(
        &self,
        keys: &[SecretKey],
        count: u32,
        workers: usize,
        cancel: watch::Receiver<bool>,
    ) -> RunReport {
        let mut report = RunReport::start();
        let wallets = self.load(keys, &mut report);
        let run_id = report.run_id;

        let permits = Arc::new(Semaphore::new(workers.max(1)));
        let mut tasks: JoinSet<(usize, Option<WalletRunSummary>)> = JoinSet::new();

        for (index, wallet) in wallets {
            let permits = Arc::clone(&permits);
            let dispatcher = self.dispatcher.clone();
            let cancel = cancel.clone();
            let span = info_span!("wallet", %run_id, address = %wallet.address());

            tasks.spawn(
                async move {
                    let Ok(_permit) = permits.acquire_owned().await else {
                        return (index, None);
                    };
                    if *cancel.borrow() {
                        return (index, None);
                    }
                    let summary = dispatcher.run_wallet(wallet, count, &cancel).await;
                    (index, Some(summary))
                }
                .instrument(span),
            );
        }

        let mut collected = Vec::new();
        let mut not_started = 0usize;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, Some(summary))) => collected.push((index, summary)),
                Ok((_, None)) => not_started += 1,
                Err(e) => error!(%run_id, error = %e, "Wallet task failed; its summary is lost"),
            }
        }
        if not_started > 0 {
            warn!(%run_id, wallets = not_started, "Cancelled; remaining wallets not started");
        }

        collected.sort_by_key(|(index, _)| *index);
        report.summaries = collected.into_iter().map(|(_, summary)| summary).collect();

        self.finish(report)
    }

    /// Derive a wallet for every key, reporting and dropping invalid ones.
    fn load(&self, keys: &[SecretKey], report: &mut RunReport) -> Vec<(usize, Wallet)> {
        let mut wallets = Vec::with_capacity(keys.len());
        for (index, key) in keys.iter().enumerate() {
            match self.keyring.derive(key) {
                Ok(wallet) => wallets.push((index, wallet)),
                Err(e) => {
                    let invalid = InvalidKey {
                        index,
                        masked: key.masked(),
                        reason: e.to_string(),
                    };
                    self.dispatcher
                        .notifier()
                        .notify(Event::InvalidKey(invalid.clone()));
                    report.invalid_keys.push(invalid);
                }
            }
        }
        wallets
    }

    fn finish(&self, mut report: RunReport) -> RunReport {
        report.finish();
        self.dispatcher
            .notifier()
            .notify(Event::RunCompleted(RunCompletedEvent {
                run_id: report.run_id,
                wallets: report.summaries.len(),
                invalid_keys: report.invalid_keys.len(),
                successes: report.total_successes(),
                attempted: report.total_attempted(),
            }));
        report
    }
}
