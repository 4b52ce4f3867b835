//! Notifier port for dispatch events.
//!
//! The dispatch loop reports what it does through an injected [`Notifier`]
//! instead of writing to a global logger. Events are observational only and
//! never feed back into control flow.

use alloy_primitives::{Address, TxHash, U256};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::units::{wei_to_ether, wei_to_gwei};
use crate::domain::{AttemptRecord, InvalidKey, TransferOutcome, WalletStatus};
use crate::error::DispatchError;

/// Events emitted while dispersing transfers.
#[derive(Debug, Clone)]
pub enum Event {
    /// Node connectivity verified.
    Connected(ConnectedEvent),
    /// A wallet's loop fetched its starting state.
    WalletStarted(WalletStartedEvent),
    /// A wallet was skipped before any attempt.
    WalletSkipped(WalletSkippedEvent),
    /// A configured key could not be parsed.
    InvalidKey(InvalidKey),
    /// One attempt finished.
    Attempt(AttemptEvent),
    /// A broadcast was rejected as underpriced and is being resent.
    ReplacementRetry(ReplacementEvent),
    /// A transaction mined with a failed status; its nonce was not advanced.
    NonceGap(NonceGapEvent),
    /// A wallet's remaining attempts were abandoned.
    WalletHalted(WalletHaltedEvent),
    /// A wallet's loop exited.
    WalletCompleted(WalletCompletedEvent),
    /// Every wallet has been processed.
    RunCompleted(RunCompletedEvent),
}

#[derive(Debug, Clone)]
pub struct ConnectedEvent {
    pub endpoint: String,
    pub chain_id: u64,
}

#[derive(Debug, Clone)]
pub struct WalletStartedEvent {
    pub address: Address,
    pub balance: U256,
    pub nonce: u64,
}

#[derive(Debug, Clone)]
pub struct WalletSkippedEvent {
    pub address: Address,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct AttemptEvent {
    pub address: Address,
    /// Zero-based attempt index within the wallet's loop.
    pub index: u32,
    pub record: AttemptRecord,
}

#[derive(Debug, Clone)]
pub struct ReplacementEvent {
    pub address: Address,
    pub nonce: u64,
    pub previous_gas_price: u128,
    pub gas_price: u128,
}

#[derive(Debug, Clone)]
pub struct NonceGapEvent {
    pub address: Address,
    pub nonce: u64,
    pub tx_hash: TxHash,
}

#[derive(Debug, Clone)]
pub struct WalletHaltedEvent {
    pub address: Address,
    pub reason: DispatchError,
    pub success_count: u32,
}

#[derive(Debug, Clone)]
pub struct WalletCompletedEvent {
    pub address: Address,
    pub success_count: u32,
    pub total_attempted: u32,
    pub status: WalletStatus,
}

#[derive(Debug, Clone)]
pub struct RunCompletedEvent {
    pub run_id: Uuid,
    pub wallets: usize,
    pub invalid_keys: usize,
    pub successes: u32,
    pub attempted: u32,
}

/// Trait for event sinks.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - `notify` should return quickly; wallet workers call it inline
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        self.notify_all(event);
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::Connected(e) => {
                info!(endpoint = %e.endpoint, chain_id = e.chain_id, "Connected to node");
            }
            Event::WalletStarted(e) => {
                info!(
                    address = %e.address,
                    balance_eth = %wei_to_ether(e.balance),
                    nonce = e.nonce,
                    "Wallet loaded"
                );
            }
            Event::WalletSkipped(e) => {
                warn!(address = %e.address, reason = %e.reason, "Wallet skipped");
            }
            Event::InvalidKey(e) => {
                error!(index = e.index, key = %e.masked, reason = %e.reason, "Invalid private key");
            }
            Event::Attempt(e) => {
                let record = &e.record;
                match &record.outcome {
                    TransferOutcome::Confirmed(hash) => info!(
                        address = %e.address,
                        attempt = e.index,
                        nonce = record.nonce,
                        gas_price_gwei = %wei_to_gwei(record.gas_price),
                        tx_hash = %hash,
                        "Transfer confirmed"
                    ),
                    TransferOutcome::Failed(reason) => error!(
                        address = %e.address,
                        attempt = e.index,
                        nonce = record.nonce,
                        reason = %reason,
                        "Transfer failed"
                    ),
                    TransferOutcome::Skipped(reason) => warn!(
                        address = %e.address,
                        attempt = e.index,
                        nonce = record.nonce,
                        reason = %reason,
                        "Transfer skipped"
                    ),
                }
            }
            Event::ReplacementRetry(e) => {
                warn!(
                    address = %e.address,
                    nonce = e.nonce,
                    from_gwei = %wei_to_gwei(e.previous_gas_price),
                    to_gwei = %wei_to_gwei(e.gas_price),
                    "Replacement underpriced, retrying with bumped gas price"
                );
            }
            Event::NonceGap(e) => {
                warn!(
                    address = %e.address,
                    nonce = e.nonce,
                    tx_hash = %e.tx_hash,
                    "Transaction failed on chain; nonce left unresolved"
                );
            }
            Event::WalletHalted(e) => {
                error!(
                    address = %e.address,
                    reason = %e.reason,
                    successes = e.success_count,
                    "Wallet halted"
                );
            }
            Event::WalletCompleted(e) => {
                info!(
                    address = %e.address,
                    successes = e.success_count,
                    attempted = e.total_attempted,
                    status = %e.status,
                    "Completed transfers from wallet"
                );
            }
            Event::RunCompleted(e) => {
                info!(
                    run_id = %e.run_id,
                    wallets = e.wallets,
                    invalid_keys = e.invalid_keys,
                    successes = e.successes,
                    attempted = e.attempted,
                    "Run completed"
                );
            }
        }
    }
}
