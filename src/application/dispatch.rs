//! Per-wallet transfer dispatch loop.
//!
//! One [`Dispatcher::run_wallet`] call owns a wallet for its whole lifetime
//! and runs its attempts strictly one after another:
//!
//! ```text
//! Init ─► Checking ─► Estimating ─► Submitting ─► Confirming ─► Succeeded
//!              ▲                        │   │            │
//!              │                        │   └► Retrying ─┤ (underpriced, once)
//!              └────────────────────────┴────────────────┴► Failed / Halted
//! ```
//!
//! The nonce only moves forward after a confirmed receipt, so there is never
//! more than one in-flight transaction per wallet.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tokio::sync::watch;
use tokio::time::{sleep, timeout};
use tracing::debug;

use super::builder::TransactionBuilder;
use super::policy::{ConfirmationFailurePolicy, DispatchPolicy};
use crate::domain::{
    AttemptRecord, TransferOutcome, TransferRequest, Wallet, WalletRunSummary, WalletStatus,
};
use crate::error::DispatchError;
use crate::port::{
    AmountSource, AttemptEvent, ChainClient, Event, NonceGapEvent, Notifier, RecipientSource,
    ReplacementEvent, WalletCompletedEvent, WalletHaltedEvent, WalletSkippedEvent,
    WalletStartedEvent,
};

/// Runs the dispatch loop for individual wallets.
///
/// Cheap to clone; every collaborator is shared behind an `Arc` so one
/// dispatcher can serve several wallet workers.
#[derive(Clone)]
pub struct Dispatcher {
    chain: Arc<dyn ChainClient>,
    recipients: Arc<dyn RecipientSource>,
    amounts: Arc<dyn AmountSource>,
    notifier: Arc<dyn Notifier>,
    builder: TransactionBuilder,
    policy: DispatchPolicy,
}

/// Fields of an attempt filled in as it progresses.
struct Draft {
    nonce: u64,
    recipient: Option<Address>,
    value: U256,
    gas_price: u128,
    gas_limit: Option<u64>,
}

impl Draft {
    fn new(nonce: u64) -> Self {
        Self {
            nonce,
            recipient: None,
            value: U256::ZERO,
            gas_price: 0,
            gas_limit: None,
        }
    }

    fn finish(self, outcome: TransferOutcome) -> AttemptRecord {
        AttemptRecord {
            nonce: self.nonce,
            recipient: self.recipient,
            value: self.value,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            outcome,
        }
    }
}

impl Dispatcher {
    pub fn new(
        chain: Arc<dyn ChainClient>,
        recipients: Arc<dyn RecipientSource>,
        amounts: Arc<dyn AmountSource>,
        notifier: Arc<dyn Notifier>,
        chain_id: u64,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            chain,
            recipients,
            amounts,
            notifier,
            builder: TransactionBuilder::new(chain_id),
            policy,
        }
    }

    #[must_use]
    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Run up to `count` transfers from `wallet`.
    ///
    /// Never returns an error: every terminal condition is reported on the
    /// returned summary's status. `cancel` is checked only between attempts,
    /// so an in-flight transfer always finishes confirming first.
    pub async fn run_wallet(
        &self,
        mut wallet: Wallet,
        count: u32,
        cancel: &watch::Receiver<bool>,
    ) -> WalletRunSummary {
        let address = wallet.address();

        if let Err(reason) = self.refresh(&mut wallet).await {
            let mut summary = WalletRunSummary::new(address, wallet.nonce, wallet.balance);
            self.halt(&mut summary, reason);
            return self.complete(summary, &wallet);
        }

        self.notifier
            .notify(Event::WalletStarted(WalletStartedEvent {
                address,
                balance: wallet.balance,
                nonce: wallet.nonce,
            }));

        let mut summary = WalletRunSummary::new(address, wallet.nonce, wallet.balance);

        if wallet.balance.is_zero() {
            summary.status = WalletStatus::SkippedZeroBalance;
            self.notifier
                .notify(Event::WalletSkipped(WalletSkippedEvent {
                    address,
                    reason: "zero balance".into(),
                }));
            return self.complete(summary, &wallet);
        }

        for index in 0..count {
            if *cancel.borrow() {
                summary.status = WalletStatus::Cancelled;
                break;
            }
            if index > 0 && !self.policy.attempt_delay.is_zero() {
                sleep(self.policy.attempt_delay).await;
            }

            let record = self.attempt(&mut wallet).await;
            self.notifier.notify(Event::Attempt(AttemptEvent {
                address,
                index,
                record: record.clone(),
            }));

            let mut halt = record
                .outcome
                .error()
                .filter(|e| e.is_wallet_fatal())
                .cloned();

            if let TransferOutcome::Failed(DispatchError::ConfirmationFailure { tx_hash }) =
                &record.outcome
            {
                summary.unresolved_nonces.push(record.nonce);
                self.notifier.notify(Event::NonceGap(NonceGapEvent {
                    address,
                    nonce: record.nonce,
                    tx_hash: *tx_hash,
                }));
                if self.policy.on_confirmation_failure == ConfirmationFailurePolicy::Resync {
                    match self.chain.pending_nonce(address).await {
                        Ok(nonce) => {
                            debug!(address = %address, from = wallet.nonce, to = nonce, "Nonce resynced");
                            wallet.nonce = nonce;
                        }
                        Err(e) => halt = Some(e),
                    }
                }
            }

            summary.record(record);

            if let Some(reason) = halt {
                self.halt(&mut summary, reason);
                break;
            }
        }

        self.complete(summary, &wallet)
    }

    /// Init: load balance and pending nonce from the chain.
    async fn refresh(&self, wallet: &mut Wallet) -> Result<(), DispatchError> {
        let address = wallet.address();
        wallet.balance = self.chain.balance(address).await?;
        wallet.nonce = self.chain.pending_nonce(address).await?;
        Ok(())
    }

    async fn attempt(&self, wallet: &mut Wallet) -> AttemptRecord {
        let mut draft = Draft::new(wallet.nonce);
        let outcome = self.drive(wallet, &mut draft).await;
        draft.finish(outcome)
    }

    async fn drive(&self, wallet: &mut Wallet, draft: &mut Draft) -> TransferOutcome {
        // Checking
        let recipient = match self.recipients.next_recipient() {
            Ok(recipient) => recipient,
            Err(e) => return TransferOutcome::Skipped(e),
        };
        draft.recipient = Some(recipient);
        draft.value = U256::from(self.amounts.next_amount(self.policy.amounts));

        let network_price = match self.chain.gas_price().await {
            Ok(price) => price,
            Err(e) => return TransferOutcome::Failed(e),
        };
        draft.gas_price = network_price.saturating_add(self.policy.priority_fee);

        let request = match self.builder.build(
            wallet,
            recipient,
            draft.value,
            draft.gas_price,
            wallet.nonce,
        ) {
            Ok(request) => request,
            Err(e) => return TransferOutcome::Skipped(e),
        };

        // Estimating
        let gas_limit = match self.chain.estimate_gas(&request).await {
            Ok(gas) => gas,
            Err(e) => return TransferOutcome::Failed(e),
        };
        draft.gas_limit = Some(gas_limit);
        let request = request.with_gas_limit(gas_limit);
        if let Err(e) = ensure_affordable(wallet, &request) {
            return TransferOutcome::Skipped(e);
        }

        // Submitting
        let (request, tx_hash) = match self.chain.sign_and_send(&request, wallet.key()).await {
            Ok(hash) => (request, hash),
            Err(DispatchError::UnderpricedReplacement(reason)) => {
                let bumped = request
                    .with_gas_price(request.gas_price.saturating_add(self.policy.replacement_bump));
                debug!(
                    address = %wallet.address(),
                    nonce = request.nonce,
                    %reason,
                    "Underpriced replacement"
                );
                if let Err(e) = ensure_affordable(wallet, &bumped) {
                    return TransferOutcome::Skipped(e);
                }
                self.notifier
                    .notify(Event::ReplacementRetry(ReplacementEvent {
                        address: wallet.address(),
                        nonce: request.nonce,
                        previous_gas_price: request.gas_price,
                        gas_price: bumped.gas_price,
                    }));
                draft.gas_price = bumped.gas_price;
                match self.chain.sign_and_send(&bumped, wallet.key()).await {
                    Ok(hash) => (bumped, hash),
                    Err(e) => return TransferOutcome::Failed(e),
                }
            }
            Err(e) => return TransferOutcome::Failed(e),
        };

        // Confirming
        let waited = self.policy.receipt_timeout;
        match timeout(waited, self.chain.wait_for_receipt(tx_hash)).await {
            Err(_) => TransferOutcome::Failed(DispatchError::Timeout { tx_hash, waited }),
            Ok(Err(e)) => TransferOutcome::Failed(e),
            Ok(Ok(receipt)) if receipt.success => {
                wallet.apply_confirmed(request.total_cost().unwrap_or(request.value));
                TransferOutcome::Confirmed(tx_hash)
            }
            Ok(Ok(receipt)) => {
                // A reverted transaction still pays for the gas it used.
                wallet.apply_fee(
                    U256::from(receipt.gas_used).saturating_mul(U256::from(request.gas_price)),
                );
                TransferOutcome::Failed(DispatchError::ConfirmationFailure {
                    tx_hash: receipt.tx_hash,
                })
            }
        }
    }

    fn halt(&self, summary: &mut WalletRunSummary, reason: DispatchError) {
        self.notifier.notify(Event::WalletHalted(WalletHaltedEvent {
            address: summary.address,
            reason: reason.clone(),
            success_count: summary.success_count,
        }));
        summary.status = WalletStatus::Halted(reason);
    }

    fn complete(&self, mut summary: WalletRunSummary, wallet: &Wallet) -> WalletRunSummary {
        summary.next_nonce = wallet.nonce;
        summary.remaining_balance = wallet.balance;
        self.notifier
            .notify(Event::WalletCompleted(WalletCompletedEvent {
                address: summary.address,
                success_count: summary.success_count,
                total_attempted: summary.total_attempted,
                status: summary.status.clone(),
            }));
        summary
    }
}

/// Refuse any request whose total cost exceeds the last known balance.
fn ensure_affordable(wallet: &Wallet, request: &TransferRequest) -> Result<(), DispatchError> {
    let required = request.total_cost().unwrap_or(U256::MAX);
    if wallet.can_afford(required) {
        Ok(())
    } else {
        Err(DispatchError::InsufficientBalance {
            required,
            available: wallet.balance,
        })
    }
}
