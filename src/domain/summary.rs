//! Per-wallet and per-run result aggregation.

use std::fmt;

use alloy_primitives::{Address, U256};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::transfer::AttemptRecord;
use crate::error::DispatchError;

/// How a wallet's dispatch loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletStatus {
    /// Every requested attempt ran.
    Completed,
    /// Nothing was attempted because the wallet holds no funds.
    SkippedZeroBalance,
    /// Remaining attempts were abandoned.
    Halted(DispatchError),
    /// Stopped between attempts by an external cancellation.
    Cancelled,
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::SkippedZeroBalance => write!(f, "skipped (zero balance)"),
            Self::Halted(reason) => write!(f, "halted: {reason}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Result of running the dispatch loop for one wallet.
#[derive(Debug, Clone)]
pub struct WalletRunSummary {
    pub address: Address,
    pub success_count: u32,
    pub total_attempted: u32,
    pub status: WalletStatus,
    /// Nonce the wallet would use next.
    pub next_nonce: u64,
    /// Locally tracked balance at loop exit, in wei.
    pub remaining_balance: U256,
    pub attempts: Vec<AttemptRecord>,
    /// Nonces whose transaction mined with a failed status and were not
    /// advanced past. The caller decides whether to resync them from chain.
    pub unresolved_nonces: Vec<u64>,
}

impl WalletRunSummary {
    /// Start an empty summary for a wallet.
    #[must_use]
    pub fn new(address: Address, nonce: u64, balance: U256) -> Self {
        Self {
            address,
            success_count: 0,
            total_attempted: 0,
            status: WalletStatus::Completed,
            next_nonce: nonce,
            remaining_balance: balance,
            attempts: Vec::new(),
            unresolved_nonces: Vec::new(),
        }
    }

    /// Append an attempt and update the counters.
    pub fn record(&mut self, attempt: AttemptRecord) {
        if attempt.outcome.is_confirmed() {
            self.success_count += 1;
        }
        self.total_attempted += 1;
        self.attempts.push(attempt);
    }

    #[must_use]
    pub fn is_halted(&self) -> bool {
        matches!(self.status, WalletStatus::Halted(_))
    }
}

/// A key that could not be turned into a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKey {
    /// Position in the configured key list.
    pub index: usize,
    /// Masked key for display.
    pub masked: String,
    pub reason: String,
}

/// Aggregate result of one run across all configured keys.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Summaries in key-list order; invalid keys have no entry.
    pub summaries: Vec<WalletRunSummary>,
    pub invalid_keys: Vec<InvalidKey>,
}

impl RunReport {
    #[must_use]
    pub fn start() -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            summaries: Vec::new(),
            invalid_keys: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Utc::now();
    }

    #[must_use]
    pub fn total_successes(&self) -> u32 {
        self.summaries.iter().map(|s| s.success_count).sum()
    }

    #[must_use]
    pub fn total_attempted(&self) -> u32 {
        self.summaries.iter().map(|s| s.total_attempted).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transfer::TransferOutcome;
    use alloy_primitives::TxHash;

    fn attempt(nonce: u64, outcome: TransferOutcome) -> AttemptRecord {
        AttemptRecord {
            nonce,
            recipient: None,
            value: U256::from(1u64),
            gas_price: 1,
            gas_limit: Some(21_000),
            outcome,
        }
    }

    #[test]
    fn record_counts_only_confirmed_as_success() {
        let mut summary = WalletRunSummary::new(Address::ZERO, 0, U256::ZERO);
        summary.record(attempt(0, TransferOutcome::Confirmed(TxHash::ZERO)));
        summary.record(attempt(
            1,
            TransferOutcome::Failed(DispatchError::Estimation("x".into())),
        ));

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.total_attempted, 2);
        assert_eq!(summary.attempts.len(), 2);
    }

    #[test]
    fn report_totals_sum_wallets() {
        let mut report = RunReport::start();
        for successes in [2, 3] {
            let mut s = WalletRunSummary::new(Address::ZERO, 0, U256::ZERO);
            for n in 0..successes {
                s.record(attempt(n, TransferOutcome::Confirmed(TxHash::ZERO)));
            }
            report.summaries.push(s);
        }
        report.finish();

        assert_eq!(report.total_successes(), 5);
        assert_eq!(report.total_attempted(), 5);
        assert!(report.finished_at >= report.started_at);
    }

    #[test]
    fn status_display() {
        assert_eq!(WalletStatus::Completed.to_string(), "completed");
        let halted = WalletStatus::Halted(DispatchError::Submission("nonce too low".into()));
        assert!(halted.to_string().starts_with("halted:"));
    }
}
