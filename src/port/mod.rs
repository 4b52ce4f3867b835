//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  builder/dispatch/runner │
//!                 └────────────┬─────────────┘
//!          ┌──────────┬────────┴──────┬───────────────┐
//!          ▼          ▼               ▼               ▼
//!    ┌──────────┐ ┌─────────┐ ┌──────────────┐ ┌───────────┐
//!    │  Chain   │ │ Keyring │ │  Recipient / │ │ Notifier  │
//!    │  Client  │ │         │ │ AmountSource │ │           │
//!    └──────────┘ └─────────┘ └──────────────┘ └───────────┘
//! ```

pub mod outbound;

pub use outbound::chain::{ChainClient, ChainResult};
pub use outbound::keys::{AmountRange, AmountSource, Keyring, RecipientSource};
pub use outbound::notifier::{
    AttemptEvent, ConnectedEvent, Event, LogNotifier, NonceGapEvent, Notifier, NotifierRegistry,
    NullNotifier, ReplacementEvent, RunCompletedEvent, WalletCompletedEvent, WalletHaltedEvent,
    WalletSkippedEvent, WalletStartedEvent,
};
