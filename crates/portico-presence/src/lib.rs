//! # portico-presence
//!
//! The presence domain for Portico: the append-only presence ledger, the
//! toggle controller with its age gate and reentrancy guard, cooperative
//! cancellation, and the read-only reporting aggregates consumed by the
//! dashboard and export collaborators.

mod cancel;
mod controller;
mod error;
mod ledger;
pub mod report;

pub use cancel::CancelToken;
pub use controller::{PresenceController, ToggleOutcome};
pub use error::PresenceError;
pub use ledger::{History, MemoryLedger, PresenceLedger};
