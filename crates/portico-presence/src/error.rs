//! Presence error types.

use portico_core::enums::PresenceKind;
use portico_core::ids::NationalId;
use thiserror::Error;

use portico_directory::DirectoryError;

/// Errors from presence operations.
///
/// `IneligibleMinor` is the one failure with an operator-facing message: it
/// is a business rule, not a transient condition, and must never be
/// silently retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenceError {
    /// The age gate failed — entry is forbidden for minors.
    #[error(
        "Entry denied: client {id} is {age}, under the minimum age of {}",
        portico_core::age::MINIMUM_AGE
    )]
    IneligibleMinor { id: NationalId, age: i32 },

    /// A toggle is already in flight for this client — please wait.
    #[error("Toggle already in progress for client {id} — please wait")]
    ToggleInProgress { id: NationalId },

    /// The ledger alternation invariant was violated. The controller never
    /// triggers this; it indicates a caller writing to the ledger directly.
    #[error("Invalid transition for client {id}: consecutive '{kind}' events")]
    InvalidTransition { id: NationalId, kind: PresenceKind },

    /// A directory update failed while resolving a toggle.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
