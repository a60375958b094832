//! Directory error types.

use portico_core::ids::NationalId;
use thiserror::Error;

/// Errors from client directory operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// A record with the same identifier already exists.
    #[error("Duplicate identifier: {id} is already registered")]
    DuplicateIdentifier { id: NationalId },

    /// Lookup returned no record for the identifier.
    #[error("Client not found: {id}")]
    NotFound { id: NationalId },
}
