//! Cross-cutting error types for Portico.
//!
//! Domain-specific errors (e.g., `DirectoryError`, `PresenceError`) are
//! defined in their respective crates. This module holds the failures raised
//! at the type layer, where raw input is normalized into core newtypes.

use thiserror::Error;

/// Errors raised while normalizing raw input into core types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Identifier did not normalize to exactly the well-formed digit count.
    #[error("Invalid identifier: expected {} digits, got {digits}", crate::ids::IDENTIFIER_DIGITS)]
    InvalidIdentifier { digits: usize },

    /// Phone did not normalize to the minimum digit count.
    #[error("Invalid phone: expected at least {} digits, got {digits}", crate::ids::PHONE_MIN_DIGITS)]
    InvalidPhone { digits: usize },
}
