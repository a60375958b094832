//! Identifier and phone normalization.
//!
//! The national identifier is stored digits-only; exactly 11 digits is
//! well-formed and any other digit count is rejected at the boundary, never
//! stored. Contact phones normalize the same way with a 10-digit minimum.
//! Display masking (dots, dashes, parentheses) belongs to the UI collaborators
//! and never reaches these types.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Digit count of a well-formed national identifier.
pub const IDENTIFIER_DIGITS: usize = 11;

/// Minimum digit count of a contact phone.
pub const PHONE_MIN_DIGITS: usize = 10;

/// Strip every non-digit character from `raw`.
#[must_use]
pub fn normalize_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

// ---------------------------------------------------------------------------
// NationalId
// ---------------------------------------------------------------------------

/// A client's national identifier, normalized to exactly 11 digits.
///
/// Unique and immutable once a client is created. Serialized as the bare
/// digit string; deserialization expects already-normalized input (records
/// only ever round-trip through this crate's types).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct NationalId(String);

impl NationalId {
    /// Parse from free-form input, masked (`123.456.789-00`) or unmasked.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidIdentifier`] unless the input contains
    /// exactly [`IDENTIFIER_DIGITS`] digits once non-digits are stripped.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let digits = normalize_digits(raw);
        if digits.len() == IDENTIFIER_DIGITS {
            Ok(Self(digits))
        } else {
            Err(CoreError::InvalidIdentifier {
                digits: digits.len(),
            })
        }
    }

    /// The normalized digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NationalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NationalId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

/// A contact phone, normalized to digits-only with at least 10 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse from free-form input, masked (`(11) 98765-4321`) or unmasked.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPhone`] unless the input contains at
    /// least [`PHONE_MIN_DIGITS`] digits once non-digits are stripped.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let digits = normalize_digits(raw);
        if digits.len() >= PHONE_MIN_DIGITS {
            Ok(Self(digits))
        } else {
            Err(CoreError::InvalidPhone {
                digits: digits.len(),
            })
        }
    }

    /// The normalized digit string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Phone {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
