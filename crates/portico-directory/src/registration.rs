//! Registration boundary: raw form fields validated into a `Client`.
//!
//! The verification flow downstream (controller, ledger) consumes only
//! already-valid `Client` values and performs no field validation of its
//! own — everything is checked here, once, at the boundary.

use chrono::NaiveDate;
use thiserror::Error;

use portico_core::entities::Client;
use portico_core::errors::CoreError;
use portico_core::ids::{NationalId, Phone};

/// Raw registration form fields, exactly as the form collaborator hands
/// them over — masked or unmasked, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientCandidate {
    pub name: String,
    pub identifier: String,
    pub email: String,
    pub phone: String,
    /// ISO `YYYY-MM-DD`, as produced by a date input.
    pub birth_date: String,
}

/// Field-tagged validation failures for a registration candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("Name is required")]
    EmptyName,

    #[error(transparent)]
    InvalidIdentifier(CoreError),

    #[error("Invalid email: missing '@'")]
    InvalidEmail,

    #[error(transparent)]
    InvalidPhone(CoreError),

    #[error("Birth date is required")]
    MissingBirthDate,

    #[error("Invalid birth date: expected YYYY-MM-DD, got '{raw}'")]
    InvalidBirthDate { raw: String },
}

impl ClientCandidate {
    /// Validate every field and produce a `Client` ready for
    /// [`crate::ClientDirectory::create`].
    ///
    /// Rules: non-empty trimmed name, identifier exactly 11 digits after
    /// normalization, email containing `@`, phone at least 10 digits after
    /// normalization, birth date present and parseable.
    ///
    /// # Errors
    ///
    /// Returns the first failing field's [`RegistrationError`], in form
    /// order.
    pub fn validate(&self) -> Result<Client, RegistrationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName);
        }

        let id = NationalId::parse(&self.identifier).map_err(RegistrationError::InvalidIdentifier)?;

        if !self.email.contains('@') {
            return Err(RegistrationError::InvalidEmail);
        }

        let phone = Phone::parse(&self.phone).map_err(RegistrationError::InvalidPhone)?;

        if self.birth_date.trim().is_empty() {
            return Err(RegistrationError::MissingBirthDate);
        }
        let birth_date = NaiveDate::parse_from_str(self.birth_date.trim(), "%Y-%m-%d").map_err(
            |_| RegistrationError::InvalidBirthDate {
                raw: self.birth_date.clone(),
            },
        )?;

        Ok(Client {
            id,
            name: name.to_string(),
            email: self.email.trim().to_string(),
            phone,
            birth_date,
            currently_inside: false,
            last_visit: None,
        })
    }
}
