//! # portico-directory
//!
//! Authoritative client records for Portico.
//!
//! Owns the set of registered clients keyed by normalized identifier:
//! exact lookup, the presence-cache updates driven by the presence
//! controller, and the registration boundary that turns raw form fields
//! into validated [`portico_core::entities::Client`] records.
//!
//! Records are never deleted during a session — only created (registration)
//! or updated (presence cache, visit stamp).

mod directory;
mod error;
mod registration;

pub use directory::{ClientDirectory, MemoryDirectory};
pub use error::DirectoryError;
pub use registration::{ClientCandidate, RegistrationError};
