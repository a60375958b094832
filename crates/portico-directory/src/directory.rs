//! Client directory: storage seam and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;

use portico_core::entities::Client;
use portico_core::ids::NationalId;

use crate::error::DirectoryError;

/// Storage seam for client records.
///
/// [`MemoryDirectory`] is the session-scoped implementation; a persistent
/// store can be swapped in without touching the presence controller or the
/// search index.
pub trait ClientDirectory: Send + Sync {
    /// Insert a newly registered client.
    ///
    /// The stored record always starts with `currently_inside = false`
    /// whatever the candidate carried — a registration cannot place someone
    /// inside the venue.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::DuplicateIdentifier`] if a record with the
    /// same identifier already exists.
    fn create(&self, record: Client) -> Result<Client, DirectoryError>;

    /// Exact lookup by normalized identifier.
    ///
    /// The identifier must already be normalized by the caller; this
    /// component does not strip masks.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] if the identifier is absent.
    fn find_by_id(&self, id: &NationalId) -> Result<Client, DirectoryError>;

    /// Update the cached presence flag.
    ///
    /// Invoked only by the presence controller; the flag is always
    /// derivable from the ledger's latest event for this client.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] if the identifier is absent.
    fn set_inside_flag(&self, id: &NationalId, inside: bool) -> Result<(), DirectoryError>;

    /// Stamp the last-visit date. Invoked by the presence controller when an
    /// entry resolves.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::NotFound`] if the identifier is absent.
    fn record_visit(&self, id: &NationalId, on: NaiveDate) -> Result<(), DirectoryError>;

    /// Point-in-time copy of every record, in insertion order.
    fn snapshot(&self) -> Vec<Client>;
}

/// Insertion-ordered in-memory directory.
///
/// Records live in a `Vec` (the canonical iteration order) with a side index
/// from identifier to position. Entries are never removed during a session,
/// so positions stay stable.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    records: Vec<Client>,
    by_id: HashMap<NationalId, usize>,
}

impl MemoryDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Critical sections below are panic-free, so a poisoned lock still
        // guards a consistent Vec + index pair.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClientDirectory for MemoryDirectory {
    fn create(&self, record: Client) -> Result<Client, DirectoryError> {
        let mut inner = self.lock();
        if inner.by_id.contains_key(&record.id) {
            return Err(DirectoryError::DuplicateIdentifier {
                id: record.id.clone(),
            });
        }

        let record = Client {
            currently_inside: false,
            ..record
        };
        let position = inner.records.len();
        inner.by_id.insert(record.id.clone(), position);
        inner.records.push(record.clone());
        tracing::info!(client = %record.id, "client registered");
        Ok(record)
    }

    fn find_by_id(&self, id: &NationalId) -> Result<Client, DirectoryError> {
        let inner = self.lock();
        inner
            .by_id
            .get(id)
            .map(|&position| inner.records[position].clone())
            .ok_or_else(|| DirectoryError::NotFound { id: id.clone() })
    }

    fn set_inside_flag(&self, id: &NationalId, inside: bool) -> Result<(), DirectoryError> {
        let mut inner = self.lock();
        let position = *inner
            .by_id
            .get(id)
            .ok_or_else(|| DirectoryError::NotFound { id: id.clone() })?;
        inner.records[position].currently_inside = inside;
        tracing::info!(client = %id, inside, "presence cache updated");
        Ok(())
    }

    fn record_visit(&self, id: &NationalId, on: NaiveDate) -> Result<(), DirectoryError> {
        let mut inner = self.lock();
        let position = *inner
            .by_id
            .get(id)
            .ok_or_else(|| DirectoryError::NotFound { id: id.clone() })?;
        inner.records[position].last_visit = Some(on);
        Ok(())
    }

    fn snapshot(&self) -> Vec<Client> {
        self.lock().records.clone()
    }
}
