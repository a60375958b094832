//! Append-only presence ledger.
//!
//! The ledger is the source of truth for a client's last known state and
//! the history panel. Events for any one client strictly alternate between
//! entry and exit; the append guard rejects a same-kind repeat before
//! anything is stored.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use portico_core::entities::PresenceEvent;
use portico_core::enums::PresenceKind;
use portico_core::ids::NationalId;

use crate::error::PresenceError;

// ---------------------------------------------------------------------------
// PresenceLedger
// ---------------------------------------------------------------------------

/// Storage seam for presence events.
///
/// [`MemoryLedger`] is the session-scoped implementation; a persistent
/// ledger can be swapped in without touching the presence controller.
pub trait PresenceLedger: Send + Sync {
    /// Append an event for `client_id`.
    ///
    /// # Errors
    ///
    /// Returns [`PresenceError::InvalidTransition`] when `kind` equals the
    /// kind of the client's most recent event (alternation invariant); in
    /// that case nothing is stored.
    fn append(
        &self,
        client_id: &NationalId,
        kind: PresenceKind,
        at: DateTime<Utc>,
    ) -> Result<PresenceEvent, PresenceError>;

    /// The kind of the client's latest event, or `None` if the client has
    /// never transitioned this session.
    fn current_kind(&self, client_id: &NationalId) -> Option<PresenceKind>;

    /// The client's events, most recent first.
    fn history(&self, client_id: &NationalId) -> History;

    /// Every event this session, in append order.
    fn all_events(&self) -> Vec<PresenceEvent>;
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Reverse-chronological, restartable view of one client's events.
///
/// Owns a point-in-time snapshot; [`iter`](Self::iter) restarts from the
/// most recent event each time it is called, and the sequence is bounded by
/// the events recorded this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    events: Vec<PresenceEvent>,
}

impl History {
    /// Step through the events, most recent first.
    pub fn iter(&self) -> std::slice::Iter<'_, PresenceEvent> {
        self.events.iter()
    }

    /// The most recent event, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&PresenceEvent> {
        self.events.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl IntoIterator for History {
    type Item = PresenceEvent;
    type IntoIter = std::vec::IntoIter<PresenceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a PresenceEvent;
    type IntoIter = std::slice::Iter<'a, PresenceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// MemoryLedger
// ---------------------------------------------------------------------------

/// In-memory ledger: events in append order plus a per-client index.
///
/// Events are never mutated or removed, so index positions stay stable for
/// the whole session.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<PresenceEvent>,
    by_client: HashMap<NationalId, Vec<usize>>,
}

impl MemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events recorded this session.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().events.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Critical sections below are panic-free, so a poisoned lock still
        // guards a consistent Vec + index pair.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PresenceLedger for MemoryLedger {
    fn append(
        &self,
        client_id: &NationalId,
        kind: PresenceKind,
        at: DateTime<Utc>,
    ) -> Result<PresenceEvent, PresenceError> {
        let mut inner = self.lock();

        let last_kind = inner
            .by_client
            .get(client_id)
            .and_then(|positions| positions.last())
            .map(|&position| inner.events[position].kind);
        if last_kind == Some(kind) {
            return Err(PresenceError::InvalidTransition {
                id: client_id.clone(),
                kind,
            });
        }

        let event = PresenceEvent {
            client_id: client_id.clone(),
            kind,
            occurred_at: at,
        };
        let position = inner.events.len();
        inner.events.push(event.clone());
        inner
            .by_client
            .entry(client_id.clone())
            .or_default()
            .push(position);
        tracing::info!(client = %client_id, kind = %kind, "presence event appended");
        Ok(event)
    }

    fn current_kind(&self, client_id: &NationalId) -> Option<PresenceKind> {
        let inner = self.lock();
        inner
            .by_client
            .get(client_id)
            .and_then(|positions| positions.last())
            .map(|&position| inner.events[position].kind)
    }

    fn history(&self, client_id: &NationalId) -> History {
        let inner = self.lock();
        let events = inner
            .by_client
            .get(client_id)
            .map(|positions| {
                positions
                    .iter()
                    .rev()
                    .map(|&position| inner.events[position].clone())
                    .collect()
            })
            .unwrap_or_default();
        History { events }
    }

    fn all_events(&self) -> Vec<PresenceEvent> {
        self.lock().events.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
