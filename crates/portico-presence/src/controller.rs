//! Presence controller: the outside ⇄ inside toggle.
//!
//! ```text
//! outside --toggle--> pending --resolve--> inside
//! inside  --toggle--> pending --resolve--> outside
//! ```
//!
//! A toggle passes the age gate, claims the client's in-flight slot, waits
//! out the door-device latency, then resolves: append the opposite kind to
//! the ledger, update the directory's presence cache, land in the settled
//! state. Abandonment during the latency window rolls everything back to a
//! no-op — no ledger write, no directory update, no lingering `Pending`.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use portico_core::age::{MINIMUM_AGE, age_in_years};
use portico_core::entities::Client;
use portico_core::enums::{PresenceKind, PresenceState};
use portico_core::ids::NationalId;
use portico_directory::ClientDirectory;

use crate::cancel::CancelToken;
use crate::error::PresenceError;
use crate::ledger::PresenceLedger;

// ---------------------------------------------------------------------------
// ToggleOutcome
// ---------------------------------------------------------------------------

/// How a toggle request settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The toggle resolved into a settled state.
    Completed(PresenceState),
    /// The caller abandoned the request before resolution; nothing was
    /// written and the prior state stands.
    Cancelled,
}

// ---------------------------------------------------------------------------
// PresenceController
// ---------------------------------------------------------------------------

/// Drives the presence state machine over an injected directory and ledger.
///
/// Supports concurrent in-flight toggles for different clients; at most one
/// per client at any time.
pub struct PresenceController<D, L> {
    directory: Arc<D>,
    ledger: Arc<L>,
    latency: Duration,
    in_flight: Mutex<HashSet<NationalId>>,
}

impl<D, L> PresenceController<D, L>
where
    D: ClientDirectory,
    L: PresenceLedger,
{
    #[must_use]
    pub fn new(directory: Arc<D>, ledger: Arc<L>, latency: Duration) -> Self {
        Self {
            directory,
            ledger,
            latency,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// The client's current state: `Pending` while a toggle is in flight,
    /// otherwise derived from the latest ledger event.
    #[must_use]
    pub fn state(&self, client_id: &NationalId) -> PresenceState {
        if self.in_flight_set().contains(client_id) {
            return PresenceState::Pending;
        }
        PresenceState::from_kind(self.ledger.current_kind(client_id))
    }

    /// Request an outside ⇄ inside toggle for `client` at `now`.
    ///
    /// Suspends only for the configured latency window; `cancel` abandons
    /// the request during that window. Dropping the returned future has the
    /// same rollback effect as cancelling.
    ///
    /// # Errors
    ///
    /// - [`PresenceError::IneligibleMinor`] when the age gate fails — no
    ///   state change, no ledger write, regardless of current state.
    /// - [`PresenceError::ToggleInProgress`] when a toggle for this client
    ///   is already in flight.
    /// - [`PresenceError::Directory`] if the directory rejects the cache
    ///   update (the client is unknown to it).
    pub async fn request_toggle(
        &self,
        client: &Client,
        now: DateTime<Utc>,
        cancel: &CancelToken,
    ) -> Result<ToggleOutcome, PresenceError> {
        let age = age_in_years(client.birth_date, now.date_naive());
        if age < MINIMUM_AGE {
            tracing::warn!(client = %client.id, age, "entry denied: under age");
            return Err(PresenceError::IneligibleMinor {
                id: client.id.clone(),
                age,
            });
        }

        let _guard = InFlightGuard::acquire(&self.in_flight, &client.id)?;

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::info!(client = %client.id, "toggle abandoned before resolution");
                return Ok(ToggleOutcome::Cancelled);
            }
            () = tokio::time::sleep(self.latency) => {}
        }

        let target = self
            .ledger
            .current_kind(&client.id)
            .map_or(PresenceKind::Entry, PresenceKind::opposite);
        self.ledger.append(&client.id, target, now)?;

        let inside = target == PresenceKind::Entry;
        self.directory.set_inside_flag(&client.id, inside)?;
        if inside {
            self.directory.record_visit(&client.id, now.date_naive())?;
        }

        let state = if inside {
            PresenceState::Inside
        } else {
            PresenceState::Outside
        };
        tracing::info!(client = %client.id, state = %state, "toggle resolved");
        Ok(ToggleOutcome::Completed(state))
    }

    fn in_flight_set(&self) -> std::sync::MutexGuard<'_, HashSet<NationalId>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// InFlightGuard
// ---------------------------------------------------------------------------

/// Holds a client's in-flight slot for the duration of one toggle.
///
/// Dropping the guard releases the slot on every exit path — resolution,
/// cancellation, error, or the caller dropping the toggle future mid-wait —
/// so `Pending` can never dangle.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<NationalId>>,
    id: NationalId,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(
        set: &'a Mutex<HashSet<NationalId>>,
        id: &NationalId,
    ) -> Result<Self, PresenceError> {
        let mut in_flight = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !in_flight.insert(id.clone()) {
            return Err(PresenceError::ToggleInProgress { id: id.clone() });
        }
        Ok(Self {
            set,
            id: id.clone(),
        })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
