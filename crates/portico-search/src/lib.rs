//! # portico-search
//!
//! Free-text client search for the staff panel.
//!
//! Derives a queryable view over the client directory: a case-insensitive
//! substring match tested independently against the normalized identifier,
//! name, email, normalized phone, and the birth-date literal. A record
//! matches when any field contains the query. Results keep the directory's
//! insertion order — no ranking, no scoring.
//!
//! The view re-derives from the directory on every call, so a search never
//! serves stale records across registrations or presence updates.

use std::sync::Arc;

use portico_core::entities::Client;
use portico_core::ids::normalize_digits;
use portico_directory::ClientDirectory;

// ── SearchIndex ────────────────────────────────────────────────────

/// Free-text search over a client directory.
pub struct SearchIndex<D> {
    directory: Arc<D>,
}

impl<D: ClientDirectory> SearchIndex<D> {
    #[must_use]
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// All records matching `query`, in directory insertion order.
    ///
    /// The empty query matches every record. The identifier and phone
    /// comparisons normalize the query internally, so masked input
    /// (`123.456.`) hits the same records as unmasked (`123456`).
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Client> {
        let needle = Needle::from_query(query);
        self.directory
            .snapshot()
            .into_iter()
            .filter(|client| needle.matches(client))
            .collect()
    }

    /// [`search`](Self::search) capped at `limit` results (the panel's page
    /// size).
    #[must_use]
    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<Client> {
        let mut results = self.search(query);
        results.truncate(limit);
        results
    }
}

// ── Needle ─────────────────────────────────────────────────────────

/// A query normalized once per search call.
struct Needle {
    lowered: String,
    digits: String,
}

impl Needle {
    fn from_query(query: &str) -> Self {
        Self {
            lowered: query.to_lowercase(),
            digits: normalize_digits(query),
        }
    }

    fn matches(&self, client: &Client) -> bool {
        if self.lowered.is_empty() {
            return true;
        }
        if client.name.to_lowercase().contains(&self.lowered)
            || client.email.to_lowercase().contains(&self.lowered)
            || client.birth_date.to_string().contains(&self.lowered)
        {
            return true;
        }
        // Identifier and phone compare digits-to-digits; an all-mask query
        // ("---") normalizes to nothing and cannot match through them.
        !self.digits.is_empty()
            && (client.id.as_str().contains(&self.digits)
                || client.phone.as_str().contains(&self.digits))
    }
}

// ── Tests ──────────────────────────────────────────────────────────
