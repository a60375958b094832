//! Presence enums for Portico.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `PresenceState` carries the state machine; `allowed_next_states()` is the
//! single source of truth for valid transitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PresenceKind
// ---------------------------------------------------------------------------

/// Kind of a presence event recorded in the ledger.
///
/// For any one client, kinds strictly alternate: an `Entry` can only be
/// followed by an `Exit` and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PresenceKind {
    Entry,
    Exit,
}

impl PresenceKind {
    /// The kind a toggle resolves to after this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Entry => Self::Exit,
            Self::Exit => Self::Entry,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for PresenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PresenceState
// ---------------------------------------------------------------------------

/// Presence state of a client as seen by the verification panel.
///
/// ```text
/// outside → pending → inside
/// inside  → pending → outside
/// ```
///
/// `Pending` is transient: it is held only while a toggle is in flight and
/// reverts to the prior state if the toggle is abandoned. A newly registered
/// client starts `Outside`; there is no terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PresenceState {
    Outside,
    Inside,
    Pending,
}

impl PresenceState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Outside | Self::Inside => &[Self::Pending],
            Self::Pending => &[Self::Inside, Self::Outside],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// The settled state implied by the latest ledger kind.
    ///
    /// `None` (no events yet) means the client never entered, i.e. `Outside`.
    #[must_use]
    pub const fn from_kind(kind: Option<PresenceKind>) -> Self {
        match kind {
            Some(PresenceKind::Entry) => Self::Inside,
            Some(PresenceKind::Exit) | None => Self::Outside,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outside => "outside",
            Self::Inside => "inside",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
