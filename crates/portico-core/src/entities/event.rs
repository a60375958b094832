use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PresenceKind;
use crate::ids::NationalId;

/// An entry or exit recorded against a client's ledger.
///
/// Immutable once appended. Ordered by `occurred_at`, with append order
/// breaking ties.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PresenceEvent {
    pub client_id: NationalId,
    pub kind: PresenceKind,
    pub occurred_at: DateTime<Utc>,
}
