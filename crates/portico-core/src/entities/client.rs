use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ids::{NationalId, Phone};

/// A registered client.
///
/// `id` is unique and immutable once created. `currently_inside` caches the
/// kind of the most recent presence event for this client; the presence
/// controller is its only writer. `last_visit` is `None` until the first
/// resolved entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Client {
    pub id: NationalId,
    pub name: String,
    pub email: String,
    pub phone: Phone,
    pub birth_date: NaiveDate,
    pub currently_inside: bool,
    pub last_visit: Option<NaiveDate>,
}
