//! Entity structs for the Portico domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` so the
//! read-only collaborators (dashboard, export) can consume them as plain
//! data.

mod client;
mod event;

pub use client::Client;
pub use event::PresenceEvent;
