//! Venue identity configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VenueConfig {
    /// Display name of the venue.
    #[serde(default)]
    pub name: String,

    /// Licensed capacity, if the venue tracks one.
    #[serde(default)]
    pub capacity: Option<u32>,
}

impl VenueConfig {
    /// Whether a venue identity has been configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_unconfigured() {
        let config = VenueConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.capacity, None);
    }

    #[test]
    fn named_venue_is_configured() {
        let config = VenueConfig {
            name: "Portico".into(),
            capacity: Some(250),
        };
        assert!(config.is_configured());
    }
}
