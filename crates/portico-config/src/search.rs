//! Staff search configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Default length of the quick-access recent-entries list.
const fn default_recent_entries() -> u32 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Default result limit for the staff search panel.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// How many recent entrants the panel's quick-access list shows.
    #[serde(default = "default_recent_entries")]
    pub recent_entries: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            recent_entries: default_recent_entries(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.recent_entries, 3);
    }
}
