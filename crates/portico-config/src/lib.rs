//! # portico-config
//!
//! Layered configuration loading for Portico using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`PORTICO_*` prefix, `__` as separator)
//! 2. Project-level `.portico/config.toml`
//! 3. User-level `~/.config/portico/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `PORTICO_PRESENCE__TOGGLE_LATENCY_MS` -> `presence.toggle_latency_ms`,
//! `PORTICO_VENUE__NAME` -> `venue.name`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use portico_config::PorticoConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = PorticoConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = PorticoConfig::load().expect("config");
//!
//! if config.venue.is_configured() {
//!     println!("Venue: {}", config.venue.name);
//! }
//! ```

mod error;
mod presence;
mod search;
mod venue;

pub use error::ConfigError;
pub use presence::PresenceConfig;
pub use search::SearchConfig;
pub use venue::VenueConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PorticoConfig {
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub venue: VenueConfig,
}

impl PorticoConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`PORTICO_*` prefix)
    /// 2. `.portico/config.toml` (project-local)
    /// 3. `~/.config/portico/config.toml` (user-global)
    /// 4. Default values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a section carries an
    /// invalid value.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root
    /// before building the figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when extraction fails or a section carries an
    /// invalid value.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".portico/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("PORTICO_").split("__"));

        figment
    }

    /// Cross-field checks figment cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.search.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.venue.capacity == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "venue.capacity".into(),
                reason: "a configured capacity must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("portico").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is
    /// found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}
