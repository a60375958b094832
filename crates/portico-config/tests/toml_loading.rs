//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use portico_config::PorticoConfig;

#[test]
fn loads_presence_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[presence]
toggle_latency_ms = 750
",
        )?;

        let config: PorticoConfig = Figment::from(Serialized::defaults(PorticoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.presence.toggle_latency_ms, 750);
        assert_eq!(
            config.presence.toggle_latency(),
            std::time::Duration::from_millis(750)
        );
        // Untouched sections keep their defaults.
        assert_eq!(config.search.default_limit, 20);
        Ok(())
    });
}

#[test]
fn loads_venue_and_search_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[venue]
name = "Portico"
capacity = 250

[search]
default_limit = 50
recent_entries = 5
"#,
        )?;

        let config: PorticoConfig = Figment::from(Serialized::defaults(PorticoConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.venue.name, "Portico");
        assert_eq!(config.venue.capacity, Some(250));
        assert!(config.venue.is_configured());
        assert_eq!(config.search.default_limit, 50);
        assert_eq!(config.search.recent_entries, 5);
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[presence]
toggle_latency_ms = 750
",
        )?;
        jail.set_env("PORTICO_PRESENCE__TOGGLE_LATENCY_MS", "250");

        let config: PorticoConfig = Figment::from(Serialized::defaults(PorticoConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("PORTICO_").split("__"))
            .extract()?;

        assert_eq!(config.presence.toggle_latency_ms, 250);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up_by_the_default_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".portico")?;
        jail.create_file(
            ".portico/config.toml",
            r#"
[venue]
name = "Jailhouse"
"#,
        )?;

        let config: PorticoConfig = PorticoConfig::figment().extract()?;
        assert_eq!(config.venue.name, "Jailhouse");
        Ok(())
    });
}

#[test]
fn zero_search_limit_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("PORTICO_SEARCH__DEFAULT_LIMIT", "0");
        let err = PorticoConfig::load().expect_err("zero limit must not load");
        assert!(
            err.to_string().contains("search.default_limit"),
            "unexpected error: {err}"
        );
        Ok(())
    });
}

#[test]
fn zero_capacity_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("PORTICO_VENUE__CAPACITY", "0");
        let err = PorticoConfig::load().expect_err("zero capacity must not load");
        assert!(
            err.to_string().contains("venue.capacity"),
            "unexpected error: {err}"
        );
        Ok(())
    });
}
