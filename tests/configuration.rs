//! Tests for configuration system

use lunchboard::Config;

#[test]
fn config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.upstream.cache_ttl_seconds, 1800);
    assert_eq!(config.upstream.timeout_seconds, 20);
    assert_eq!(config.menu.timezone, "America/Chicago");
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn default_config_passes_validation() {
    let config = Config::load(None).expect("Failed to load config");

    assert!(config.validate().is_ok());
    assert!(config.upstream.root_url.starts_with("https://"));
}

#[test]
fn missing_config_file_falls_back_to_defaults() {
    let config = Config::load(Some("config/does-not-exist.toml".to_string()))
        .expect("Failed to load config");

    assert_eq!(config.server.port, 8080);
    assert!(config.validate().is_ok());
}
