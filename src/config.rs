use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_root_url")]
    pub root_url: String,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            cache_ttl_seconds: default_cache_ttl(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_root_url() -> String {
    "https://district196.api.nutrislice.com/menu/api/weeks/school/echo-park/menu-type/breakfast-lunch/"
        .to_string()
}

fn default_cache_ttl() -> u64 {
    1800
}

fn default_timeout() -> u64 {
    20
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    /// IANA name of the timezone that anchors "today".
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self { timezone: default_timezone() }
    }
}

fn default_timezone() -> String {
    "America/Chicago".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LUNCHBOARD__UPSTREAM__ROOT_URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // The config file is optional; defaults carry a runnable setup.
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("LUNCHBOARD")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration before anything binds or fetches.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if !self.upstream.root_url.starts_with("http://")
            && !self.upstream.root_url.starts_with("https://")
        {
            return Err("Upstream root_url must be an http(s) URL".to_string());
        }
        if self.upstream.cache_ttl_seconds == 0 {
            return Err("Upstream cache_ttl_seconds must be greater than 0".to_string());
        }
        if self.upstream.timeout_seconds == 0 {
            return Err("Upstream timeout_seconds must be greater than 0".to_string());
        }
        if time_tz::timezones::get_by_name(&self.menu.timezone).is_none() {
            return Err(format!("Unknown timezone: {}", self.menu.timezone));
        }
        Ok(())
    }
}
