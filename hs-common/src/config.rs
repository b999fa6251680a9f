//! Bootstrap configuration loading and API key resolution
//!
//! Configuration sources, highest priority first:
//! 1. Command-line arguments
//! 2. Environment variables (`MAPS_API_KEY`, `HOMESCOUT_CONFIG`)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing TOML file is never fatal: a warning is logged and defaults apply.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable holding the Google Maps API key
pub const API_KEY_ENV: &str = "MAPS_API_KEY";

/// Environment variable overriding the TOML config file location
pub const CONFIG_PATH_ENV: &str = "HOMESCOUT_CONFIG";

/// Default search radius in meters
pub const DEFAULT_RADIUS_M: u32 = 1000;

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Google Maps API key (lowest priority source)
    #[serde(default)]
    pub maps_api_key: Option<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Search defaults
    #[serde(default)]
    pub search: SearchConfig,

    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Search defaults, each overridable from the command line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Nearby search radius in meters
    #[serde(default = "default_radius_m")]
    pub radius_m: u32,

    /// Places kept per category in reports and lookups
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Maximum number of records sent to the remote APIs (0 = no limit)
    #[serde(default)]
    pub max_records: usize,

    /// Category labels; `None` means the built-in default set
    #[serde(default)]
    pub categories: Option<Vec<String>>,

    /// Records processed concurrently (1 = sequential)
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            radius_m: default_radius_m(),
            max_results: default_max_results(),
            max_records: 0,
            categories: None,
            concurrency: default_concurrency(),
        }
    }
}

/// Outbound HTTP settings shared by the geocoding and places clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Total per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Request rate ceiling per client
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Override for the Maps API base URL (testing, proxies)
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            base_url: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_radius_m() -> u32 {
    DEFAULT_RADIUS_M
}

fn default_max_results() -> usize {
    5
}

fn default_concurrency() -> usize {
    1
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_requests_per_second() -> u32 {
    10
}

/// Resolve the TOML config file path
///
/// CLI argument → `HOMESCOUT_CONFIG` → `<config_dir>/homescout/config.toml`
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir().map(|d| d.join("homescout").join("config.toml"))
}

/// Load the TOML config, falling back to defaults when the file is absent
///
/// A file that exists but cannot be read or parsed is an error.
pub fn load_toml_config(path: Option<&Path>) -> Result<TomlConfig> {
    let Some(path) = path else {
        warn!("No config directory available, using built-in defaults");
        return Ok(TomlConfig::default());
    };

    if !path.exists() {
        warn!("Config file {} not found, using built-in defaults", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolve the Maps API key
///
/// **Priority:** CLI → ENV → TOML
pub fn resolve_api_key(cli_key: Option<&str>, toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV).ok();
    let toml_key = toml_config.maps_api_key.as_deref();

    let candidates = [
        ("command line", cli_key),
        ("environment", env_key.as_deref()),
        ("TOML", toml_key),
    ];

    let valid: Vec<(&str, &str)> = candidates
        .into_iter()
        .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (source, k)))
        .collect();

    // Warn if multiple sources (potential misconfiguration)
    if valid.len() > 1 {
        let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
        warn!(
            "Maps API key found in multiple sources: {}. Using {} (highest priority).",
            sources.join(", "),
            sources[0]
        );
    }

    match valid.first() {
        Some((source, key)) => {
            info!("Maps API key loaded from {}", source);
            Ok(key.trim().to_string())
        }
        None => Err(Error::Config(format!(
            "Google Maps API key not configured. Please configure using one of:\n\
             1. Command line: --api-key your-key-here\n\
             2. Environment: {}=your-key-here\n\
             3. TOML config: ~/.config/homescout/config.toml (maps_api_key = \"your-key\")",
            API_KEY_ENV
        ))),
    }
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TomlConfig::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.search.radius_m, 1000);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.max_records, 0);
        assert_eq!(config.search.concurrency, 1);
        assert!(config.search.categories.is_none());
        assert_eq!(config.http.timeout_secs, 15);
        assert!(config.http.base_url.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TomlConfig = toml::from_str(
            r#"
            [search]
            radius_m = 3000
            categories = ["museum", "park"]
            "#,
        )
        .unwrap();

        assert_eq!(config.search.radius_m, 3000);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(
            config.search.categories,
            Some(vec!["museum".to_string(), "park".to_string()])
        );
        assert_eq!(config.http.requests_per_second, 10);
        assert!(config.maps_api_key.is_none());
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   \t"));
    }
}
