//! Configuration management for tofuref
//!
//! Settings are layered: built-in defaults, then the YAML config file, then
//! `TOFUREF_*` environment variables. Each layer is applied field by field and
//! a value that cannot be parsed is ignored, so a broken config file never
//! prevents startup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::ConfigError;

/// Application name, used for config/cache directories and env prefixes
pub const APP_NAME: &str = "tofuref";

const DEFAULT_HTTP_REQUEST_TIMEOUT: f64 = 3.0;
const DEFAULT_INDEX_CACHE_DURATION_DAYS: u64 = 31;
const DEFAULT_FULLSCREEN_INIT_THRESHOLD: u16 = 125;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Registry request timeout in seconds
    pub http_request_timeout: f64,

    /// How long the cached provider index stays fresh
    pub index_cache_duration_days: u64,

    /// Terminal width below which the browser starts in fullscreen mode
    pub fullscreen_init_threshold: u16,

    /// Display preferences
    pub theme: ThemeConfig,
}

/// Display preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Use emoji markers instead of letters in listings
    pub emoji: bool,

    /// Table border style (ascii, rounded, modern, markdown, blank)
    pub borders_style: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            emoji: false,
            borders_style: "ascii".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_request_timeout: DEFAULT_HTTP_REQUEST_TIMEOUT,
            index_cache_duration_days: DEFAULT_INDEX_CACHE_DURATION_DAYS,
            fullscreen_init_threshold: DEFAULT_FULLSCREEN_INIT_THRESHOLD,
            theme: ThemeConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config file path (~/.config/tofuref/config.yaml on Linux)
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoHome)?;
        Ok(base.join(APP_NAME).join("config.yaml"))
    }

    /// Resolve the config path from an optional override
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf, ConfigError> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from the given path (or the default location),
    /// then apply environment overrides.
    ///
    /// Never fails: missing or unreadable files fall back to defaults.
    pub fn load_at(path: Option<&str>) -> Self {
        let mut config = Self::default();

        match Self::resolve_path(path) {
            Ok(file) => {
                if let Err(e) = config.update_from_file(&file) {
                    log::warn!("Ignoring config file {}: {}", file.display(), e);
                }
            }
            Err(e) => log::debug!("{}", e),
        }

        config.update_from_env(|key| std::env::var(key).ok());
        config
    }

    /// Apply values from a YAML config file, if it exists
    pub fn update_from_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Ok(());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let value: Value = serde_yaml::from_str(&contents)?;

        if let Value::Mapping(map) = value {
            self.update_from_mapping(&map);
        }
        Ok(())
    }

    /// Apply known keys from a YAML mapping, skipping values of the wrong type
    pub fn update_from_mapping(&mut self, map: &Mapping) {
        set_from_yaml(map, "http_request_timeout", &mut self.http_request_timeout);
        set_from_yaml(
            map,
            "index_cache_duration_days",
            &mut self.index_cache_duration_days,
        );
        set_from_yaml(
            map,
            "fullscreen_init_threshold",
            &mut self.fullscreen_init_threshold,
        );

        if let Some(Value::Mapping(theme)) = map.get("theme") {
            set_from_yaml(theme, "emoji", &mut self.theme.emoji);
            set_from_yaml(theme, "borders_style", &mut self.theme.borders_style);
        }

        self.sanitize();
    }

    /// Apply `TOFUREF_*` overrides using the given variable lookup
    pub fn update_from_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(&env_key(key));

        if let Some(v) = var("http_request_timeout").and_then(|v| v.trim().parse().ok()) {
            self.http_request_timeout = v;
        }
        if let Some(v) = var("index_cache_duration_days").and_then(|v| v.trim().parse().ok()) {
            self.index_cache_duration_days = v;
        }
        if let Some(v) = var("fullscreen_init_threshold").and_then(|v| v.trim().parse().ok()) {
            self.fullscreen_init_threshold = v;
        }
        if let Some(v) = var("theme_emoji") {
            self.theme.emoji = parse_bool(&v);
        }
        if let Some(v) = var("theme_borders_style") {
            self.theme.borders_style = v;
        }

        self.sanitize();
    }

    /// Request timeout for registry calls
    pub fn request_timeout(&self) -> Duration {
        Duration::try_from_secs_f64(self.http_request_timeout)
            .unwrap_or(Duration::from_secs_f64(DEFAULT_HTTP_REQUEST_TIMEOUT))
    }

    /// Freshness window of the cached provider index
    pub fn index_ttl(&self) -> Duration {
        Duration::from_secs(self.index_cache_duration_days.saturating_mul(86_400))
    }

    // A non-positive or non-finite timeout would make every request fail
    fn sanitize(&mut self) {
        if !self.http_request_timeout.is_finite() || self.http_request_timeout <= 0.0 {
            log::warn!(
                "Invalid http_request_timeout {}, using {}",
                self.http_request_timeout,
                DEFAULT_HTTP_REQUEST_TIMEOUT
            );
            self.http_request_timeout = DEFAULT_HTTP_REQUEST_TIMEOUT;
        }
    }
}

/// Environment variable name for a config key (`TOFUREF_<KEY>`)
fn env_key(key: &str) -> String {
    format!("{}_{}", APP_NAME, key).to_uppercase()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "t"
    )
}

fn set_from_yaml<T: DeserializeOwned>(map: &Mapping, key: &str, target: &mut T) {
    let Some(value) = map.get(key) else {
        return;
    };
    match serde_yaml::from_value::<T>(value.clone()) {
        Ok(v) => *target = v,
        Err(e) => log::warn!("Ignoring config value for {}: {}", key, e),
    }
}
