//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::model::{Country, LogType};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub toast: ToastConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dashboard API connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP basic auth user (sent only together with `password`)
    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Per-request timeout; unset means no timeout
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            username: None,
            password: None,
            request_timeout_ms: None,
        }
    }
}

impl ApiConfig {
    /// Basic auth credentials, if both halves are configured
    pub fn basic_auth(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some((user.as_str(), pass.as_str())),
            _ => None,
        }
    }
}

/// Dashboard behaviour
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub default_country: Country,

    #[serde(default)]
    pub default_log_type: LogType,

    /// Number of latest log lines requested
    #[serde(default = "default_log_lines")]
    pub log_lines: usize,

    #[serde(default = "default_price_history_days")]
    pub price_history_days: u32,

    /// Refresh period of `watch`
    #[serde(default = "default_watch_interval")]
    pub watch_interval_secs: u64,
}

fn default_log_lines() -> usize {
    50
}

fn default_price_history_days() -> u32 {
    30
}

fn default_watch_interval() -> u64 {
    30
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_country: Country::default(),
            default_log_type: LogType::default(),
            log_lines: default_log_lines(),
            price_history_days: default_price_history_days(),
            watch_interval_secs: default_watch_interval(),
        }
    }
}

/// Toast notification timings
#[derive(Debug, Clone, Deserialize)]
pub struct ToastConfig {
    /// Delay before the `show` class is applied
    #[serde(default = "default_show_delay")]
    pub show_delay_ms: u64,

    /// Time the toast stays visible
    #[serde(default = "default_dwell")]
    pub dwell_ms: u64,

    /// Fade-out grace period before the node is removed
    #[serde(default = "default_fade")]
    pub fade_ms: u64,
}

fn default_show_delay() -> u64 {
    10
}

fn default_dwell() -> u64 {
    4000
}

fn default_fade() -> u64 {
    300
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: default_show_delay(),
            dwell_ms: default_dwell(),
            fade_ms: default_fade(),
        }
    }
}

impl ToastConfig {
    pub fn show_delay(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms)
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        for ignored in config.apply_env_overrides() {
            tracing::warn!("{}", ignored);
        }
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let (config, report) = Self::load_with_env_reported(path)?;
        report.log();
        Ok(config)
    }

    /// Like [`Config::load_with_env`], returning the outcome instead of logging it
    pub fn load_with_env_reported(path: &Path) -> Result<(Self, ConfigReport), ConfigError> {
        let mut config = Self::load(path)?;
        let report = ConfigReport {
            source: Some(path.to_path_buf()),
            rejected: Vec::new(),
            ignored_env: config.apply_env_overrides(),
        };
        Ok((config, report))
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let (config, report) = Self::load_default_reported();
        report.log();
        config
    }

    /// Like [`Config::load_default`], returning the outcome instead of logging it
    pub fn load_default_reported() -> (Self, ConfigReport) {
        let config_paths = [
            Some(PathBuf::from("./kis-dashboard.toml")),
            dirs::config_dir().map(|p| p.join("kis-dashboard").join("config.toml")),
        ];

        Self::search(config_paths.iter().flatten(), |key| std::env::var(key).ok())
    }

    /// First candidate file that loads wins; defaults otherwise
    fn search<'a>(
        paths: impl IntoIterator<Item = &'a PathBuf>,
        var: impl Fn(&str) -> Option<String>,
    ) -> (Self, ConfigReport) {
        let mut report = ConfigReport::default();

        for path in paths {
            if !path.exists() {
                continue;
            }
            match Self::load(path) {
                Ok(mut config) => {
                    report.source = Some(path.clone());
                    report.ignored_env = config.apply_overrides(&var);
                    return (config, report);
                }
                Err(e) => report.rejected.push(e),
            }
        }

        let mut config = Config::default();
        report.ignored_env = config.apply_overrides(&var);
        (config, report)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Vec<String> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Returns a message for every override that was ignored
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Vec<String> {
        let mut ignored = Vec::new();

        // API overrides
        if let Some(url) = var("KIS_DASHBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(user) = var("KIS_DASHBOARD_USERNAME") {
            self.api.username = Some(user);
        }
        if let Some(pass) = var("KIS_DASHBOARD_PASSWORD") {
            self.api.password = Some(pass);
        }

        // Dashboard overrides
        if let Some(country) = var("KIS_DASHBOARD_COUNTRY") {
            match country.parse() {
                Ok(c) => self.dashboard.default_country = c,
                Err(e) => ignored.push(format!("Ignoring KIS_DASHBOARD_COUNTRY: {}", e)),
            }
        }

        // Logging overrides
        if let Some(level) = var("KIS_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("KIS_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }

        ignored
    }
}

/// How a configuration was resolved
///
/// Config is read before the tracing subscriber exists, so the outcome is
/// kept here and emitted with [`ConfigReport::log`] once logging is up.
#[derive(Debug, Default)]
pub struct ConfigReport {
    /// File the settings came from; `None` means defaults
    pub source: Option<PathBuf>,
    /// Candidate files that exist but could not be loaded
    pub rejected: Vec<ConfigError>,
    /// Environment overrides that were ignored
    pub ignored_env: Vec<String>,
}

impl ConfigReport {
    pub fn log(&self) {
        for err in &self.rejected {
            tracing::warn!("Skipping config: {}", err);
        }
        for ignored in &self.ignored_env {
            tracing::warn!("{}", ignored);
        }
        match &self.source {
            Some(path) => tracing::info!("Loaded config from {:?}", path),
            None => tracing::info!("Using default config with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# KIS Dashboard Configuration
#
# Environment variables override these settings:
# - KIS_DASHBOARD_API_URL
# - KIS_DASHBOARD_USERNAME
# - KIS_DASHBOARD_PASSWORD
# - KIS_DASHBOARD_COUNTRY
# - KIS_DASHBOARD_LOG_LEVEL
# - KIS_DASHBOARD_LOG_FORMAT

[api]
# Dashboard backend URL (the /api/dashboard routes live under it)
base_url = "http://127.0.0.1:8000"

# HTTP basic auth for the dashboard routes
# username = ""
# password = ""

# Per-request timeout in milliseconds (unset: no timeout)
# request_timeout_ms = 10000

[dashboard]
# Country tab selected on start: KOR or USA
default_country = "KOR"

# Log category shown by default: app, error or trading
default_log_type = "app"

# Number of latest log lines to load
log_lines = 50

# Days of price history to request
price_history_days = 30

# Refresh period for `watch` (seconds)
watch_interval_secs = 30

[toast]
# Delay before a toast becomes visible (ms)
show_delay_ms = 10

# How long a toast stays on screen (ms)
dwell_ms = 4000

# Fade-out grace period before removal (ms)
fade_ms = 300

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
