//! Configuration module for depot.

use serde::Deserialize;
use std::path::Path;

use chrono_tz::Tz;

use crate::{DepotError, Result};

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upper bound on the time spent handling one request, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum multipart body size in megabytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_mb: u64,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_body_limit() -> u64 {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            body_limit_mb: default_body_limit(),
            cors_origins: vec![],
        }
    }
}

impl ServerConfig {
    /// Body limit in bytes.
    pub fn body_limit_bytes(&self) -> usize {
        (self.body_limit_mb as usize).saturating_mul(1024 * 1024)
    }
}

/// Storage roots configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory where uploaded bytes land before validation.
    #[serde(default = "default_staging_path")]
    pub staging_path: String,
    /// Root of the permanent upload hierarchy.
    #[serde(default = "default_upload_path")]
    pub upload_path: String,
    /// Timezone used for the date segment (e.g., "Asia/Shanghai", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_staging_path() -> String {
    "./temp".to_string()
}

fn default_upload_path() -> String {
    "./upload".to_string()
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            staging_path: default_staging_path(),
            upload_path: default_upload_path(),
            timezone: default_timezone(),
        }
    }
}

impl StorageConfig {
    /// Parse the configured timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse()
            .map_err(|_| DepotError::Config(format!("unknown timezone: {}", self.timezone)))
    }
}

/// Message catalog configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Catalog locale (en / zh).
    #[serde(default = "default_locale")]
    pub locale: String,
    /// Directory holding `<locale>.toml` catalogs.
    #[serde(default = "default_catalog_path")]
    pub path: String,
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_catalog_path() -> String {
    "locales".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            path: default_catalog_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file; empty logs to the console only.
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Colour console output.
    #[serde(default = "default_log_ansi")]
    pub ansi: bool,
}

impl LoggingConfig {
    /// Log file path, if file logging is enabled.
    pub fn file_path(&self) -> Option<&Path> {
        let file = self.file.trim();
        (!file.is_empty()).then(|| Path::new(file))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/depot.log".to_string()
}

fn default_log_ansi() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
            ansi: default_log_ansi(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Message catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DepotError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DepotError::Validation(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DEPOT_UPLOAD_PATH`: Override the upload root
    /// - `DEPOT_STAGING_PATH`: Override the staging root
    /// - `DEPOT_PORT`: Override the listening port
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("DEPOT_UPLOAD_PATH") {
            if !path.is_empty() {
                self.storage.upload_path = path;
            }
        }
        if let Ok(path) = std::env::var("DEPOT_STAGING_PATH") {
            if !path.is_empty() {
                self.storage.staging_path = path;
            }
        }
        if let Ok(port) = std::env::var("DEPOT_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid DEPOT_PORT value: {}", port),
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The storage timezone is not a known IANA name
    /// - The body limit is zero
    /// - Staging and upload roots are the same directory
    pub fn validate(&self) -> Result<()> {
        self.storage.tz()?;

        if self.server.body_limit_mb == 0 {
            return Err(DepotError::Validation(
                "server.body_limit_mb must be greater than zero".to_string(),
            ));
        }

        if Path::new(&self.storage.staging_path) == Path::new(&self.storage.upload_path) {
            return Err(DepotError::Validation(
                "storage.staging_path and storage.upload_path must differ".to_string(),
            ));
        }

        Ok(())
    }
}
