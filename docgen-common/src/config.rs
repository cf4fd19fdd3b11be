//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument / environment variable (handled by the binary)
//! 2. TOML config file
//! 3. Compiled default (fallback)
//!
//! A missing TOML file is not an error: the service starts on defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::{Error, Result};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "DOCGEN_CONFIG";

/// Backend address used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:7000";

/// Port the client UI listens on by default
pub const DEFAULT_PORT: u16 = 8502;

/// Interface the client UI binds to by default
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// Largest accepted upload, in MiB
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 500;

/// Contents of `config.toml`
///
/// Every field is optional; absent fields fall through to compiled defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Base address of the documentation backend
    pub backend_url: Option<String>,
    /// Port for the browser-facing UI
    pub port: Option<u16>,
    /// Interface for the browser-facing UI
    pub bind_address: Option<String>,
    /// Upload size limit in MiB
    pub max_upload_mb: Option<u64>,
    /// Per-request timeout for backend calls; unset inherits the transport default
    pub request_timeout_secs: Option<u64>,
    /// Enables one background readiness poller per outstanding upload
    pub auto_poll_interval_secs: Option<u64>,
}

impl TomlConfig {
    /// Load a config file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load a config file, falling back to defaults when it does not exist
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let config = Self::load(path)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

/// Default config file location for the platform
///
/// `~/.config/docgen/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("docgen").join("config.toml"))
}

/// Resolve which config file to read
///
/// Priority: command-line path, then `DOCGEN_CONFIG`, then the platform default.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend_url: Option<String>,
    pub port: Option<u16>,
    pub bind_address: Option<String>,
}

/// Fully resolved client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base address without trailing slash
    pub backend_url: String,
    pub port: u16,
    pub bind_address: String,
    pub max_upload_bytes: usize,
    pub request_timeout: Option<Duration>,
    pub auto_poll_interval: Option<Duration>,
}

impl ClientConfig {
    /// Merge overrides, file settings and compiled defaults
    pub fn resolve(overrides: &ConfigOverrides, file: &TomlConfig) -> Result<Self> {
        let backend_url = overrides
            .backend_url
            .as_deref()
            .or(file.backend_url.as_deref())
            .unwrap_or(DEFAULT_BACKEND_URL);
        let backend_url = normalize_base_url(backend_url)?;

        let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);

        let bind_address = overrides
            .bind_address
            .clone()
            .or_else(|| file.bind_address.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let max_upload_mb = file.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB);
        if max_upload_mb == 0 {
            return Err(Error::Config("max_upload_mb must be greater than 0".to_string()));
        }

        Ok(Self {
            backend_url,
            port,
            bind_address,
            max_upload_bytes: (max_upload_mb as usize).saturating_mul(1024 * 1024),
            request_timeout: positive_seconds(file.request_timeout_secs),
            auto_poll_interval: positive_seconds(file.auto_poll_interval_secs),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            port: DEFAULT_PORT,
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            max_upload_bytes: (DEFAULT_MAX_UPLOAD_MB as usize) * 1024 * 1024,
            request_timeout: None,
            auto_poll_interval: None,
        }
    }
}

/// Zero means "disabled"
fn positive_seconds(value: Option<u64>) -> Option<Duration> {
    value.filter(|s| *s > 0).map(Duration::from_secs)
}

/// Validate a backend base address and strip trailing slashes
///
/// `http://host/` and `http://host` both yield `http://host`.
pub fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(Error::Config("backend_url must not be empty".to_string()));
    }

    let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    if !has_scheme {
        return Err(Error::Config(format!(
            "backend_url must start with http:// or https:// (got '{}')",
            url
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_base_url("http://localhost:7000/").unwrap(),
            "http://localhost:7000"
        );
        assert_eq!(
            normalize_base_url("  https://docs.example.com/api//  ").unwrap(),
            "https://docs.example.com/api"
        );
    }

    #[test]
    fn test_normalize_rejects_bad_urls() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("/").is_err());
        assert!(normalize_base_url("localhost:7000").is_err());
        assert!(normalize_base_url("ftp://host").is_err());
    }

    #[test]
    fn test_positive_seconds_treats_zero_as_disabled() {
        assert_eq!(positive_seconds(None), None);
        assert_eq!(positive_seconds(Some(0)), None);
        assert_eq!(positive_seconds(Some(5)), Some(Duration::from_secs(5)));
    }
}
