//! Service configuration.
//!
//! Settings come from an optional `astro-api.toml` file, then environment
//! variables override individual values.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8000
//!
//! [ephemeris]
//! binary = "swetest"
//! timeout_secs = 30
//! suppress_header = true
//!
//! [rate_limit]
//! enabled = true
//! max_requests = 300
//! window_secs = 86400
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file name searched by [`AppConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "astro-api.toml";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("environment variable {name}='{value}' is invalid: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub ephemeris: EphemerisSettings,
    #[serde(default)]
    pub rate_limit: RateLimitSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSettings {
    /// Executable name or path of the ephemeris calculator.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Per-invocation deadline. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_true")]
    pub suppress_header: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_binary() -> String {
    "swetest".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_requests() -> u32 {
    300
}

fn default_window_secs() -> u64 {
    24 * 60 * 60
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            timeout_secs: None,
            suppress_header: true,
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: default_max_requests(),
            window_secs: default_window_secs(),
        }
    }
}

impl EphemerisSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl RateLimitSettings {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. Missing sections use defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `astro-api.toml` from the first standard location that has one,
    /// or fall back to defaults.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Defaults or file settings, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("ASTRO_API_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::from_default_location()?,
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override settings from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST`: bind host
    /// - `PORT`: bind port
    /// - `EPHEMERIS_BINARY`: ephemeris executable
    /// - `EPHEMERIS_TIMEOUT_SECS`: per-invocation deadline (`0` disables it)
    /// - `RATE_LIMIT_MAX`: requests per client and path per window
    /// - `RATE_LIMIT_WINDOW_SECS`: window length
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        if let Some(port) = parse_env("PORT")? {
            self.server.port = port;
        }
        if let Ok(binary) = env::var("EPHEMERIS_BINARY") {
            self.ephemeris.binary = binary;
        }
        if let Some(secs) = parse_env::<u64>("EPHEMERIS_TIMEOUT_SECS")? {
            self.ephemeris.timeout_secs = (secs > 0).then_some(secs);
        }
        if let Some(max) = parse_env("RATE_LIMIT_MAX")? {
            self.rate_limit.max_requests = max;
        }
        if let Some(secs) = parse_env("RATE_LIMIT_WINDOW_SECS")? {
            self.rate_limit.window_secs = secs;
        }
        Ok(())
    }
}

fn parse_env<T>(name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidEnv {
                name,
                reason: e.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.ephemeris.binary, "swetest");
        assert!(config.ephemeris.suppress_header);
        assert_eq!(config.ephemeris.timeout(), None);
        assert_eq!(config.rate_limit.max_requests, 300);
        assert_eq!(config.rate_limit.window(), Duration::from_secs(86400));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ephemeris]
            binary = "/opt/swisseph/swetest"
            timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.ephemeris.binary, "/opt/swisseph/swetest");
        assert_eq!(config.ephemeris.timeout(), Some(Duration::from_secs(15)));
        assert!(config.ephemeris.suppress_header);
        assert_eq!(config.server, ServerSettings::default());
        assert_eq!(config.rate_limit, RateLimitSettings::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
