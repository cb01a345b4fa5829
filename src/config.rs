//! Configuration management for the demo host.
//!
//! This module handles loading and validating configuration from environment variables
//! using the `dotenvy` crate. All operations return [`LoggerResult`].
//!
//! ## Environment Variables
//!
//! Optional (with defaults):
//! - `SERVER_HOST`: Bind address (default: "0.0.0.0")
//! - `SERVER_PORT`: Bind port (default: 8000)
//! - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: any)
//! - `LOG_JSON`: Emit JSON logs (default: false)
//! - `LOG_FILE`: Also write JSON logs to a daily-rotated file (default: unset)
//! - `RUST_LOG`: Logging filter (default: "http_request_logger=info,tower_http=warn,warn")
//!
//! ## Example
//!
//! ```no_run
//! use http_request_logger::config::Config;
//! use http_request_logger::error::LoggerResult;
//!
//! # fn main() -> LoggerResult<()> {
//! let config = Config::from_env()?;
//! println!("Binding to {}", config.bind_addr());
//! # Ok(())
//! # }
//! ```

use crate::error::{LoggerError, LoggerResult};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Default bind port.
pub const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to
    host: IpAddr,

    /// Port the HTTP listener binds to
    port: u16,

    /// Allowed CORS origins; empty means any
    cors_origins: Vec<String>,

    /// JSON console output
    log_json: bool,

    /// Optional rolling log file
    log_file: Option<PathBuf>,

    /// Log filter directive
    log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_origins: Vec::new(),
            log_json: false,
            log_file: None,
            log_level: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads `.env` (if present) before reading the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but cannot be parsed.
    pub fn from_env() -> LoggerResult<Self> {
        // Load .env file if present (ignore error if file doesn't exist)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> LoggerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let host = match get("SERVER_HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().map_err(|e| {
                LoggerError::config(
                    format!("SERVER_HOST must be an IP address, got: {raw}"),
                    Some(Box::new(e)),
                )
            })?,
            None => defaults.host,
        };

        let port = match get("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                LoggerError::config(
                    format!("SERVER_PORT must be a port number, got: {raw}"),
                    Some(Box::new(e)),
                )
            })?,
            None => defaults.port,
        };

        let cors_origins = get("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let log_json = match get("LOG_JSON") {
            Some(raw) => raw.trim().parse::<bool>().map_err(|e| {
                LoggerError::config("LOG_JSON must be 'true' or 'false'", Some(Box::new(e)))
            })?,
            None => defaults.log_json,
        };

        let log_file = get("LOG_FILE").map(PathBuf::from);
        let log_level = get("RUST_LOG");

        Ok(Self {
            host,
            port,
            cors_origins,
            log_json,
            log_file,
            log_level,
        })
    }

    /// Replace the bind host.
    #[must_use]
    pub fn with_host(mut self, host: IpAddr) -> Self {
        self.host = host;
        self
    }

    /// Replace the bind port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Get the bind host.
    #[must_use]
    pub const fn host(&self) -> IpAddr {
        self.host
    }

    /// Get the bind port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Socket address the server listens on.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Get the allowed CORS origins.
    #[must_use]
    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    /// Check if JSON log output is enabled.
    #[must_use]
    pub const fn log_json(&self) -> bool {
        self.log_json
    }

    /// Get the rolling log file path.
    #[must_use]
    pub const fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Get the log filter directive.
    #[must_use]
    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert!(config.is_ok());

        if let Ok(config) = config {
            assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
            assert!(config.cors_origins().is_empty());
            assert!(!config.log_json());
            assert!(config.log_file().is_none());
            assert!(config.log_level().is_none());
        }
    }

    #[test]
    fn test_config_reads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "9090"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("LOG_JSON", "true"),
            ("LOG_FILE", "./logs/requests.log"),
            ("RUST_LOG", "debug"),
        ]));
        assert!(config.is_ok());

        if let Ok(config) = config {
            assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9090");
            assert_eq!(config.cors_origins(), ["http://a.test", "http://b.test"]);
            assert!(config.log_json());
            assert_eq!(
                config.log_file(),
                Some(&PathBuf::from("./logs/requests.log"))
            );
            assert_eq!(config.log_level(), Some("debug"));
        }
    }

    #[test]
    fn test_config_validation_invalid_port() {
        let result = Config::from_lookup(lookup(&[("SERVER_PORT", "eighty")]));
        assert!(matches!(result, Err(LoggerError::ConfigError { .. })));
    }

    #[test]
    fn test_config_validation_port_out_of_range() {
        let result = Config::from_lookup(lookup(&[("SERVER_PORT", "70000")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_invalid_host() {
        let result = Config::from_lookup(lookup(&[("SERVER_HOST", "localhost:80")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_config_validation_invalid_log_json() {
        let result = Config::from_lookup(lookup(&[("LOG_JSON", "yes")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("SERVER_PORT", ""), ("LOG_FILE", " ")]));
        assert!(config.is_ok());

        if let Ok(config) = config {
            assert_eq!(config.port(), DEFAULT_PORT);
            assert!(config.log_file().is_none());
        }
    }

    #[test]
    fn test_overrides_replace_env_values() {
        let config = Config::default()
            .with_host(IpAddr::V4(Ipv4Addr::LOCALHOST))
            .with_port(3000);
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3000");
    }
}
