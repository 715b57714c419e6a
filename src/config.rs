//! Runtime configuration read from the environment at startup.
//!
//! | Variable | Default |
//! |---|---|
//! | `PRM_LOG_MODE` | `stderr` (CLI), `stdout` (server) |
//! | `PRM_LOG_FILE` | `prm.log` |
//! | `PRM_SANITIZE_MAX_BYTES` | 16384 |
//! | `PRM_BIND_ADDR` | `0.0.0.0:8080` |
//!
//! `RUST_LOG` is read directly by the log filter.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::adapters::sanitize;

pub const LOG_MODE_VAR: &str = "PRM_LOG_MODE";
pub const LOG_FILE_VAR: &str = "PRM_LOG_FILE";
pub const SANITIZE_MAX_BYTES_VAR: &str = "PRM_SANITIZE_MAX_BYTES";
pub const BIND_ADDR_VAR: &str = "PRM_BIND_ADDR";

pub const DEFAULT_LOG_FILE: &str = "prm.log";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: unknown log mode '{value}' (expected stderr, stdout or file)")]
    LogMode { var: &'static str, value: String },

    #[error("{var}: '{value}' is not a positive byte count")]
    ByteCount { var: &'static str, value: String },

    #[error("{var}: '{value}' is not a socket address")]
    BindAddr { var: &'static str, value: String },
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    Stderr,
    Stdout,
    File,
}

impl FromStr for LogMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stderr" => Ok(Self::Stderr),
            "stdout" => Ok(Self::Stdout),
            "file" => Ok(Self::File),
            _ => Err(ConfigError::LogMode {
                var: LOG_MODE_VAR,
                value: s.to_string(),
            }),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub mode: LogMode,
    pub file: PathBuf,
    pub sanitize_max_bytes: usize,
}

impl LogConfig {
    /// Read from the process environment, using `default_mode` when
    /// `PRM_LOG_MODE` is unset.
    ///
    /// # Errors
    /// Returns `ConfigError` for values that are set but invalid.
    pub fn from_env(default_mode: LogMode) -> Result<Self, ConfigError> {
        Self::from_lookup(default_mode, |var| std::env::var(var).ok())
    }

    /// Read through an arbitrary variable lookup.
    ///
    /// # Errors
    /// As [`LogConfig::from_env`].
    pub fn from_lookup<F>(default_mode: LogMode, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mode = match lookup(LOG_MODE_VAR) {
            Some(value) => value.parse()?,
            None => default_mode,
        };
        let file = lookup(LOG_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);
        let sanitize_max_bytes = match lookup(SANITIZE_MAX_BYTES_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::ByteCount {
                        var: SANITIZE_MAX_BYTES_VAR,
                        value,
                    })
                }
            },
            None => sanitize::DEFAULT_MAX_BYTES,
        };

        Ok(Self {
            mode,
            file,
            sanitize_max_bytes,
        })
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// # Errors
    /// Returns `ConfigError::BindAddr` if `PRM_BIND_ADDR` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// # Errors
    /// As [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        match value.trim().parse::<SocketAddr>() {
            Ok(bind_addr) => Ok(Self { bind_addr }),
            Err(_) => Err(ConfigError::BindAddr {
                var: BIND_ADDR_VAR,
                value,
            }),
        }
    }
}
