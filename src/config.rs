//! Server and client configuration
//!
//! A small JSON config file overrides the defaults; a missing file means
//! defaults. The listening address defaults to `127.0.0.1:5000`.
//!
//! # Example
//! ```json
//! { "host": "0.0.0.0", "port": 6000, "send_timeout_ms": 2000 }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Default listening/connecting host
const DEFAULT_HOST: &str = "127.0.0.1";

/// Default listening/connecting port
const DEFAULT_PORT: u16 = 5000;

/// Default per-recipient delivery timeout in milliseconds
const DEFAULT_SEND_TIMEOUT_MS: u64 = 5000;

/// Default per-connection outbound channel capacity
const DEFAULT_OUTBOUND_BUFFER: usize = 32;

/// Runtime configuration, shared by the server and client binaries
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host to bind (server) or connect to (client)
    pub host: String,
    /// Port to bind (server) or connect to (client)
    pub port: u16,
    /// How long a broadcast waits on one recipient before dropping it
    pub send_timeout_ms: u64,
    /// Capacity of each connection's outbound message channel
    pub outbound_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
        }
    }
}

impl Config {
    /// Load configuration from an optional file path
    ///
    /// `None` (or a path that does not exist) yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) if path.exists() => Self::load_from_path(path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_path(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON string and validate it
    pub fn parse(content: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.host.is_empty() {
            return Err(AppError::ConfigInvalid("host must not be empty".into()));
        }
        if self.outbound_buffer == 0 {
            return Err(AppError::ConfigInvalid(
                "outbound_buffer must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// The `host:port` address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
