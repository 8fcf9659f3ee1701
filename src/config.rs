//! Server configuration.

use crate::error::ConfigError;

/// Listening port when `PORT` is not set.
const DEFAULT_PORT: u16 = 5001;

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind; all interfaces by default.
    pub host: String,
    /// Listening port, from the `PORT` environment variable.
    pub port: u16,
}

impl ServerConfig {
    /// Read configuration from the environment. An unparseable `PORT` is a
    /// startup error rather than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("expected a port number, got {raw:?}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self {
            host: "0.0.0.0".to_string(),
            port,
        })
    }

    /// Socket address string for the TCP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
        }
    }
}
