//! HTTP Server Configuration
//!
//! Bind address, run mode, storage connection string and paging default.

use std::fmt;

use clap::ValueEnum;

use crate::rest_api::DEFAULT_LIMIT;
use crate::storage::DatabaseUri;

/// Run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    /// Human-readable logs and per-request HTTP tracing
    Development,
    /// JSON logs, no per-request tracing
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn is_development(&self) -> bool {
        *self == Environment::Development
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    pub host: String,

    /// Port to bind to (default: 5004)
    pub port: u16,

    pub environment: Environment,

    /// Where records are kept (default: memory://)
    pub database_uri: DatabaseUri,

    /// Page size when a list request has no `limit`
    pub default_limit: u64,
}

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5004;

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            environment: Environment::Development,
            database_uri: DatabaseUri::Memory,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl ServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5004);
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.database_uri, DatabaseUri::Memory);
        assert_eq!(config.default_limit, 1);
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_environment_names() {
        assert_eq!(
            Environment::from_str("production", false).unwrap(),
            Environment::Production
        );
        assert!(Environment::from_str("staging", false).is_err());
        assert_eq!(Environment::Development.to_string(), "development");
    }
}
