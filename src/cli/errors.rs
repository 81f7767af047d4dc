//! CLI-specific error types
//!
//! Every CLI error is fatal: it is logged and the process exits non-zero.

use std::fmt;
use std::io;

use crate::http_server::ServerError;
use crate::storage::StoreError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Invalid configuration value
    ConfigError,
    /// Store could not be opened
    StorageError,
    /// Server failed to start or stopped with an error
    ServerError,
    /// Async runtime could not be created
    RuntimeError,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CLI_CONFIG_ERROR",
            Self::StorageError => "CLI_STORAGE_ERROR",
            Self::ServerError => "CLI_SERVER_ERROR",
            Self::RuntimeError => "CLI_RUNTIME_ERROR",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Storage error
    pub fn storage_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::StorageError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::new(CliErrorCode::RuntimeError, e.to_string())
    }
}

impl From<ServerError> for CliError {
    fn from(e: ServerError) -> Self {
        Self::new(CliErrorCode::ServerError, e.to_string())
    }
}

impl From<StoreError> for CliError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnsupportedUri(_) => Self::config_error(e.to_string()),
            other => Self::storage_error(other.to_string()),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
