//! # REST API Errors
//!
//! Every handler failure becomes an `ApiError`, and `ApiError` is the only
//! place failures are turned into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::schema::ValidationError;
use crate::storage::StoreError;

use super::response::ErrorResponse;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Message sent to clients for server-side failures
const SERVER_ERROR_MESSAGE: &str = "Server Error";

/// REST API errors
#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// No record with the requested id
    #[error("{0}")]
    NotFound(String),

    /// Payload breaks a data-model rule
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Unparseable id, body or query
    #[error("{0}")]
    MalformedInput(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage collaborator failed
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),
}

impl ApiError {
    pub fn executive_not_found(id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("Executive not found with id of {}", id))
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show a client
    pub fn client_message(&self) -> String {
        match self {
            ApiError::StorageUnavailable(_) => SERVER_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let body = Json(ErrorResponse::new(self.client_message()));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldViolation, ViolationKind};

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::executive_not_found("abc").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::MalformedInput("bad".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::StorageUnavailable(StoreError::Closed).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ApiError = ValidationError::new(vec![FieldViolation::new(
            "name",
            ViolationKind::Required,
            "Please add a name",
        )])
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Please add a name");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let err = ApiError::StorageUnavailable(StoreError::Closed);
        assert_eq!(err.client_message(), "Server Error");
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            ApiError::executive_not_found("42").to_string(),
            "Executive not found with id of 42"
        );
    }
}
