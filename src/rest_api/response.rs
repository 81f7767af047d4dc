//! # Response Envelopes
//!
//! Every response carries `success`. Single-record responses add `data`;
//! list responses add `count` and `pagination`; errors add `error`.

use serde::Serialize;
use serde_json::{Map, Value};

use super::pagination::Pagination;

/// Single record (or empty object) response
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

impl DataResponse<Value> {
    /// `data: {}`, returned after a delete
    pub fn empty() -> Self {
        Self::new(Value::Object(Map::new()))
    }
}

/// List response with pagination
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub success: bool,
    /// Records on this page
    pub count: usize,
    pub pagination: Pagination,
    pub data: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        let count = data.len();
        Self {
            success: true,
            count,
            pagination,
            data,
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
