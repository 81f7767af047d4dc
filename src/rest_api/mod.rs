//! # REST API Module
//!
//! Query translation, response envelopes and the centralized error
//! responder shared by the HTTP handlers.
//!
//! Query translation is pure: `ListQuery::parse` turns a flat parameter
//! map into filter criteria, projection, sort and page without touching
//! storage.

pub mod errors;
pub mod filter;
pub mod pagination;
pub mod parser;
pub mod response;
pub mod sort;

pub use errors::{ApiError, ApiResult};
pub use filter::{Filter, FilterExpr, FilterOperator, FilterValue};
pub use pagination::{PageRef, PageRequest, Pagination, DEFAULT_LIMIT};
pub use parser::{ListQuery, Projection, RESERVED_KEYS};
pub use response::{DataResponse, ErrorResponse, ListResponse};
pub use sort::{SortKey, SortSpec};
