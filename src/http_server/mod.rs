//! # HTTP Server Module
//!
//! Axum server exposing the executive registry.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/executives` - List and create
//! - `/api/v1/executives/:id` - Fetch, update and delete

pub mod config;
pub mod executive_routes;
pub mod observability_routes;
pub mod server;

pub use config::{Environment, ServerConfig};
pub use executive_routes::{executive_routes, ExecutiveState};
pub use server::{HttpServer, ServerError, API_BASE_PATH};
