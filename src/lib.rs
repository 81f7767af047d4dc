//! executive-registry - a small REST service for executive records
//!
//! Layers, leaves first:
//! - `storage`: the document store seam and its bundled implementation
//! - `schema`: the record type and its validator
//! - `rest_api`: query translation, envelopes, the error responder
//! - `http_server`: routes and server assembly
//! - `cli` / `observability`: process bootstrap and logging

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod rest_api;
pub mod schema;
pub mod storage;
