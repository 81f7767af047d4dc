//! Observability
//!
//! Structured logging through `tracing`. Handlers and the server emit
//! events; this module only decides how they are rendered.

mod logger;

pub use logger::{default_filter, init_logging};
