//! Executive storage
//!
//! `ExecutiveStore` is the seam between request handlers and durability.
//! One store handle is opened at startup from a `DatabaseUri`, shared by
//! every request, and closed at shutdown.
//!
//! # Guarantees
//!
//! - Identity (`id`) and `createdAt` are assigned here, never by clients
//! - Each operation is atomic for the record it touches
//! - No cross-record transactions

mod errors;
mod memory;
mod store;
mod uri;

pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{ExecutiveStore, FindQuery};
pub use uri::DatabaseUri;
