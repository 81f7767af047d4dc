//! Executive data model
//!
//! The record type, the client payload type, and the validator that sits
//! between them. Every write passes through `ExecutiveValidator` before it
//! reaches the store.

mod errors;
mod types;
mod validator;

pub use errors::{FieldViolation, ValidationError, ValidationResult, ViolationKind};
pub use types::{Executive, ExecutiveFields, ExecutivePatch, NewExecutive, Title, EXECUTIVE_FIELDS};
pub use validator::{ExecutiveValidator, CONTACT_MAX_LEN, NAME_MAX_LEN, PORTFOLIO_MAX_LEN};
