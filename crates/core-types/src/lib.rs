//! # Commission Tracker Core Types
//!
//! The Layer 0 vocabulary shared by every other crate: the `Advisor` and `Sale`
//! entities, the persisted `LedgerSnapshot`, and the field-level validation rules
//! that guard them.

pub mod enums;
pub mod error;
pub mod input;
pub mod structs;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use enums::Field;
pub use error::CoreError;
pub use structs::{Advisor, AdvisorId, AdvisorUpdate, LedgerSnapshot, Sale, SaleId};
