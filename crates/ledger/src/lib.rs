//! # Commission Tracker Ledger
//!
//! The in-memory entity store: the roster of advisors, the sales each one owns,
//! and the counter that hands out advisor ids.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** No I/O. The ledger only mutates state and reports what
//!   happened; persisting the result is the caller's job.
//! - **Validate, then mutate:** Every operation checks all of its inputs before
//!   touching state, so a failed call leaves the ledger exactly as it was.
//!
//! ## Public API
//!
//! - `Ledger`: the advisor collection with its CRUD operations.
//! - `LedgerError`: validation and not-found failures.

pub mod error;
pub mod store;

pub use error::LedgerError;
pub use store::Ledger;
