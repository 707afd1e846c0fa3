//! # Commission Tracker Storage Crate
//!
//! The persistence adapter. It saves and restores the complete ledger state as one
//! JSON document kept in a key-value blob store under a fixed application key.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** All knowledge of where and how bytes are stored lives here.
//!   The rest of the application only sees `load` and `save` of a `LedgerSnapshot`.
//! - **Whole-state writes:** Every save replaces the full document. There are no
//!   partial updates and no schema versions.
//! - **Pluggable backends:** `BlobStore` is the seam. `MemoryBlobStore` serves tests
//!   and ephemeral sessions, `FileBlobStore` keeps one file per key in a directory.
//!
//! ## Public API
//!
//! - `BlobStore`: the key-value contract a backend must fulfil.
//! - `MemoryBlobStore`, `FileBlobStore`: the two shipped backends.
//! - `Repository`: loads and saves a `LedgerSnapshot` through a `BlobStore`.
//! - `StorageError`: the specific error types that can be returned from this crate.

pub mod blob;
pub mod error;
pub mod repository;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use error::StorageError;
pub use repository::{Repository, DEFAULT_KEY};
