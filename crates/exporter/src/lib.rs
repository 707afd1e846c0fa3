//! # Commission Tracker Exporter
//!
//! Renders the sales of the roster as a CSV document, one block per advisor, and
//! hands it to a file sink under a dated file name.
//!
//! The exporter walks the raw advisors and sales itself rather than reading a
//! `Report`, applying the same `ReportFilter`. Unlike the report, it leaves out
//! advisors that have no sale left after filtering.

pub mod csv;
pub mod error;

pub use csv::{CsvExporter, suggested_filename, write_document};
pub use error::ExportError;
