//! # Commission Tracker Analytics
//!
//! This crate turns the advisor roster into numbers: per-sale and per-advisor
//! commissions, filtered reports with grand totals, the store-wide summary, and
//! the listing views the presentation layer renders.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage
//!   or rendering and depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `ReportEngine` reads a slice of advisors and
//!   produces values. It never mutates its input.
//! - **No hidden rounding:** All figures are exact `Decimal`s. Rounding to two
//!   places happens only when a value is displayed.
//!
//! ## Public API
//!
//! - `commission_for`, `total_commission_for_advisor`: the commission formulas.
//! - `ReportFilter`: advisor and date-range selection shared by reports and exports.
//! - `ReportEngine`: builds a `Report` and the unfiltered `Summary`.
//! - `AdvisorOverview`, `SaleEntry`: per-advisor and per-sale listing rows.

// Declare the modules that constitute this crate.
pub mod calculator;
pub mod engine;
pub mod filter;
pub mod report;
pub mod views;

// Re-export the key components to create a clean, public-facing API.
pub use calculator::{commission_for, commission_on, format_money, total_commission_for_advisor};
pub use engine::ReportEngine;
pub use filter::ReportFilter;
pub use report::{AdvisorRow, GrandTotals, Report, Summary};
pub use views::{AdvisorOverview, SaleEntry, advisor_overviews, sale_entries};
