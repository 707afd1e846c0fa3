use crate::filter::ReportFilter;
use core_types::AdvisorId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One advisor's figures over the sales a filter selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorRow {
    pub advisor_id: AdvisorId,
    pub name: String,
    pub commission_rate: Decimal,
    /// Sum of the selected sale amounts.
    pub total_sales: Decimal,
    /// `total_sales * commission_rate / 100`.
    pub total_commission: Decimal,
    /// Number of selected sales.
    pub count: usize,
}

/// Column sums over every row of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrandTotals {
    pub total_sales: Decimal,
    pub total_commission: Decimal,
    pub count: usize,
}

impl GrandTotals {
    /// Folds a row into the running totals.
    pub fn add(&mut self, row: &AdvisorRow) {
        self.total_sales += row.total_sales;
        self.total_commission += row.total_commission;
        self.count += row.count;
    }
}

/// A filtered, aggregated view of the roster.
///
/// Rows keep the order of the advisors they were built from, and `totals` is
/// always the sum of `rows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub filter: ReportFilter,
    pub rows: Vec<AdvisorRow>,
    pub totals: GrandTotals,
}

impl Report {
    /// Creates an empty report for `filter`.
    pub fn new(filter: ReportFilter) -> Self {
        Self {
            filter,
            rows: Vec::new(),
            totals: GrandTotals::default(),
        }
    }

    pub fn push_row(&mut self, row: AdvisorRow) {
        self.totals.add(&row);
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Store-wide figures, independent of any filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub advisor_count: usize,
    pub total_sale_count: usize,
    pub total_commission_all_time: Decimal,
}
