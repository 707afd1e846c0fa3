use chrono::NaiveDate;
use core_types::{Advisor, AdvisorId, Sale};
use serde::{Deserialize, Serialize};

/// Selects which advisors and which of their sales a report or export covers.
///
/// The default filter selects everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFilter {
    /// Restricts to a single advisor. `None` and `Some(0)` both mean "all advisors".
    pub advisor_id: Option<AdvisorId>,
    /// Inclusive lower bound on the sale date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the sale date.
    pub date_to: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advisor(mut self, advisor_id: AdvisorId) -> Self {
        self.advisor_id = Some(advisor_id);
        self
    }

    /// Sets the inclusive lower bound on the sale date.
    pub fn since(mut self, date: NaiveDate) -> Self {
        self.date_from = Some(date);
        self
    }

    /// Sets the inclusive upper bound on the sale date.
    pub fn until(mut self, date: NaiveDate) -> Self {
        self.date_to = Some(date);
        self
    }

    /// The advisor the filter narrows to, if any. Zero is treated as "no restriction".
    pub fn restricted_advisor(&self) -> Option<AdvisorId> {
        self.advisor_id.filter(|id| *id > 0)
    }

    pub fn selects_advisor(&self, advisor: &Advisor) -> bool {
        self.restricted_advisor().is_none_or(|id| id == advisor.id)
    }

    /// Whether a sale date lies within the (inclusive) date range.
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }

    pub fn selects_sale(&self, sale: &Sale) -> bool {
        self.includes_date(sale.date)
    }

    /// The advisor's sales that fall within the date range, in their original order.
    pub fn matching_sales<'a>(&'a self, advisor: &'a Advisor) -> impl Iterator<Item = &'a Sale> + 'a {
        advisor.sales.iter().filter(move |sale| self.selects_sale(sale))
    }
}
