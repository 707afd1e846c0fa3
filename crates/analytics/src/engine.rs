use crate::calculator::{commission_on, total_commission_for_advisor};
use crate::filter::ReportFilter;
use crate::report::{AdvisorRow, Report, Summary};
use core_types::Advisor;
use rust_decimal::Decimal;

/// A stateless calculator for deriving commission reports from the roster.
#[derive(Debug, Default)]
pub struct ReportEngine {}

impl ReportEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the filtered report.
    ///
    /// # Arguments
    ///
    /// * `advisors` - The roster, in display order.
    /// * `filter` - Advisor and date-range restrictions.
    ///
    /// # Returns
    ///
    /// A `Report` with one row per selected advisor. Advisors left without any
    /// sale by the date range still get a row of zeros.
    pub fn build_report(&self, advisors: &[Advisor], filter: &ReportFilter) -> Report {
        let mut report = Report::new(*filter);

        for advisor in advisors.iter().filter(|a| filter.selects_advisor(a)) {
            report.push_row(self.advisor_row(advisor, filter));
        }

        tracing::debug!(
            rows = report.rows.len(),
            sales = report.totals.count,
            "Built commission report."
        );
        report
    }

    /// Aggregates one advisor's sales that pass the date range.
    fn advisor_row(&self, advisor: &Advisor, filter: &ReportFilter) -> AdvisorRow {
        let (total_sales, count) = filter
            .matching_sales(advisor)
            .fold((Decimal::ZERO, 0usize), |(sum, n), sale| (sum + sale.amount, n + 1));

        AdvisorRow {
            advisor_id: advisor.id,
            name: advisor.name.clone(),
            commission_rate: advisor.commission_rate,
            total_sales,
            total_commission: commission_on(total_sales, advisor.commission_rate),
            count,
        }
    }

    /// Computes the store-wide summary over every advisor and sale, unfiltered.
    pub fn summary(&self, advisors: &[Advisor]) -> Summary {
        Summary {
            advisor_count: advisors.len(),
            total_sale_count: advisors.iter().map(|a| a.sales.len()).sum(),
            total_commission_all_time: advisors.iter().map(total_commission_for_advisor).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::Sale;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn advisor(id: u64, name: &str, rate: Decimal, sales: &[(Decimal, &str)]) -> Advisor {
        let mut advisor = Advisor::new(id, name.to_string(), rate);
        for (i, (amount, day)) in sales.iter().enumerate() {
            advisor.sales.push(Sale {
                id: i as u64 + 1,
                name: format!("{name} {}", i + 1),
                amount: *amount,
                date: date(day),
            });
        }
        advisor
    }

    fn roster() -> Vec<Advisor> {
        vec![
            advisor(1, "Ana", dec!(10), &[(dec!(1000), "2024-01-15"), (dec!(250.50), "2024-02-01")]),
            advisor(2, "Luis", dec!(5), &[(dec!(400), "2023-12-31")]),
            advisor(3, "Eva", dec!(8), &[]),
        ]
    }

    #[test]
    fn single_advisor_example() {
        let advisors = vec![advisor(1, "Ana", dec!(10), &[(dec!(1000), "2024-01-15")])];
        let report = ReportEngine::new().build_report(&advisors, &ReportFilter::new().advisor(0));

        assert_eq!(report.totals.total_sales, dec!(1000));
        assert_eq!(report.totals.total_commission, dec!(100));
        assert_eq!(report.totals.count, 1);
    }

    #[test]
    fn unfiltered_totals_cover_every_sale() {
        let advisors = roster();
        let report = ReportEngine::new().build_report(&advisors, &ReportFilter::new());

        let all_amounts: Decimal = advisors.iter().flat_map(|a| &a.sales).map(|s| s.amount).sum();
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.totals.total_sales, all_amounts);
        assert_eq!(report.totals.count, 3);
        assert_eq!(report.totals.total_commission, dec!(125.05) + dec!(20));
    }

    #[test]
    fn rows_keep_roster_order_and_include_advisors_without_sales() {
        let report = ReportEngine::new().build_report(&roster(), &ReportFilter::new());
        let names: Vec<&str> = report.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Luis", "Eva"]);

        let eva = &report.rows[2];
        assert_eq!(eva.total_sales, Decimal::ZERO);
        assert_eq!(eva.count, 0);
    }

    #[test]
    fn date_range_zeroes_advisors_whose_sales_fall_outside() {
        let filter = ReportFilter::new().since(date("2024-01-01")).until(date("2024-01-31"));
        let report = ReportEngine::new().build_report(&roster(), &filter);

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.rows[0].total_sales, dec!(1000));
        assert_eq!(report.rows[0].count, 1);
        let luis = &report.rows[1];
        assert_eq!((luis.total_sales, luis.total_commission, luis.count), (Decimal::ZERO, Decimal::ZERO, 0));
        assert_eq!(report.totals.total_sales, dec!(1000));
        assert_eq!(report.totals.count, 1);
    }

    #[test]
    fn advisor_filter_narrows_to_one_row() {
        let report = ReportEngine::new().build_report(&roster(), &ReportFilter::new().advisor(2));
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].name, "Luis");
        assert_eq!(report.totals.total_commission, dec!(20));
    }

    #[test]
    fn unknown_advisor_yields_an_empty_report() {
        let report = ReportEngine::new().build_report(&roster(), &ReportFilter::new().advisor(42));
        assert!(report.is_empty());
        assert_eq!(report.totals, crate::report::GrandTotals::default());
    }

    #[test]
    fn totals_equal_the_sum_of_rows() {
        let filter = ReportFilter::new().since(date("2024-01-20"));
        let report = ReportEngine::new().build_report(&roster(), &filter);

        let sales: Decimal = report.rows.iter().map(|r| r.total_sales).sum();
        let commission: Decimal = report.rows.iter().map(|r| r.total_commission).sum();
        let count: usize = report.rows.iter().map(|r| r.count).sum();
        assert_eq!(report.totals.total_sales, sales);
        assert_eq!(report.totals.total_commission, commission);
        assert_eq!(report.totals.count, count);
    }

    #[test]
    fn summary_ignores_filters() {
        let advisors = roster();
        let engine = ReportEngine::new();
        let narrow = engine.build_report(&advisors, &ReportFilter::new().advisor(3));
        let summary = engine.summary(&advisors);

        assert_eq!(narrow.totals.count, 0);
        assert_eq!(summary.advisor_count, 3);
        assert_eq!(summary.total_sale_count, 3);
        assert_eq!(summary.total_commission_all_time, dec!(145.05));
    }
}
