//! Flat, display-ready projections of the roster.

use crate::calculator::{commission_for, total_commission_for_advisor};
use core_types::{Advisor, AdvisorId, Sale};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline figures for one advisor over all of their sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorOverview {
    pub advisor_id: AdvisorId,
    pub name: String,
    pub commission_rate: Decimal,
    pub sale_count: usize,
    pub total_commission: Decimal,
}

/// A sale together with the advisor it belongs to and the commission it earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleEntry {
    pub advisor_id: AdvisorId,
    pub advisor_name: String,
    pub commission_rate: Decimal,
    pub sale: Sale,
    pub commission: Decimal,
}

pub fn advisor_overviews(advisors: &[Advisor]) -> Vec<AdvisorOverview> {
    advisors
        .iter()
        .map(|advisor| AdvisorOverview {
            advisor_id: advisor.id,
            name: advisor.name.clone(),
            commission_rate: advisor.commission_rate,
            sale_count: advisor.sales.len(),
            total_commission: total_commission_for_advisor(advisor),
        })
        .collect()
}

/// Every sale in the roster, grouped by advisor in roster order.
pub fn sale_entries(advisors: &[Advisor]) -> Vec<SaleEntry> {
    advisors
        .iter()
        .flat_map(|advisor| {
            advisor.sales.iter().map(move |sale| SaleEntry {
                advisor_id: advisor.id,
                advisor_name: advisor.name.clone(),
                commission_rate: advisor.commission_rate,
                sale: sale.clone(),
                commission: commission_for(sale, advisor.commission_rate),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn roster() -> Vec<Advisor> {
        let mut ana = Advisor::new(1, "Ana".to_string(), dec!(10));
        let mut luis = Advisor::new(2, "Luis".to_string(), dec!(4));
        let record = |advisor: &mut Advisor, amount: Decimal| {
            let id = advisor.sales.len() as u64 + 1;
            advisor.sales.push(Sale {
                id,
                name: format!("Deal{id}"),
                amount,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            });
        };
        record(&mut ana, dec!(300));
        record(&mut ana, dec!(700));
        record(&mut luis, dec!(50));
        vec![ana, luis, Advisor::new(3, "Eva".to_string(), dec!(9))]
    }

    #[test]
    fn overviews_carry_counts_and_commissions() {
        let overviews = advisor_overviews(&roster());
        assert_eq!(overviews.len(), 3);
        assert_eq!(overviews[0].sale_count, 2);
        assert_eq!(overviews[0].total_commission, dec!(100));
        assert_eq!(overviews[1].total_commission, dec!(2));
        assert_eq!(overviews[2].sale_count, 0);
        assert_eq!(overviews[2].total_commission, Decimal::ZERO);
    }

    #[test]
    fn sale_entries_follow_roster_order() {
        let entries = sale_entries(&roster());
        let labels: Vec<(&str, u64)> = entries
            .iter()
            .map(|e| (e.advisor_name.as_str(), e.sale.id))
            .collect();
        assert_eq!(labels, [("Ana", 1), ("Ana", 2), ("Luis", 1)]);
        assert_eq!(entries[1].commission, dec!(70));
    }
}
