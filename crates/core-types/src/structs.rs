use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of an advisor, unique across the whole ledger.
pub type AdvisorId = u64;

/// Identifier of a sale, unique only within its owning advisor.
pub type SaleId = u64;

/// A salesperson earning commission on the sales attributed to them.
///
/// The serialized field names follow the layout of the persisted blob, so a
/// snapshot written by an earlier version of the tool loads unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisor {
    pub id: AdvisorId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// Percentage in `[0, 100]`.
    #[serde(rename = "porcentajeComision", with = "rust_decimal::serde::arbitrary_precision")]
    pub commission_rate: Decimal,
    #[serde(rename = "ventas", default)]
    pub sales: Vec<Sale>,
    /// The id the next sale added to this advisor will receive.
    /// Older blobs do not carry it; the ledger derives it on load.
    #[serde(rename = "nextSaleId", default)]
    pub next_sale_id: SaleId,
}

impl Advisor {
    /// Creates an advisor with no sales.
    pub fn new(id: AdvisorId, name: String, commission_rate: Decimal) -> Self {
        Self {
            id,
            name,
            commission_rate,
            sales: Vec::new(),
            next_sale_id: 1,
        }
    }

    /// Looks up one of this advisor's sales.
    pub fn sale(&self, sale_id: SaleId) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == sale_id)
    }

    /// The smallest sale id that is greater than every id currently held.
    /// Saturates at `SaleId::MAX`, which is never issued.
    pub fn first_free_sale_id(&self) -> SaleId {
        self.sales
            .iter()
            .map(|s| s.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1)
    }
}

/// A single transaction attributed to one advisor. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "idVenta")]
    pub id: SaleId,
    #[serde(rename = "nombreVenta")]
    pub name: String,
    #[serde(rename = "monto", with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
}

/// A partial update of an advisor's mutable fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvisorUpdate {
    pub name: Option<String>,
    pub commission_rate: Option<Decimal>,
}

impl AdvisorUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn commission_rate(mut self, rate: Decimal) -> Self {
        self.commission_rate = Some(rate);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.commission_rate.is_none()
    }
}

/// The complete persisted state: every advisor plus the advisor id counter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(rename = "asesores", default)]
    pub advisors: Vec<Advisor>,
    #[serde(rename = "nextId", default = "first_advisor_id")]
    pub next_id: AdvisorId,
}

fn first_advisor_id() -> AdvisorId {
    1
}

impl Default for LedgerSnapshot {
    fn default() -> Self {
        Self {
            advisors: Vec::new(),
            next_id: first_advisor_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn snapshot_uses_persisted_field_names() {
        let mut ana = Advisor::new(1, "Ana".to_string(), dec!(10));
        ana.sales.push(Sale {
            id: 1,
            name: "Deal1".to_string(),
            amount: dec!(1000.5),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        });
        let snapshot = LedgerSnapshot {
            advisors: vec![ana],
            next_id: 2,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        let advisor = &json["asesores"][0];
        assert_eq!(json["nextId"], 2);
        assert_eq!(advisor["nombre"], "Ana");
        assert_eq!(advisor["porcentajeComision"], 10.0);
        assert_eq!(advisor["ventas"][0]["idVenta"], 1);
        assert_eq!(advisor["ventas"][0]["nombreVenta"], "Deal1");
        assert_eq!(advisor["ventas"][0]["monto"], 1000.5);
        assert_eq!(advisor["ventas"][0]["fecha"], "2024-01-15");
    }

    #[test]
    fn amounts_and_rates_are_stored_as_exact_numbers() {
        let mut ana = Advisor::new(1, "Ana".to_string(), dec!(33.333333333333333333));
        ana.sales.push(Sale {
            id: 1,
            name: "Deal1".to_string(),
            amount: dec!(1000.123456789012345678),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        });
        let snapshot = LedgerSnapshot {
            advisors: vec![ana],
            next_id: 2,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""porcentajeComision":33.333333333333333333"#));
        assert!(json.contains(r#""monto":1000.123456789012345678"#));

        let restored: LedgerSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn blob_without_counters_falls_back_to_defaults() {
        let json = r#"{"asesores":[{"id":3,"nombre":"Luis","porcentajeComision":12.5,
            "ventas":[{"idVenta":1,"nombreVenta":"Casa","monto":250000,"fecha":"2024-03-01"}]}]}"#;
        let snapshot: LedgerSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.next_id, 1);
        let luis = &snapshot.advisors[0];
        assert_eq!(luis.commission_rate, dec!(12.5));
        assert_eq!(luis.next_sale_id, 0);
        assert_eq!(luis.first_free_sale_id(), 2);
        assert_eq!(luis.sales[0].amount, dec!(250000));
    }

    #[test]
    fn first_free_sale_id_saturates() {
        let mut ana = Advisor::new(1, "Ana".to_string(), dec!(10));
        ana.sales.push(Sale {
            id: SaleId::MAX,
            name: "Edited".to_string(),
            amount: dec!(1),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        });
        assert_eq!(ana.first_free_sale_id(), SaleId::MAX);
    }

    #[test]
    fn empty_object_is_an_empty_snapshot() {
        let snapshot: LedgerSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, LedgerSnapshot::default());
    }
}
