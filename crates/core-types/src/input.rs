//! Conversion of raw text, as typed by a user, into typed field values.
//!
//! Anything that is not a number becomes a validation failure on the field it
//! was meant for, so the presentation layer can report it the same way as an
//! out-of-range value.

use crate::enums::Field;
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Date format used for sale dates everywhere in the tool.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn parse_decimal(field: Field, raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CoreError::InvalidInput(field, format!("'{raw}' is not a number")))
}

/// Parses a commission rate. Range checks are left to the ledger.
pub fn parse_rate(raw: &str) -> Result<Decimal, CoreError> {
    parse_decimal(Field::CommissionRate, raw)
}

/// Parses a sale amount. Sign checks are left to the ledger.
pub fn parse_amount(raw: &str) -> Result<Decimal, CoreError> {
    parse_decimal(Field::Amount, raw)
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| CoreError::InvalidInput(Field::Date, format!("'{raw}': {e}")))
}
