//! Field rules shared by advisor creation, advisor updates and sale creation.

use crate::enums::Field;
use crate::error::CoreError;
use crate::structs::LedgerSnapshot;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Upper bound of a commission rate, in percent.
pub const MAX_COMMISSION_RATE: Decimal = dec!(100);

/// Upper bound of a single sale amount.
///
/// Keeps `amount * rate` and every report total far inside the range of `Decimal`,
/// whose arithmetic panics on overflow.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Trims a name and rejects it when nothing is left.
pub fn validate_name(field: Field, raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(field, "must not be empty".to_string()));
    }
    Ok(trimmed.to_string())
}

/// Accepts a commission rate in the closed range `[0, 100]`.
pub fn validate_rate(rate: Decimal) -> Result<Decimal, CoreError> {
    if rate < Decimal::ZERO || rate > MAX_COMMISSION_RATE {
        return Err(CoreError::InvalidInput(
            Field::CommissionRate,
            format!("{rate} is outside the range 0-100"),
        ));
    }
    Ok(rate)
}

/// Accepts a strictly positive sale amount no larger than [`MAX_AMOUNT`].
pub fn validate_amount(amount: Decimal) -> Result<Decimal, CoreError> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::InvalidInput(
            Field::Amount,
            format!("{amount} must be greater than zero"),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(CoreError::InvalidInput(
            Field::Amount,
            format!("{amount} exceeds the maximum of {MAX_AMOUNT}"),
        ));
    }
    Ok(amount)
}

/// Checks the rates and amounts of a persisted snapshot with the same rules
/// that guard new input, so a hand-edited document cannot smuggle in values the
/// ledger would have refused.
pub fn validate_snapshot(snapshot: &LedgerSnapshot) -> Result<(), CoreError> {
    for advisor in &snapshot.advisors {
        validate_rate(advisor.commission_rate)?;
        for sale in &advisor.sales {
            validate_amount(sale.amount)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed() {
        assert_eq!(validate_name(Field::AdvisorName, "  Ana \n").unwrap(), "Ana");
    }

    #[test]
    fn blank_names_are_rejected() {
        let err = validate_name(Field::SaleName, "   ").unwrap_err();
        assert_eq!(err.field(), Field::SaleName);
    }

    #[test]
    fn rate_bounds_are_inclusive() {
        assert!(validate_rate(dec!(0)).is_ok());
        assert!(validate_rate(dec!(100)).is_ok());
        assert!(validate_rate(dec!(100.01)).is_err());
        assert!(validate_rate(dec!(-0.5)).is_err());
    }

    #[test]
    fn amount_must_be_positive() {
        assert!(validate_amount(dec!(0.01)).is_ok());
        assert!(validate_amount(dec!(0)).is_err());
        assert!(validate_amount(dec!(-10)).is_err());
    }

    #[test]
    fn amounts_beyond_the_ceiling_are_rejected() {
        assert_eq!(validate_amount(MAX_AMOUNT).unwrap(), MAX_AMOUNT);
        let err = validate_amount(MAX_AMOUNT + dec!(0.01)).unwrap_err();
        assert_eq!(err.field(), Field::Amount);
        assert!(validate_amount(Decimal::MAX).is_err());
        assert!(validate_amount(Decimal::from_scientific("1e28").unwrap()).is_err());
    }

    #[test]
    fn snapshots_are_checked_field_by_field() {
        use crate::structs::{Advisor, Sale};
        use chrono::NaiveDate;

        let mut ana = Advisor::new(1, "Ana".to_string(), dec!(10));
        ana.sales.push(Sale {
            id: 1,
            name: "Deal1".to_string(),
            amount: dec!(1000),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        });
        let mut snapshot = LedgerSnapshot {
            advisors: vec![ana],
            next_id: 2,
        };
        assert!(validate_snapshot(&snapshot).is_ok());

        snapshot.advisors[0].sales[0].amount = Decimal::MAX;
        assert_eq!(validate_snapshot(&snapshot).unwrap_err().field(), Field::Amount);

        snapshot.advisors[0].sales[0].amount = dec!(1000);
        snapshot.advisors[0].commission_rate = dec!(250);
        assert_eq!(
            validate_snapshot(&snapshot).unwrap_err().field(),
            Field::CommissionRate
        );
    }
}
