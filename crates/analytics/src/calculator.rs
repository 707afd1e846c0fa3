use core_types::{Advisor, Sale};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const PERCENT: Decimal = dec!(100);

/// Commission earned on `amount` at `rate` percent: `amount * rate / 100`.
pub fn commission_on(amount: Decimal, rate: Decimal) -> Decimal {
    amount * rate / PERCENT
}

/// Commission earned on a single sale.
pub fn commission_for(sale: &Sale, rate: Decimal) -> Decimal {
    commission_on(sale.amount, rate)
}

/// Sum of the commissions on every sale the advisor owns. Zero without sales.
pub fn total_commission_for_advisor(advisor: &Advisor) -> Decimal {
    advisor
        .sales
        .iter()
        .map(|sale| commission_for(sale, advisor.commission_rate))
        .sum()
}

/// Renders a monetary value with exactly two decimals, half away from zero.
/// Display only; never feed the result back into arithmetic.
pub fn format_money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
