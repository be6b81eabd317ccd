//! Monetary arithmetic.
//!
//! All amounts are `rust_decimal::Decimal` and are kept at two decimal
//! places. Rounding happens at the points where the ledger rounds: when a
//! derived price is computed and after every change to revenue.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to two decimal places, half away from zero.
///
/// Zero is always returned as positive zero so it never renders as `-0.00`.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use voyage_ledger::domain::round2;
///
/// let amount = Decimal::new(28_3305, 4); // 28.3305
/// assert_eq!(round2(amount), Decimal::new(2833, 2));
/// ```
pub fn round2(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Apply a percentage adjustment to an amount, then round.
///
/// `percent` is the resulting share of `amount`: 80 yields 80% of the
/// amount, 150 yields 150%. Returns `None` if the result does not fit in a
/// `Decimal`.
pub fn apply_percent(amount: Decimal, percent: i64) -> Option<Decimal> {
    amount.checked_mul(Decimal::new(percent, 2)).map(round2)
}

/// Add two amounts and round, or `None` on overflow.
pub fn checked_sum(a: Decimal, b: Decimal) -> Option<Decimal> {
    a.checked_add(b).map(round2)
}

/// Format an amount with exactly two decimal places.
pub fn format_money(amount: Decimal) -> String {
    format!("{:.2}", round2(amount))
}
