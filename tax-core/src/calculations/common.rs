//! Rounding helpers for presenting calculated amounts.
//!
//! The engine never rounds; these helpers are for callers that show amounts
//! in whole cents and rates as percentages.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole cents, half away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_to_cents;
///
/// assert_eq!(round_to_cents(dec!(5788.2997)), dec!(5788.30));
/// assert_eq!(round_to_cents(dec!(4288.085)), dec!(4288.09));
/// assert_eq!(round_to_cents(dec!(-20.005)), dec!(-20.01)); // Away from zero
/// ```
pub fn round_to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a fractional rate to a percentage rounded to `dp` places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::rate_to_percent;
///
/// assert_eq!(rate_to_percent(dec!(0.325), 1), dec!(32.5));
/// assert_eq!(rate_to_percent(dec!(0.0144), 2), dec!(1.44));
/// ```
pub fn rate_to_percent(
    rate: Decimal,
    dp: u32,
) -> Decimal {
    (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
}
