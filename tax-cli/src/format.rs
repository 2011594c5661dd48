//! Australian-style presentation of money and rates.

use rust_decimal::{Decimal, RoundingStrategy};
use tax_core::TaxBracket;
use tax_core::calculations::common::{rate_to_percent, round_to_cents};

/// Inserts a comma between every group of three digits.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_money(
    amount: Decimal,
    dp: u32,
) -> String {
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let text = format!("{:.*}", dp as usize, amount.abs());
    let sign = if negative { "-" } else { "" };
    match text.split_once('.') {
        Some((whole, fraction)) => format!("{sign}${}.{fraction}", group_thousands(whole)),
        None => format!("{sign}${}", group_thousands(&text)),
    }
}

/// Formats an amount as dollars and cents, e.g. `$1,234.56`.
///
/// Negative amounts are written `-$20.00`.
pub fn format_currency(amount: Decimal) -> String {
    format_money(round_to_cents(amount), 2)
}

/// Formats an amount in whole dollars, e.g. `$135,000`.
///
/// Rounds half away from zero, like [`format_currency`].
pub fn format_whole_dollars(amount: Decimal) -> String {
    format_money(amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero), 0)
}

/// Formats a fractional rate as a percentage, e.g. `0.325` becomes `32.5%`.
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", rate_to_percent(rate, 2))
}

/// Formats the income range covered by a bracket.
///
/// The unbounded top bracket is written as `$190,001+`.
pub fn format_range(bracket: &TaxBracket) -> String {
    match bracket.max_income {
        Some(max) => format!(
            "{} - {}",
            format_whole_dollars(bracket.min_income),
            format_whole_dollars(max)
        ),
        None => format!("{}+", format_whole_dollars(bracket.min_income)),
    }
}
