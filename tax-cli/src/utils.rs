use rust_decimal::Decimal;
use thiserror::Error;

/// Largest income accepted from a user: one quadrillion dollars.
///
/// Tax and levy rates are both at most 1, so deductions stay within twice
/// this amount, far inside [`Decimal::MAX`].
pub const MAX_INCOME: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Error returned when user input cannot be used as a taxable income.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidIncome {
    #[error("income is required")]
    Empty,

    #[error("'{input}' is not a valid amount")]
    NotANumber { input: String },

    #[error("income cannot be negative (got {0})")]
    Negative(Decimal),

    #[error("income cannot exceed {max} (got {income})")]
    TooLarge { income: Decimal, max: Decimal },
}

/// Strips surrounding whitespace, a leading dollar sign and comma thousands separators.
fn normalize_income_input(s: &str) -> String {
    let trimmed = s.trim();
    trimmed
        .strip_prefix('$')
        .unwrap_or(trimmed)
        .trim_start()
        .replace(',', "")
}

/// Parses a taxable income as typed by a user.
///
/// Accepts plain numbers as well as `"$85,000.50"` style input. Zero is a
/// valid income; empty, non-numeric and negative input are rejected, as is
/// anything above [`MAX_INCOME`].
pub fn parse_income(s: &str) -> Result<Decimal, InvalidIncome> {
    let normalized = normalize_income_input(s);
    if normalized.is_empty() {
        return Err(InvalidIncome::Empty);
    }

    let income: Decimal = normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid income: {}", e);
        InvalidIncome::NotANumber {
            input: s.trim().to_string(),
        }
    })?;

    if income.is_sign_negative() && !income.is_zero() {
        return Err(InvalidIncome::Negative(income));
    }

    if income > MAX_INCOME {
        return Err(InvalidIncome::TooLarge {
            income,
            max: MAX_INCOME,
        });
    }

    Ok(income)
}
