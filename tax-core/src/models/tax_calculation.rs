use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{FinancialYear, TaxBracket};

/// Input to every engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateTaxParams {
    pub financial_year: FinancialYear,
    pub income: Decimal,
}

impl CalculateTaxParams {
    pub fn new(
        financial_year: FinancialYear,
        income: Decimal,
    ) -> Self {
        Self {
            financial_year,
            income,
        }
    }
}

/// Full breakdown of a calculation, unrounded.
///
/// Carries the year's whole schedule so a caller can show which bracket the
/// income falls in without going back to the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateTaxResult {
    pub financial_year: FinancialYear,
    pub income: Decimal,
    pub income_tax: Decimal,
    pub medicare_levy: Decimal,

    /// Income tax plus Medicare levy.
    pub deductions: Decimal,

    /// Income minus deductions.
    pub net_income: Decimal,

    /// Position of the matched bracket in `tax_table`, or `None` when the
    /// income is below the lowest bracket.
    pub tax_bracket_index: Option<usize>,

    pub tax_table: Vec<TaxBracket>,
}

impl CalculateTaxResult {
    /// The bracket the income fell in.
    pub fn bracket(&self) -> Option<&TaxBracket> {
        self.tax_bracket_index
            .and_then(|index| self.tax_table.get(index))
    }

    /// Rate applied to the next dollar earned, zero when no bracket matched.
    pub fn marginal_rate(&self) -> Decimal {
        self.bracket()
            .map_or(Decimal::ZERO, |bracket| bracket.tax_rate)
    }

    /// Income tax as a fraction of income. `None` for zero or negative income.
    pub fn effective_tax_rate(&self) -> Option<Decimal> {
        if self.income <= Decimal::ZERO {
            return None;
        }
        self.income_tax.checked_div(self.income)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn result_for(
        income: Decimal,
        income_tax: Decimal,
        tax_bracket_index: Option<usize>,
    ) -> CalculateTaxResult {
        CalculateTaxResult {
            financial_year: FinancialYear::Fy2025,
            income,
            income_tax,
            medicare_levy: income * dec!(0.02),
            deductions: income_tax + income * dec!(0.02),
            net_income: income - income_tax - income * dec!(0.02),
            tax_bracket_index,
            tax_table: vec![
                TaxBracket {
                    min_income: dec!(0),
                    max_income: Some(dec!(18200)),
                    tax_rate: dec!(0),
                    base_tax: dec!(0),
                },
                TaxBracket {
                    min_income: dec!(18201),
                    max_income: None,
                    tax_rate: dec!(0.16),
                    base_tax: dec!(0),
                },
            ],
        }
    }

    #[test]
    fn bracket_resolves_index() {
        let result = result_for(dec!(20000), dec!(288), Some(1));

        assert_eq!(result.bracket().map(|b| b.min_income), Some(dec!(18201)));
        assert_eq!(result.marginal_rate(), dec!(0.16));
    }

    #[test]
    fn unmatched_income_has_no_bracket_and_zero_marginal_rate() {
        let result = result_for(dec!(-1000), dec!(0), None);

        assert_eq!(result.bracket(), None);
        assert_eq!(result.marginal_rate(), dec!(0));
    }

    #[test]
    fn effective_tax_rate_divides_tax_by_income() {
        let result = result_for(dec!(20000), dec!(288), Some(1));

        assert_eq!(result.effective_tax_rate(), Some(dec!(0.0144)));
    }

    #[test]
    fn effective_tax_rate_is_none_without_positive_income() {
        assert_eq!(result_for(dec!(0), dec!(0), Some(0)).effective_tax_rate(), None);
        assert_eq!(result_for(dec!(-5), dec!(0), None).effective_tax_rate(), None);
    }
}
