//! Marginal-rate income tax engine.
//!
//! The engine resolves a financial year's bracket schedule from a borrowed
//! [`TaxTable`], locates the bracket containing the income and applies
//!
//! ```text
//! tax = base_tax + (income - previous_max) * tax_rate
//! ```
//!
//! where `previous_max` is the `max_income` of the bracket immediately before
//! the matched one (zero for the first bracket). Because each bracket's
//! `base_tax` is the tax owed at the previous bracket's `max_income`, the
//! result is continuous across bracket boundaries.
//!
//! A flat Medicare levy is charged on the whole income independently of the
//! brackets. Nothing is rounded; callers format for display.
//!
//! # Bracket matching
//!
//! A bracket matches when `min_income <= income <= max_income`, and the
//! first match in table order wins, so when one bracket's `max_income`
//! equals the next one's `min_income` the lower bracket takes the boundary.
//! Schedules published in whole dollars start each bracket one dollar above
//! the previous maximum; a fractional income inside that seam (for example
//! `45000.50`) is attributed to the lower bracket. Income below the lowest
//! bracket matches nothing and owes no tax.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use rust_decimal_macros::dec;
//! use tax_core::{CalculateTaxParams, FinancialYear, TaxBracket, TaxEngine, TaxTable};
//!
//! let schedule = vec![
//!     TaxBracket { min_income: dec!(0), max_income: Some(dec!(18200)), tax_rate: dec!(0), base_tax: dec!(0) },
//!     TaxBracket { min_income: dec!(18201), max_income: Some(dec!(45000)), tax_rate: dec!(0.16), base_tax: dec!(0) },
//!     TaxBracket { min_income: dec!(45001), max_income: None, tax_rate: dec!(0.30), base_tax: dec!(4288) },
//! ];
//! let schedules: BTreeMap<_, _> = FinancialYear::ALL
//!     .into_iter()
//!     .map(|year| (year, schedule.clone()))
//!     .collect();
//! let table = TaxTable::new(schedules).unwrap();
//!
//! let engine = TaxEngine::new(&table);
//! let params = CalculateTaxParams::new(FinancialYear::Fy2025, dec!(50000));
//!
//! assert_eq!(engine.calculate_tax(&params), dec!(5788));
//!
//! let result = engine.calculate_tax_result(&params);
//! assert_eq!(result.medicare_levy, dec!(1000));
//! assert_eq!(result.net_income, dec!(43212));
//! assert_eq!(result.tax_bracket_index, Some(2));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::models::{CalculateTaxParams, CalculateTaxResult, TaxBracket, TaxTable};

/// Medicare levy charged on taxable income (2%).
pub const DEFAULT_MEDICARE_LEVY_RATE: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// Calculator over a borrowed, immutable [`TaxTable`].
///
/// The engine holds no mutable state; one instance can serve any number of
/// threads at once.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    table: &'a TaxTable,
    medicare_levy_rate: Decimal,
}

impl<'a> TaxEngine<'a> {
    /// Creates an engine charging [`DEFAULT_MEDICARE_LEVY_RATE`].
    pub fn new(table: &'a TaxTable) -> Self {
        Self {
            table,
            medicare_levy_rate: DEFAULT_MEDICARE_LEVY_RATE,
        }
    }

    /// Replaces the Medicare levy rate, expressed as a fraction (0.02 for 2%).
    pub fn with_levy_rate(
        mut self,
        medicare_levy_rate: Decimal,
    ) -> Self {
        self.medicare_levy_rate = medicare_levy_rate;
        self
    }

    pub fn levy_rate(&self) -> Decimal {
        self.medicare_levy_rate
    }

    /// Returns the bracket containing the income, if any.
    pub fn find_bracket(
        &self,
        params: &CalculateTaxParams,
    ) -> Option<&'a TaxBracket> {
        let brackets = self.table.brackets(params.financial_year);
        bracket_index(brackets, params.income).map(|index| &brackets[index])
    }

    /// Returns the position of the bracket containing the income, if any.
    pub fn find_bracket_index(
        &self,
        params: &CalculateTaxParams,
    ) -> Option<usize> {
        bracket_index(self.table.brackets(params.financial_year), params.income)
    }

    /// Calculates income tax owed. Income below the lowest bracket owes zero.
    pub fn calculate_tax(
        &self,
        params: &CalculateTaxParams,
    ) -> Decimal {
        let brackets = self.table.brackets(params.financial_year);

        let Some(index) = bracket_index(brackets, params.income) else {
            debug!(
                year = %params.financial_year,
                income = %params.income,
                "income below lowest bracket, no tax owed"
            );
            return Decimal::ZERO;
        };

        let bracket = &brackets[index];
        let previous_max = index
            .checked_sub(1)
            .and_then(|previous| brackets[previous].max_income)
            .unwrap_or(Decimal::ZERO);

        let tax = bracket.base_tax + (params.income - previous_max) * bracket.tax_rate;
        trace!(
            year = %params.financial_year,
            income = %params.income,
            index,
            %tax,
            "calculated income tax"
        );
        tax
    }

    /// Calculates the flat Medicare levy on the whole income.
    ///
    /// Not clamped: a negative income yields a negative levy.
    pub fn calculate_medicare_levy(
        &self,
        params: &CalculateTaxParams,
    ) -> Decimal {
        params.income * self.medicare_levy_rate
    }

    /// Calculates tax, levy, deductions and net income in one pass.
    ///
    /// # Panics
    ///
    /// Panics if `income_tax + medicare_levy` exceeds [`Decimal::MAX`], which
    /// needs an income within a small factor of it. Bound user input first.
    pub fn calculate_tax_result(
        &self,
        params: &CalculateTaxParams,
    ) -> CalculateTaxResult {
        let tax_table = self.table.brackets(params.financial_year);
        let tax_bracket_index = bracket_index(tax_table, params.income);

        let income_tax = self.calculate_tax(params);
        let medicare_levy = self.calculate_medicare_levy(params);
        let deductions = income_tax + medicare_levy;

        debug!(
            year = %params.financial_year,
            income = %params.income,
            ?tax_bracket_index,
            %deductions,
            "calculated tax result"
        );

        CalculateTaxResult {
            financial_year: params.financial_year,
            income: params.income,
            income_tax,
            medicare_levy,
            deductions,
            net_income: params.income - deductions,
            tax_bracket_index,
            tax_table: tax_table.to_vec(),
        }
    }
}

fn bracket_index(
    brackets: &[TaxBracket],
    income: Decimal,
) -> Option<usize> {
    brackets
        .iter()
        .position(|bracket| bracket.contains(income))
        .or_else(|| {
            // fractional income between one bracket's max and the next one's min
            brackets.windows(2).position(|pair| {
                pair[0].max_income.is_some_and(|max| income > max) && income < pair[1].min_income
            })
        })
}
