use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate tier of a financial year's schedule.
///
/// `base_tax` is the cumulative tax owed on all income up to this bracket's
/// floor. A `max_income` of `None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
    pub base_tax: Decimal,
}

impl TaxBracket {
    /// Returns true when `min_income <= income <= max_income`.
    pub fn contains(
        &self,
        income: Decimal,
    ) -> bool {
        income >= self.min_income && self.max_income.is_none_or(|max| income <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_income.is_none()
    }
}
