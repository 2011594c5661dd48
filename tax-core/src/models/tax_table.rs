use std::collections::BTreeMap;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{FinancialYear, TaxBracket};

/// Errors raised while building or querying a [`TaxTable`].
///
/// Apart from [`TaxTableError::UnknownYear`], which is produced when a raw
/// identifier is parsed, every variant describes a malformed schedule and is
/// only ever returned by [`TaxTable::new`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxTableError {
    #[error("unknown financial year '{0}'")]
    UnknownYear(String),

    #[error("no brackets defined for {0}")]
    MissingYear(FinancialYear),

    #[error("{year} bracket {index}: min income {min} exceeds max income {max}")]
    InvertedRange {
        year: FinancialYear,
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("{year} bracket {index}: rate {rate} is outside [0, 1]")]
    RateOutOfRange {
        year: FinancialYear,
        index: usize,
        rate: Decimal,
    },

    #[error("{year} bracket {index}: starts at {min}, overlapping the previous bracket ending at {previous_max}")]
    Overlap {
        year: FinancialYear,
        index: usize,
        min: Decimal,
        previous_max: Decimal,
    },

    #[error("{year} bracket {index}: starts at {min}, leaving a gap after the previous bracket ending at {previous_max}")]
    Gap {
        year: FinancialYear,
        index: usize,
        min: Decimal,
        previous_max: Decimal,
    },

    #[error("{year} bracket {index}: only the top bracket may be unbounded")]
    UnboundedBeforeTop { year: FinancialYear, index: usize },

    #[error("{0}: top bracket must be unbounded")]
    BoundedTopBracket(FinancialYear),

    #[error("{year} bracket {index}: base tax {actual} differs from {expected} owed at the previous bracket's max")]
    InconsistentBaseTax {
        year: FinancialYear,
        index: usize,
        expected: Decimal,
        actual: Decimal,
    },
}

/// Bracket schedules for every supported [`FinancialYear`].
///
/// A table can only be obtained through [`TaxTable::new`], which checks that
/// every year is present and that each schedule is ordered, contiguous,
/// capped by a single unbounded bracket and carries consistent base amounts.
/// There is no way to mutate a table once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxTable {
    // indexed by FinancialYear::index
    schedules: Vec<Vec<TaxBracket>>,
}

impl TaxTable {
    /// Builds a table from per-year bracket schedules, in table order.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaxTableError`] found. Years are checked oldest
    /// first and brackets in table order.
    pub fn new(mut schedules: BTreeMap<FinancialYear, Vec<TaxBracket>>) -> Result<Self, TaxTableError> {
        let mut ordered = Vec::with_capacity(FinancialYear::ALL.len());

        for year in FinancialYear::ALL {
            let brackets = schedules
                .remove(&year)
                .filter(|brackets| !brackets.is_empty())
                .ok_or(TaxTableError::MissingYear(year))?;
            validate_schedule(year, &brackets)?;
            ordered.push(brackets);
        }

        Ok(Self { schedules: ordered })
    }

    /// Returns the brackets for `year`, ordered by `min_income`.
    pub fn brackets(
        &self,
        year: FinancialYear,
    ) -> &[TaxBracket] {
        &self.schedules[year.index()]
    }

    /// Looks up a schedule by its identifier, e.g. `"2024-2025"`.
    pub fn lookup(
        &self,
        year: &str,
    ) -> Result<&[TaxBracket], TaxTableError> {
        let year: FinancialYear = year.parse()?;
        Ok(self.brackets(year))
    }

    /// Supported years, oldest first.
    pub fn years(&self) -> impl Iterator<Item = FinancialYear> {
        FinancialYear::ALL.into_iter()
    }
}

fn validate_schedule(
    year: FinancialYear,
    brackets: &[TaxBracket],
) -> Result<(), TaxTableError> {
    let top = brackets.len() - 1;
    let mut previous_max: Option<Decimal> = None;
    let mut owed_at_previous_max = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(TaxTableError::RateOutOfRange {
                year,
                index,
                rate: bracket.tax_rate,
            });
        }

        match bracket.max_income {
            Some(max) if max < bracket.min_income => {
                return Err(TaxTableError::InvertedRange {
                    year,
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            Some(_) if index == top => return Err(TaxTableError::BoundedTopBracket(year)),
            None if index != top => return Err(TaxTableError::UnboundedBeforeTop { year, index }),
            _ => {}
        }

        if let Some(previous_max) = previous_max {
            if bracket.min_income < previous_max {
                return Err(TaxTableError::Overlap {
                    year,
                    index,
                    min: bracket.min_income,
                    previous_max,
                });
            }
            if bracket.min_income - previous_max > Decimal::ONE {
                return Err(TaxTableError::Gap {
                    year,
                    index,
                    min: bracket.min_income,
                    previous_max,
                });
            }
            if bracket.base_tax != owed_at_previous_max {
                return Err(TaxTableError::InconsistentBaseTax {
                    year,
                    index,
                    expected: owed_at_previous_max,
                    actual: bracket.base_tax,
                });
            }
        }

        if let Some(max) = bracket.max_income {
            let floor = previous_max.unwrap_or(Decimal::ZERO);
            owed_at_previous_max = bracket.base_tax + (max - floor) * bracket.tax_rate;
            previous_max = Some(max);
        }
    }

    Ok(())
}
