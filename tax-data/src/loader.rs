use std::collections::BTreeMap;
use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{FinancialYear, TaxBracket, TaxTable, TaxTableError};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading tax bracket data.
#[derive(Debug, Error)]
pub enum TaxBracketLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("unknown financial year '{year}' on row {row}")]
    UnknownYear { year: String, row: usize },

    #[error("invalid tax table: {0}")]
    Table(#[from] TaxTableError),
}

impl From<csv::Error> for TaxBracketLoaderError {
    fn from(err: csv::Error) -> Self {
        TaxBracketLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a tax bracket CSV document.
///
/// - `financial_year`: the year identifier (e.g. `2024-2025`)
/// - `min_income`: the minimum income for this bracket
/// - `max_income`: the maximum income for this bracket (empty for unlimited)
/// - `base_tax`: tax owed on all income below this bracket
/// - `rate`: the marginal tax rate as a decimal (e.g. 0.30 for 30%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TaxBracketRecord {
    pub financial_year: String,
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub base_tax: Decimal,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

impl From<&TaxBracketRecord> for TaxBracket {
    fn from(record: &TaxBracketRecord) -> Self {
        TaxBracket {
            min_income: record.min_income,
            max_income: record.max_income,
            tax_rate: record.rate,
            base_tax: record.base_tax,
        }
    }
}

/// Loader for tax bracket schedules stored as CSV.
///
/// Rows for a year must appear in bracket order; rows for different years
/// may be interleaved.
pub struct TaxBracketLoader;

impl TaxBracketLoader {
    /// Parse tax bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or
    /// a byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<TaxBracketRecord>, TaxBracketLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: TaxBracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated [`TaxTable`] from parsed records.
    ///
    /// # Errors
    ///
    /// Fails on a row naming an unsupported year, and with
    /// [`TaxBracketLoaderError::Table`] when the resulting schedules do not
    /// pass [`TaxTable::new`] (missing year, overlapping brackets, etc.).
    pub fn build(records: &[TaxBracketRecord]) -> Result<TaxTable, TaxBracketLoaderError> {
        let mut schedules: BTreeMap<FinancialYear, Vec<TaxBracket>> = BTreeMap::new();

        for (position, record) in records.iter().enumerate() {
            let year = FinancialYear::parse(record.financial_year.trim()).ok_or_else(|| {
                TaxBracketLoaderError::UnknownYear {
                    year: record.financial_year.clone(),
                    // header is row 1
                    row: position + 2,
                }
            })?;
            schedules.entry(year).or_default().push(record.into());
        }

        debug!(years = schedules.len(), brackets = records.len(), "grouped bracket records");

        Ok(TaxTable::new(schedules)?)
    }

    /// Parse and build in one step.
    pub fn load<R: Read>(reader: R) -> Result<TaxTable, TaxBracketLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }
}
