//! Bracket schedules for Australian resident income tax.
//!
//! The published ATO schedules are compiled into the crate as a CSV document
//! and turned into a validated [`TaxTable`] by [`resident_rates`]. The
//! [`TaxBracketLoader`] used for that is public so other schedule documents
//! in the same format can be checked and loaded.

mod loader;

pub use loader::{TaxBracketLoader, TaxBracketLoaderError, TaxBracketRecord};
use tax_core::TaxTable;
use tracing::info;

/// Resident marginal rates, 2021-2022 to 2025-2026.
///
/// Source: <https://www.ato.gov.au/tax-rates-and-codes/tax-rates-australian-residents>
pub const RESIDENT_RATES_CSV: &str = include_str!("../data/resident_rates.csv");

/// Builds the table of resident marginal rates.
///
/// Call once at startup and share the result; the table is immutable.
///
/// # Errors
///
/// Only fails if the embedded document is malformed, which is a build
/// defect rather than a runtime condition.
pub fn resident_rates() -> Result<TaxTable, TaxBracketLoaderError> {
    let table = TaxBracketLoader::load(RESIDENT_RATES_CSV.as_bytes())?;
    info!(years = table.years().count(), "loaded resident tax rates");
    Ok(table)
}
