mod financial_year;
mod tax_bracket;
mod tax_calculation;
mod tax_table;

pub use financial_year::FinancialYear;
pub use tax_bracket::TaxBracket;
pub use tax_calculation::{CalculateTaxParams, CalculateTaxResult};
pub use tax_table::{TaxTable, TaxTableError};
