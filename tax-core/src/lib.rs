pub mod calculations;
pub mod models;

pub use calculations::{DEFAULT_MEDICARE_LEVY_RATE, TaxEngine};
pub use models::*;
