//! Income tax calculations.
//!
//! [`engine`] holds the bracket lookup and the tax, levy and net income
//! arithmetic; [`common`] holds helpers shared with presentation code.

pub mod common;
pub mod engine;

pub use engine::{DEFAULT_MEDICARE_LEVY_RATE, TaxEngine};
