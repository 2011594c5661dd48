//! Terminal front end for the resident income tax calculator.
//!
//! [`app::run`] drives one calculation against any reader and writer, so the
//! binary and the tests share the same prompt flow.

pub mod app;
pub mod format;
pub mod logging;
pub mod report;
pub mod utils;
