use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tax_core::{CalculateTaxParams, CalculateTaxResult, FinancialYear, TaxEngine, TaxTable};
use tracing::{debug, info};

use crate::report;
use crate::utils::parse_income;

/// How a calculation should be written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One run of the calculator.
///
/// `year` and `income` are prompted for when absent.
#[derive(Debug, Clone)]
pub struct Request {
    pub year: Option<FinancialYear>,
    pub income: Option<String>,
    pub default_year: FinancialYear,
    pub format: OutputFormat,
    pub breakdown: bool,
}

impl Request {
    pub fn new(default_year: FinancialYear) -> Self {
        Self {
            year: None,
            income: None,
            default_year,
            format: OutputFormat::default(),
            breakdown: false,
        }
    }
}

/// The financial year in progress on `today`, or the newest supported year
/// when `today` is outside the table.
pub fn default_year(today: NaiveDate) -> FinancialYear {
    FinancialYear::containing(today).unwrap_or(FinancialYear::LATEST)
}

/// Checks a Medicare levy rate given as a fraction lies in `[0, 1]`.
pub fn validate_levy_rate(rate: Decimal) -> Result<Decimal> {
    if (rate.is_sign_negative() && !rate.is_zero()) || rate > Decimal::ONE {
        bail!("Medicare levy rate must be between 0 and 1, got {rate}");
    }
    Ok(rate)
}

/// Writes every financial year in the table, one per line, oldest first.
pub fn list_years<W: Write>(
    table: &TaxTable,
    output: &mut W,
) -> Result<()> {
    for year in table.years() {
        writeln!(output, "{year}")?;
    }
    output.flush()?;
    Ok(())
}

fn supported_years() -> String {
    FinancialYear::ALL
        .iter()
        .map(FinancialYear::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Writes `message` and reads one line of input. Fails on end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    message: &str,
) -> Result<String> {
    write!(output, "{message}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line).context("Failed to read input")? == 0 {
        bail!("No input received");
    }
    Ok(line.trim().to_string())
}

fn prompt_year<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default_year: FinancialYear,
) -> Result<FinancialYear> {
    let answer = prompt(
        input,
        output,
        &format!("Enter the income year (e.g. {}) [{default_year}]: ", FinancialYear::LATEST),
    )?;
    if answer.is_empty() {
        return Ok(default_year);
    }
    answer
        .parse()
        .with_context(|| format!("Supported years: {}", supported_years()))
}

/// Resolves the year and income, runs the calculation and writes the report.
pub fn run<R: BufRead, W: Write>(
    engine: &TaxEngine<'_>,
    request: &Request,
    input: &mut R,
    output: &mut W,
) -> Result<CalculateTaxResult> {
    let financial_year = match request.year {
        Some(year) => year,
        None => prompt_year(input, output, request.default_year)?,
    };

    let raw_income = match &request.income {
        Some(income) => income.clone(),
        None => prompt(input, output, "Enter your total taxable income: ")?,
    };
    let income = parse_income(&raw_income).context("Invalid taxable income")?;
    debug!(year = %financial_year, %income, "resolved calculation inputs");

    let result = engine.calculate_tax_result(&CalculateTaxParams::new(financial_year, income));
    info!(
        year = %financial_year,
        bracket = ?result.tax_bracket_index,
        "calculation complete"
    );

    match request.format {
        OutputFormat::Json => report::render_json(&result, output)?,
        OutputFormat::Text => {
            report::render_summary(&result, output)?;
            if request.breakdown {
                report::render_breakdown(&result, output)?;
            }
        }
    }
    output.flush()?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(
        year: i32,
        month: u32,
        day: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn default_year_follows_the_calendar() {
        assert_eq!(default_year(date(2024, 6, 30)), FinancialYear::Fy2024);
        assert_eq!(default_year(date(2024, 7, 1)), FinancialYear::Fy2025);
        assert_eq!(default_year(date(2026, 3, 15)), FinancialYear::Fy2026);
    }

    #[test]
    fn default_year_falls_back_to_latest() {
        assert_eq!(default_year(date(2030, 1, 1)), FinancialYear::LATEST);
        assert_eq!(default_year(date(2010, 1, 1)), FinancialYear::LATEST);
    }

    #[test]
    fn validate_levy_rate_accepts_the_closed_unit_range() {
        for rate in [dec!(0), dec!(0.02), dec!(0.015), dec!(1)] {
            assert_eq!(validate_levy_rate(rate).unwrap(), rate);
        }
    }

    #[test]
    fn validate_levy_rate_rejects_out_of_range() {
        for rate in [dec!(-0.01), dec!(1.01), dec!(2)] {
            let err = validate_levy_rate(rate).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("Medicare levy rate must be between 0 and 1, got {rate}")
            );
        }
    }

    #[test]
    fn list_years_prints_each_year_on_its_own_line() {
        let table = tax_data::resident_rates().unwrap();
        let mut output = Vec::new();

        list_years(&table, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "2021-2022\n2022-2023\n2023-2024\n2024-2025\n2025-2026\n"
        );
    }

    #[test]
    fn supported_years_lists_every_year_in_order() {
        assert_eq!(
            supported_years(),
            "2021-2022, 2022-2023, 2023-2024, 2024-2025, 2025-2026"
        );
    }

    #[test]
    fn prompt_trims_the_answer() {
        let mut input = "  2024-2025 \n".as_bytes();
        let mut output = Vec::new();

        let answer = prompt(&mut input, &mut output, "Year? ").unwrap();

        assert_eq!(answer, "2024-2025");
        assert_eq!(String::from_utf8(output).unwrap(), "Year? ");
    }

    #[test]
    fn prompt_fails_at_end_of_input() {
        let mut input = "".as_bytes();
        let mut output = Vec::new();

        let err = prompt(&mut input, &mut output, "Year? ").unwrap_err();

        assert_eq!(err.to_string(), "No input received");
    }
}
