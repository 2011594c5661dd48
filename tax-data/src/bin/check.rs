use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tax_core::{FinancialYear, TaxBracket};
use tax_data::{RESIDENT_RATES_CSV, TaxBracketLoader};

/// Validate a tax bracket CSV document and summarise its schedules.
///
/// The CSV file should have the following columns:
/// - financial_year: The year identifier (e.g., 2024-2025)
/// - min_income: The minimum income for this bracket
/// - max_income: The maximum income (empty for unlimited)
/// - base_tax: Tax owed on all income below this bracket
/// - rate: The marginal tax rate as a decimal (e.g., 0.30)
///
/// Without `--file` the schedules compiled into the calculator are checked.
#[derive(Parser, Debug)]
#[command(name = "tax-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing tax bracket data
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print every bracket of this financial year (e.g. 2024-2025)
    #[arg(short, long)]
    year: Option<FinancialYear>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let records = match &args.file {
        Some(path) => {
            println!("Checking tax brackets in: {}", path.display());
            let file = File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
            TaxBracketLoader::parse(file).with_context(|| format!("Failed to parse CSV: {}", path.display()))?
        }
        None => {
            println!("Checking built-in resident tax brackets");
            TaxBracketLoader::parse(RESIDENT_RATES_CSV.as_bytes()).context("Failed to parse built-in CSV")?
        }
    };

    println!("Parsed {} records from CSV", records.len());

    let table = TaxBracketLoader::build(&records).context("Tax bracket schedules are invalid")?;

    for year in table.years() {
        let brackets = table.brackets(year);
        let top_rate = brackets.last().map(|b| b.tax_rate).unwrap_or_default();
        println!("  {year}: {} brackets, top rate {top_rate}", brackets.len());
    }

    if let Some(year) = args.year {
        println!();
        print_schedule(year, table.brackets(year));
    }

    println!("All schedules are valid.");

    Ok(())
}

fn print_schedule(
    year: FinancialYear,
    brackets: &[TaxBracket],
) {
    println!("{year}");
    for bracket in brackets {
        let max = bracket
            .max_income
            .map_or_else(|| "and over".to_string(), |max| max.to_string());
        println!(
            "  {:>10} - {:<10} rate {:<6} base {}",
            bracket.min_income, max, bracket.tax_rate, bracket.base_tax
        );
    }
    println!();
}
