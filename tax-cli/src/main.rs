use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use rust_decimal::Decimal;
use tracing::debug;

use tax_cli::app::{self, OutputFormat, Request};
use tax_cli::logging;
use tax_core::{DEFAULT_MEDICARE_LEVY_RATE, FinancialYear, TaxEngine};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Australian resident income tax calculator.
///
/// Works out income tax, Medicare levy and net income for a financial year.
/// Anything not given on the command line is prompted for.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version, about)]
struct Cli {
    /// Financial year, e.g. 2024-2025. Defaults to the current year when prompted.
    #[arg(short, long)]
    year: Option<FinancialYear>,

    /// Taxable income, e.g. 85000 or "$85,000.50".
    #[arg(short, long, allow_hyphen_values = true)]
    income: Option<String>,

    /// Print the unrounded result as JSON.
    #[arg(long, conflicts_with = "breakdown")]
    json: bool,

    /// Also print the year's brackets, marking the one the income falls in.
    #[arg(long)]
    breakdown: bool,

    /// List the supported financial years and exit.
    #[arg(long)]
    list_years: bool,

    /// Medicare levy rate as a fraction.
    #[arg(long, default_value_t = DEFAULT_MEDICARE_LEVY_RATE)]
    levy_rate: Decimal,

    /// Log level or filter directive. `RUST_LOG` takes precedence.
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Append log records to this file as well as stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(&cli.log_level, cli.log_file.as_deref())?;

    let table = tax_data::resident_rates().context("Built-in tax rates are invalid")?;

    let mut output = io::stdout().lock();

    if cli.list_years {
        return app::list_years(&table, &mut output);
    }

    let levy_rate = app::validate_levy_rate(cli.levy_rate)?;
    debug!(%levy_rate, "using Medicare levy rate");

    let engine = TaxEngine::new(&table).with_levy_rate(levy_rate);

    let request = Request {
        year: cli.year,
        income: cli.income,
        format: if cli.json { OutputFormat::Json } else { OutputFormat::Text },
        breakdown: cli.breakdown,
        ..Request::new(app::default_year(Local::now().date_naive()))
    };

    let mut input = io::stdin().lock();
    app::run(&engine, &request, &mut input, &mut output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_year_and_income() {
        let cli = Cli::try_parse_from(["tax-calc", "-y", "2024-2025", "-i", "$50,000"]).unwrap();

        assert_eq!(cli.year, Some(FinancialYear::Fy2025));
        assert_eq!(cli.income.as_deref(), Some("$50,000"));
        assert_eq!(cli.levy_rate, DEFAULT_MEDICARE_LEVY_RATE);
    }

    #[test]
    fn cli_rejects_unknown_year() {
        assert!(Cli::try_parse_from(["tax-calc", "--year", "2019-2020"]).is_err());
    }

    #[test]
    fn cli_json_conflicts_with_breakdown() {
        assert!(Cli::try_parse_from(["tax-calc", "--json", "--breakdown"]).is_err());
    }
}
