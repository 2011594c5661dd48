//! Rendering of a [`CalculateTaxResult`] for the terminal or as JSON.

use std::io::{self, Write};

use tax_core::CalculateTaxResult;

use crate::format::{format_currency, format_percent, format_range};

const LABEL_WIDTH: usize = 21;

/// Writes the headline figures of a calculation.
pub fn render_summary<W: Write>(
    result: &CalculateTaxResult,
    out: &mut W,
) -> io::Result<()> {
    let effective_rate = result
        .effective_tax_rate()
        .map_or_else(|| "n/a".to_string(), format_percent);

    writeln!(out)?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Income year:", result.financial_year)?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Taxable income:", format_currency(result.income))?;
    writeln!(out)?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Income tax:", format_currency(result.income_tax))?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Medicare levy:", format_currency(result.medicare_levy))?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Total deductions:", format_currency(result.deductions))?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Net income:", format_currency(result.net_income))?;
    writeln!(out)?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Effective tax rate:", effective_rate)?;
    writeln!(out, "{:<LABEL_WIDTH$}{}", "Marginal tax rate:", format_percent(result.marginal_rate()))?;
    Ok(())
}

/// Writes the year's schedule with the matched bracket marked by `>`.
pub fn render_breakdown<W: Write>(
    result: &CalculateTaxResult,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Tax brackets for {}", result.financial_year)?;
    writeln!(out, "     {:<24} {:>7}  {:>12}", "Taxable income", "Rate", "Base tax")?;

    for (index, bracket) in result.tax_table.iter().enumerate() {
        let marker = if result.tax_bracket_index == Some(index) { ">" } else { " " };
        writeln!(
            out,
            "  {marker}  {:<24} {:>7}  {:>12}",
            format_range(bracket),
            format_percent(bracket.tax_rate),
            format_currency(bracket.base_tax)
        )?;
    }

    if result.tax_bracket_index.is_none() {
        writeln!(out)?;
        writeln!(out, "Income is below the lowest bracket; no income tax applies.")?;
    }
    Ok(())
}

/// Writes the unrounded result as pretty-printed JSON.
pub fn render_json<W: Write>(
    result: &CalculateTaxResult,
    out: &mut W,
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tax_core::{FinancialYear, TaxBracket};

    use super::*;

    fn schedule() -> Vec<TaxBracket> {
        vec![
            TaxBracket {
                min_income: dec!(0),
                max_income: Some(dec!(18200)),
                tax_rate: dec!(0),
                base_tax: dec!(0),
            },
            TaxBracket {
                min_income: dec!(18201),
                max_income: None,
                tax_rate: dec!(0.16),
                base_tax: dec!(0),
            },
        ]
    }

    fn result(
        income: Decimal,
        income_tax: Decimal,
        tax_bracket_index: Option<usize>,
    ) -> CalculateTaxResult {
        let medicare_levy = income * dec!(0.02);
        CalculateTaxResult {
            financial_year: FinancialYear::Fy2025,
            income,
            income_tax,
            medicare_levy,
            deductions: income_tax + medicare_levy,
            net_income: income - income_tax - medicare_levy,
            tax_bracket_index,
            tax_table: schedule(),
        }
    }

    fn render(f: impl Fn(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn summary_lists_every_figure() {
        let result = result(dec!(20000), dec!(288), Some(1));

        let text = render(|out| render_summary(&result, out));

        assert!(text.contains("Income year:         2024-2025"), "{text}");
        assert!(text.contains("Taxable income:      $20,000.00"), "{text}");
        assert!(text.contains("Income tax:          $288.00"), "{text}");
        assert!(text.contains("Medicare levy:       $400.00"), "{text}");
        assert!(text.contains("Total deductions:    $688.00"), "{text}");
        assert!(text.contains("Net income:          $19,312.00"), "{text}");
        assert!(text.contains("Effective tax rate:  1.44%"), "{text}");
        assert!(text.contains("Marginal tax rate:   16%"), "{text}");
    }

    #[test]
    fn summary_for_zero_income_has_no_effective_rate() {
        let result = result(dec!(0), dec!(0), Some(0));

        let text = render(|out| render_summary(&result, out));

        assert!(text.contains("Effective tax rate:  n/a"), "{text}");
        assert!(text.contains("Marginal tax rate:   0%"), "{text}");
    }

    #[test]
    fn breakdown_marks_matched_bracket() {
        let result = result(dec!(20000), dec!(288), Some(1));

        let text = render(|out| render_breakdown(&result, out));
        let marked: Vec<&str> = text.lines().filter(|line| line.starts_with("  >")).collect();

        assert_eq!(marked.len(), 1, "{text}");
        assert!(marked[0].contains("$18,201+"), "{text}");
        assert!(marked[0].contains("16%"), "{text}");
        assert!(!text.contains("below the lowest bracket"));
    }

    #[test]
    fn breakdown_notes_income_below_every_bracket() {
        let result = result(dec!(-10), dec!(0), None);

        let text = render(|out| render_breakdown(&result, out));

        assert!(!text.lines().any(|line| line.starts_with("  >")), "{text}");
        assert!(text.contains("no income tax applies"), "{text}");
    }

    #[test]
    fn json_keeps_unrounded_figures() {
        let result = result(dec!(45000.50), dec!(4288.08), Some(1));

        let text = render(|out| render_json(&result, out));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["financial_year"], "2024-2025");
        assert_eq!(value["tax_bracket_index"], 1);
        assert_eq!(value["tax_table"].as_array().map(Vec::len), Some(2));
        let levy: Decimal = value["medicare_levy"].as_str().unwrap().parse().unwrap();
        assert_eq!(levy, dec!(900.01));
    }
}
