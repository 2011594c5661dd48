use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::TaxTableError;

/// An Australian financial year, running 1 July to 30 June.
///
/// Variants are named after the calendar year in which the financial year
/// ends, so `Fy2025` is the 2024-2025 income year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FinancialYear {
    #[serde(rename = "2021-2022")]
    Fy2022,
    #[serde(rename = "2022-2023")]
    Fy2023,
    #[serde(rename = "2023-2024")]
    Fy2024,
    #[serde(rename = "2024-2025")]
    Fy2025,
    #[serde(rename = "2025-2026")]
    Fy2026,
}

impl FinancialYear {
    /// Every supported year, oldest first.
    pub const ALL: [FinancialYear; 5] = [
        Self::Fy2022,
        Self::Fy2023,
        Self::Fy2024,
        Self::Fy2025,
        Self::Fy2026,
    ];

    pub const LATEST: FinancialYear = Self::Fy2026;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fy2022 => "2021-2022",
            Self::Fy2023 => "2022-2023",
            Self::Fy2024 => "2023-2024",
            Self::Fy2025 => "2024-2025",
            Self::Fy2026 => "2025-2026",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "2021-2022" => Some(Self::Fy2022),
            "2022-2023" => Some(Self::Fy2023),
            "2023-2024" => Some(Self::Fy2024),
            "2024-2025" => Some(Self::Fy2025),
            "2025-2026" => Some(Self::Fy2026),
            _ => None,
        }
    }

    /// Calendar year in which this financial year ends (30 June).
    pub fn ending_year(&self) -> i32 {
        match self {
            Self::Fy2022 => 2022,
            Self::Fy2023 => 2023,
            Self::Fy2024 => 2024,
            Self::Fy2025 => 2025,
            Self::Fy2026 => 2026,
        }
    }

    /// Returns the supported financial year that contains `date`, if any.
    pub fn containing(date: NaiveDate) -> Option<Self> {
        // 1 July onwards belongs to the year ending next June
        let ending_year = if date.month() >= 7 {
            date.year() + 1
        } else {
            date.year()
        };
        Self::ALL
            .into_iter()
            .find(|fy| fy.ending_year() == ending_year)
    }

    /// Position of this year within [`FinancialYear::ALL`].
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinancialYear {
    type Err = TaxTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.trim()).ok_or_else(|| TaxTableError::UnknownYear(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        year: i32,
        month: u32,
        day: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn as_str_and_parse_agree_for_every_year() {
        for year in FinancialYear::ALL {
            assert_eq!(FinancialYear::parse(year.as_str()), Some(year));
        }
    }

    #[test]
    fn parse_rejects_unknown_year() {
        assert_eq!(FinancialYear::parse("2019-2020"), None);
        assert_eq!(FinancialYear::parse("2024/25"), None);
        assert_eq!(FinancialYear::parse(""), None);
    }

    #[test]
    fn from_str_reports_unknown_year() {
        let err = "1999-2000".parse::<FinancialYear>().unwrap_err();

        assert_eq!(err, TaxTableError::UnknownYear("1999-2000".to_string()));
    }

    #[test]
    fn from_str_trims_whitespace() {
        assert_eq!(" 2024-2025\n".parse::<FinancialYear>(), Ok(FinancialYear::Fy2025));
    }

    #[test]
    fn all_is_ordered_and_indexed() {
        for (position, year) in FinancialYear::ALL.iter().enumerate() {
            assert_eq!(year.index(), position);
        }
        assert!(FinancialYear::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(FinancialYear::ALL.last(), Some(&FinancialYear::LATEST));
    }

    #[test]
    fn containing_splits_on_first_of_july() {
        assert_eq!(FinancialYear::containing(date(2024, 6, 30)), Some(FinancialYear::Fy2024));
        assert_eq!(FinancialYear::containing(date(2024, 7, 1)), Some(FinancialYear::Fy2025));
        assert_eq!(FinancialYear::containing(date(2025, 1, 15)), Some(FinancialYear::Fy2025));
    }

    #[test]
    fn containing_returns_none_outside_supported_range() {
        assert_eq!(FinancialYear::containing(date(2021, 6, 30)), None);
        assert_eq!(FinancialYear::containing(date(2026, 7, 1)), None);
    }

    #[test]
    fn display_uses_hyphenated_form() {
        assert_eq!(FinancialYear::Fy2023.to_string(), "2022-2023");
    }
}
