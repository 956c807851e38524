//! Named history windows and their resolution to a minimum date.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeSelection {
    Last30Days,
    Last3Months,
    Last6Months,
}

impl Display for RangeSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RangeSelection::Last30Days => "30D",
                RangeSelection::Last3Months => "3M",
                RangeSelection::Last6Months => "6M",
            }
        )
    }
}

impl FromStr for RangeSelection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "30d" | "last30days" => Ok(RangeSelection::Last30Days),
            "3m" | "last3months" => Ok(RangeSelection::Last3Months),
            "6m" | "last6months" => Ok(RangeSelection::Last6Months),
            _ => Err(anyhow::anyhow!("Invalid range: {}", s)),
        }
    }
}

impl RangeSelection {
    pub const DEFAULT: RangeSelection = RangeSelection::Last6Months;

    /// First date (inclusive) covered by this window when looking back from `today`.
    pub fn from_date(&self, today: NaiveDate) -> NaiveDate {
        let earlier = match self {
            RangeSelection::Last30Days => today.checked_sub_days(Days::new(30)),
            RangeSelection::Last3Months => today.checked_sub_months(Months::new(3)),
            RangeSelection::Last6Months => today.checked_sub_months(Months::new(6)),
        };
        earlier.unwrap_or(NaiveDate::MIN)
    }
}

/// Maps an optional selection to the minimum date of the history window.
///
/// Total: an absent selection resolves to the six-month window.
pub fn resolve(selection: Option<RangeSelection>, today: NaiveDate) -> NaiveDate {
    selection.unwrap_or(RangeSelection::DEFAULT).from_date(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_each_selection() {
        let today = date(2024, 5, 15);
        assert_eq!(
            resolve(Some(RangeSelection::Last30Days), today),
            date(2024, 4, 15)
        );
        assert_eq!(
            resolve(Some(RangeSelection::Last3Months), today),
            date(2024, 2, 15)
        );
        assert_eq!(
            resolve(Some(RangeSelection::Last6Months), today),
            date(2023, 11, 15)
        );
    }

    #[test]
    fn test_resolve_absent_defaults_to_six_months() {
        let today = date(2024, 5, 15);
        assert_eq!(resolve(None, today), date(2023, 11, 15));
    }

    #[test]
    fn test_month_arithmetic_clamps_to_month_end() {
        assert_eq!(
            resolve(Some(RangeSelection::Last3Months), date(2024, 5, 31)),
            date(2024, 2, 29)
        );
        assert_eq!(
            resolve(Some(RangeSelection::Last30Days), date(2024, 3, 1)),
            date(2024, 1, 31)
        );
    }

    #[test]
    fn test_parse_short_and_long_names() {
        assert_eq!(
            "30d".parse::<RangeSelection>().unwrap(),
            RangeSelection::Last30Days
        );
        assert_eq!(
            "Last3Months".parse::<RangeSelection>().unwrap(),
            RangeSelection::Last3Months
        );
        assert_eq!(
            " 6M ".parse::<RangeSelection>().unwrap(),
            RangeSelection::Last6Months
        );
        assert!("1y".parse::<RangeSelection>().is_err());
        assert_eq!(
            resolve("1y".parse().ok(), date(2024, 5, 15)),
            date(2023, 11, 15)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(RangeSelection::Last30Days.to_string(), "30D");
        assert_eq!(RangeSelection::Last3Months.to_string(), "3M");
        assert_eq!(RangeSelection::Last6Months.to_string(), "6M");
    }
}
