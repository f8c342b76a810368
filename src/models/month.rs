//! Calendar month used to select which records a view shows
//!
//! Matching is by calendar year and month, never by a rolling window.
//! Navigation has no bound of its own; it only stops at the ends of the
//! `i32` year range.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month (e.g., "2025-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, returning `None` if `month` is not in 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current calendar month in local time
    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the month
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// Check if a date falls within this calendar month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month
    pub fn next(&self) -> Self {
        self.shift(1)
    }

    /// The preceding month
    pub fn prev(&self) -> Self {
        self.shift(-1)
    }

    /// Move by `months` units; negative values move backwards
    ///
    /// Saturates at January of `i32::MIN` and December of `i32::MAX`.
    pub fn shift(&self, months: i32) -> Self {
        const FIRST: i64 = i32::MIN as i64 * 12;
        const LAST: i64 = i32::MAX as i64 * 12 + 11;

        let index = (i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months))
            .clamp(FIRST, LAST);
        Self {
            year: index.div_euclid(12) as i32,
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Parse a month string in `YYYY-MM` form
    pub fn parse(s: &str) -> Result<Self, MonthParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| MonthParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| MonthParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month).ok_or(MonthParseError::InvalidMonth(month))
    }

    /// Long label for headers, e.g. "March 2024"
    pub fn label(&self) -> String {
        match self.start_date() {
            Some(date) => date.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl Default for Month {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Month {
    type Error = MonthParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

/// Error type for month parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonthParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for MonthParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month '{}', expected YYYY-MM", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month number {}", m),
        }
    }
}

impl std::error::Error for MonthParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_contains_is_calendar_based() {
        let march = Month::new(2024, 3).unwrap();
        assert!(march.contains(date(2024, 3, 1)));
        assert!(march.contains(date(2024, 3, 31)));
        assert!(!march.contains(date(2024, 4, 1)));
        assert!(!march.contains(date(2024, 2, 29)));
        assert!(!march.contains(date(2023, 3, 15)));
    }

    #[test]
    fn test_navigation_wraps_years() {
        let jan = Month::new(2025, 1).unwrap();
        assert_eq!(jan.prev(), Month::new(2024, 12).unwrap());
        assert_eq!(jan.prev().next(), jan);

        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2025, 1).unwrap());
    }

    #[test]
    fn test_shift_is_unbounded() {
        let m = Month::new(2024, 3).unwrap();
        assert_eq!(m.shift(-27), Month::new(2021, 12).unwrap());
        assert_eq!(m.shift(22), Month::new(2026, 1).unwrap());
        assert_eq!(m.shift(0), m);
        assert_eq!(Month::new(1, 1).unwrap().prev(), Month::new(0, 12).unwrap());
    }

    #[test]
    fn test_shift_saturates_at_year_range() {
        let last = Month::new(i32::MAX, 12).unwrap();
        assert_eq!(last.next(), last);
        assert_eq!(last.shift(i32::MAX), last);
        assert_eq!(last.prev(), Month::new(i32::MAX, 11).unwrap());

        let first = Month::new(i32::MIN, 1).unwrap();
        assert_eq!(first.prev(), first);
        assert_eq!(first.shift(i32::MIN), first);
        assert_eq!(first.next(), Month::new(i32::MIN, 2).unwrap());

        // Out of chrono's range: label falls back and nothing matches
        assert_eq!(last.label(), last.to_string());
        assert!(!last.contains(date(2024, 12, 1)));
    }

    #[test]
    fn test_start_date() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.start_date(), Some(date(2024, 2, 1)));
        assert_eq!(Month::new(i32::MAX, 1).unwrap().start_date(), None);
    }

    #[test]
    fn test_parse_and_display() {
        let m = Month::parse("2024-03").unwrap();
        assert_eq!(m, Month::new(2024, 3).unwrap());
        assert_eq!(m.to_string(), "2024-03");
        assert_eq!(m.label(), "March 2024");

        assert_eq!(Month::parse("2024-13"), Err(MonthParseError::InvalidMonth(13)));
        assert!(matches!(
            Month::parse("March"),
            Err(MonthParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let m = Month::new(2024, 3).unwrap();
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2024-03\"");
        let parsed: Month = serde_json::from_str("\"2024-03\"").unwrap();
        assert_eq!(parsed, m);
        assert!(serde_json::from_str::<Month>("\"2024-00\"").is_err());
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Month::new(2024, 0).is_none());
        assert!(Month::new(2024, 12).is_some());
    }
}
