//! Calendar month value type.
//!
//! Pay stubs, bonuses and salary advances are all keyed by a calendar month.
//! [`YearMonth`] is serialized as `YYYY-MM`.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// A calendar month (e.g. `2025-03`).
///
/// # Example
///
/// ```
/// use payroll_engine::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let month: YearMonth = "2024-02".parse().unwrap();
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
/// assert_eq!(month.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(month.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    start: NaiveDate,
}

impl YearMonth {
    /// Earliest supported year.
    pub const MIN_YEAR: i32 = 1;
    /// Latest supported year; `YYYY-MM` has four year digits.
    pub const MAX_YEAR: i32 = 9999;

    /// Creates a month, rejecting a month number outside `1..=12` and a year
    /// outside `MIN_YEAR..=MAX_YEAR`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(EngineError::validation(
                "year_month",
                format!(
                    "year {} is outside {}..={}",
                    year,
                    Self::MIN_YEAR,
                    Self::MAX_YEAR
                ),
            ));
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|start| Self { start })
            .ok_or_else(|| {
                EngineError::validation(
                    "year_month",
                    format!("{}-{} is not a calendar month", year, month),
                )
            })
    }

    /// The year component.
    pub fn year(&self) -> i32 {
        self.start.year()
    }

    /// The month component (1-12).
    pub fn month(&self) -> u32 {
        self.start.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.start
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        // years are bounded well inside chrono's range
        self.start + Months::new(1) - Days::new(1)
    }

    /// Returns true when `date` falls within this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid =
            || EngineError::validation("year_month", format!("expected YYYY-MM, got '{}'", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
