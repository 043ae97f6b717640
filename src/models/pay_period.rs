//! Pay month model.
//!
//! This module contains the [`PayMonth`] type that identifies the monthly
//! period a payroll record belongs to.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A calendar month in `YYYY-MM` form.
///
/// Serialized as the same `YYYY-MM` string it is parsed from.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayMonth;
/// use chrono::NaiveDate;
///
/// let month: PayMonth = "2024-03".parse().unwrap();
/// assert_eq!(month.year(), 2024);
/// assert_eq!(month.month(), 3);
/// assert_eq!(month.first_day(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
/// assert_eq!(month.to_string(), "2024-03");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PayMonth {
    first_day: NaiveDate,
}

impl PayMonth {
    /// Creates a pay month, returning `None` for an out-of-range month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The calendar month, 1 through 12.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }
}

impl FromStr for PayMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(|first_day| Self { first_day })
            .map_err(|_| {
                EngineError::invalid_input("month", format!("expected YYYY-MM, got '{}'", s))
            })
    }
}

impl TryFrom<String> for PayMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PayMonth> for String {
    fn from(month: PayMonth) -> Self {
        month.to_string()
    }
}

impl fmt::Display for PayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}
