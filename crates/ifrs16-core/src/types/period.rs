//! Monthly accounting period (competence month).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::Date;
use crate::error::{Ifrs16Error, Ifrs16Result};

/// A calendar month used to select journal entries, written `MM/YYYY`.
///
/// # Example
///
/// ```rust
/// use ifrs16_core::types::Period;
///
/// let period: Period = "12/2025".parse().unwrap();
/// assert_eq!(period.next().unwrap().to_string(), "01/2026");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Creates a period from year and month.
    ///
    /// # Errors
    ///
    /// Returns `Ifrs16Error::InvalidPeriod` if the month is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Ifrs16Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Ifrs16Error::invalid_period(format!("{month:02}/{year:04}")));
        }
        Ok(Self { year, month })
    }

    /// The period containing `date`.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month, `None` past the last representable year.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.add_months(1)
    }

    /// Shifts the period by a signed number of months.
    ///
    /// Returns `None` when the result does not fit the year range.
    #[must_use]
    pub fn add_months(&self, months: i32) -> Option<Self> {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        Some(Self {
            year: i32::try_from(total.div_euclid(12)).ok()?,
            month: (total.rem_euclid(12) + 1) as u32,
        })
    }

    /// First calendar day of the period.
    ///
    /// # Errors
    ///
    /// Returns `Ifrs16Error::InvalidDate` if the year is out of range.
    pub fn first_day(&self) -> Ifrs16Result<Date> {
        Date::from_ymd(self.year, self.month, 1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for Period {
    type Err = Ifrs16Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (month, year) = trimmed
            .split_once('/')
            .ok_or_else(|| Ifrs16Error::invalid_period(trimmed))?;
        let month: u32 = month
            .parse()
            .map_err(|_| Ifrs16Error::invalid_period(trimmed))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Ifrs16Error::invalid_period(trimmed))?;
        Self::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
