//! Calendar dates for task scheduling.
//!
//! This module provides [`CalendarDate`], a whole-day Gregorian date with no
//! time-of-day or timezone, together with the checked date arithmetic the
//! rule evaluators share. Dates cross the crate boundary as `YYYYMMDD`
//! strings, the format task records are stored with.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::RecurrenceError;

/// Earliest representable year.
pub const MIN_YEAR: i32 = 0;
/// Latest representable year; later dates would not fit in `YYYYMMDD`.
pub const MAX_YEAR: i32 = 9999;

/// A Gregorian calendar date without time-of-day.
///
/// Ordering is chronological, i.e. by `(year, month, day)`. Years are limited
/// to `MIN_YEAR..=MAX_YEAR` so that every value has a `YYYYMMDD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Creates a date from its parts, or `None` if the parts do not form a
    /// valid date in the supported range.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).and_then(Self::from_naive)
    }

    /// Wraps a chrono date, or `None` if its year is out of range.
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        (MIN_YEAR..=MAX_YEAR)
            .contains(&date.year())
            .then_some(Self(date))
    }

    /// Returns the underlying chrono date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the current date in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parses a `YYYYMMDD` string.
    ///
    /// Exactly eight ASCII digits are accepted; anything else, including a
    /// well-formed string naming a day that does not exist (`20230229`), is
    /// rejected.
    pub fn parse(s: &str) -> Result<Self, RecurrenceError> {
        let invalid = || RecurrenceError::InvalidDate(s.to_string());
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = s[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = s[4..6].parse().map_err(|_| invalid())?;
        let day: u32 = s[6..8].parse().map_err(|_| invalid())?;
        Self::from_ymd(year, month, day).ok_or_else(invalid)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// ISO-8601 weekday number: 1 = Monday … 7 = Sunday.
    pub fn iso_weekday(&self) -> u32 {
        self.0.weekday().number_from_monday()
    }

    /// Number of days in this date's month.
    pub fn month_length(&self) -> u32 {
        // Month is always 1..=12 here.
        last_day_of_month(self.year(), self.month()).unwrap_or(31)
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: CalendarDate) -> i64 {
        (self.0 - earlier.0).num_days()
    }

    /// The first day of this date's month.
    pub fn first_day_of_month(&self) -> Self {
        // Day 1 exists in every month.
        Self(self.0 - Days::new(u64::from(self.day() - 1)))
    }

    /// The first day of the month after this date's month.
    pub fn first_day_of_next_month(&self) -> Option<Self> {
        self.first_day_of_month().add_months(1)
    }

    /// The following day.
    pub fn succ(&self) -> Option<Self> {
        self.0.succ_opt().and_then(Self::from_naive)
    }

    /// Adds `days` days.
    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).and_then(Self::from_naive)
    }

    /// Adds `months` months, clamping the day to the target month's length
    /// (January 31 + 1 month is February 28 or 29).
    pub fn add_months(&self, months: u32) -> Option<Self> {
        self.0
            .checked_add_months(Months::new(months))
            .and_then(Self::from_naive)
    }

    /// Adds `years` years; February 29 becomes February 28 in non-leap years.
    pub fn add_years(&self, years: u32) -> Option<Self> {
        self.add_months(years.checked_mul(12)?)
    }
}

/// Number of days in `month` of `year`, or `None` for an invalid month.
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
        4 | 6 | 9 | 11 => Some(30),
        2 if is_leap_year(year) => Some(29),
        2 => Some(28),
        _ => None,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// The first day of `month` in `year`, or `None` for an invalid month.
pub fn first_day_of_month(year: i32, month: u32) -> Option<CalendarDate> {
    CalendarDate::from_ymd(year, month, 1)
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }
}

impl FromStr for CalendarDate {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = RecurrenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = RecurrenceError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_naive(date).ok_or_else(|| RecurrenceError::InvalidDate(date.to_string()))
    }
}
