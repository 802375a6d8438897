use std::{fmt, str::FromStr};

use chrono::{Local, NaiveDate, TimeDelta};
use serde::Serialize;

/// A calendar day.
///
/// Dates carry no time-of-day, so two dates are the same day exactly when
/// they are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from a day, month and year.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Calendar`] if the triple does not name a real
    /// calendar day (for example the 30th of February).
    pub fn new(day: u32, month: u32, year: i32) -> Result<Self, Error> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(Error::Calendar { day, month, year })
    }

    /// The current local calendar day.
    #[must_use]
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// The date `days` calendar days after this one (before, if negative).
    ///
    /// Returns `None` if the result falls outside the representable range.
    #[must_use]
    pub fn offset(self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(TimeDelta::try_days(days)?).map(Self)
    }

    /// Signed number of calendar days from `b` to `a`.
    ///
    /// Positive when `a` is later than `b`.
    #[must_use]
    pub fn day_difference(a: Self, b: Self) -> i64 {
        (a.0 - b.0).num_days()
    }

    /// Whether both dates fall on the same calendar day.
    #[must_use]
    pub fn same_day(self, other: Self) -> bool {
        self == other
    }

    /// Whether this date is `today` or later.
    #[must_use]
    pub fn is_not_in_past(self, today: Self) -> bool {
        Self::day_difference(self, today) >= 0
    }

    /// Whether this date is no more than `days` calendar days after `today`.
    ///
    /// Dates before `today` are never within the window.
    #[must_use]
    pub fn is_within_days(self, today: Self, days: u32) -> bool {
        (0..=i64::from(days)).contains(&Self::day_difference(self, today))
    }

    /// The day, month and year as `DDMMYYYY`, used in booking references.
    #[must_use]
    pub fn eight_digit(self) -> String {
        self.0.format("%d%m%Y").to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%d/%m/%Y"))
    }
}

impl FromStr for Date {
    type Err = Error;

    /// Parses a `DD/MM/YYYY` date.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y")
            .map(Self)
            .map_err(|_| Error::Format(s.to_string()))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// The range of future days within which a booking date is accepted.
///
/// A window of `n` days admits every date from today through today + `n`,
/// inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    days: u32,
}

impl Window {
    /// The seven-day window applied to standard vehicles.
    pub const STANDARD: Self = Self::new(7);

    /// The narrower three-day window applied to premium vehicles.
    pub const PREMIUM: Self = Self::new(3);

    /// A window reaching `days` calendar days into the future.
    #[must_use]
    pub const fn new(days: u32) -> Self {
        Self { days }
    }

    /// The number of days the window reaches past today.
    #[must_use]
    pub const fn days(self) -> u32 {
        self.days
    }

    /// Whether `date` may be booked when the current day is `today`.
    #[must_use]
    pub fn admits(self, date: Date, today: Date) -> bool {
        date.is_not_in_past(today) && date.is_within_days(today, self.days)
    }
}

/// Errors produced when constructing or parsing a [`Date`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The day, month and year do not form a real calendar day.
    #[error("{day:02}/{month:02}/{year} is not a calendar date")]
    Calendar {
        /// Day of the month.
        day: u32,
        /// Month of the year.
        month: u32,
        /// Year.
        year: i32,
    },

    /// The text is not a `DD/MM/YYYY` date.
    #[error("invalid date '{0}': expected DD/MM/YYYY")]
    Format(String),
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn date(day: u32, month: u32, year: i32) -> Date {
        Date::new(day, month, year).unwrap()
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(
            Date::new(30, 2, 2025),
            Err(Error::Calendar {
                day: 30,
                month: 2,
                year: 2025
            })
        );
        assert!(Date::new(29, 2, 2024).is_ok());
    }

    #[test]
    fn day_difference_is_signed() {
        let a = date(3, 1, 2025);
        let b = date(30, 12, 2024);

        assert_eq!(Date::day_difference(a, b), 4);
        assert_eq!(Date::day_difference(b, a), -4);
        assert_eq!(Date::day_difference(a, a), 0);
    }

    #[test]
    fn offset_crosses_month_and_year() {
        assert_eq!(date(30, 12, 2024).offset(3), Some(date(2, 1, 2025)));
        assert_eq!(date(2, 1, 2025).offset(-3), Some(date(30, 12, 2024)));
    }

    #[test]
    fn same_day_compares_calendar_days() {
        assert!(date(1, 5, 2025).same_day(date(1, 5, 2025)));
        assert!(!date(1, 5, 2025).same_day(date(2, 5, 2025)));
    }

    #[test_case(-1, false; "yesterday")]
    #[test_case(0, true; "today")]
    #[test_case(1, true; "tomorrow")]
    fn not_in_past(offset: i64, expected: bool) {
        let today = date(10, 6, 2025);
        assert_eq!(today.offset(offset).unwrap().is_not_in_past(today), expected);
    }

    #[test_case(Window::STANDARD, -1, false; "standard yesterday")]
    #[test_case(Window::STANDARD, 0, true; "standard today")]
    #[test_case(Window::STANDARD, 2, true; "standard in two days")]
    #[test_case(Window::STANDARD, 7, true; "standard top of window")]
    #[test_case(Window::STANDARD, 8, false; "standard past window")]
    #[test_case(Window::PREMIUM, 3, true; "premium top of window")]
    #[test_case(Window::PREMIUM, 4, false; "premium past window")]
    fn window_admits(window: Window, offset: i64, expected: bool) {
        let today = date(28, 2, 2025);
        let candidate = today.offset(offset).unwrap();
        assert_eq!(window.admits(candidate, today), expected);
    }

    #[test]
    fn formats() {
        let d = date(7, 3, 2025);
        assert_eq!(d.to_string(), "07/03/2025");
        assert_eq!(d.eight_digit(), "07032025");
    }

    #[test]
    fn parses_day_month_year() {
        assert_eq!("07/03/2025".parse::<Date>(), Ok(date(7, 3, 2025)));
        assert_eq!(
            "2025-03-07".parse::<Date>(),
            Err(Error::Format("2025-03-07".to_string()))
        );
        assert!("31/04/2025".parse::<Date>().is_err());
    }
}
