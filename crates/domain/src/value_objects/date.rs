//! Calendar date value object
//!
//! A `Date` is always a valid Gregorian calendar date with a year greater
//! than 1. Construction comes in two flavours:
//!
//! - [`Date::new`] is lenient: invalid input silently becomes 01/01/2000.
//! - [`Date::try_new`] is strict: invalid input is a `DomainError`.
//!
//! [`Date::sanitize`] exposes both at once (the corrected value plus the
//! reason it was corrected).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::Sanitized;
use crate::error::DomainError;

const FIRST_MONTH: u32 = 1;
const LAST_MONTH: u32 = 12;
const FEBRUARY: u32 = 2;
const DAYS_IN_FEBRUARY: u32 = 28;
const DAYS_IN_LEAP_FEBRUARY: u32 = 29;

/// Years up to and including this one are rejected.
const LAST_INVALID_YEAR: i32 = 1;

/// A validated day/month/year triple.
///
/// # Invariants
///
/// - `month` is in `1..=12`
/// - `day` is in `1..=days_in_month(month, year)` (leap years honoured)
/// - `year > 1`
///
/// # Example
///
/// ```
/// use rentals_domain::Date;
///
/// let date = Date::new(29, 2, 2024);
/// assert_eq!(date.to_string(), "29/02/2024");
///
/// // 2023 is not a leap year, so the lenient constructor falls back
/// assert_eq!(Date::new(29, 2, 2023), Date::default());
/// assert!(Date::try_new(29, 2, 2023).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DateWireFormat")]
pub struct Date {
    day: u32,
    month: u32,
    year: i32,
}

impl Date {
    /// The fallback used whenever lenient construction rejects its input.
    pub const DEFAULT: Date = Date {
        day: 1,
        month: 1,
        year: 2000,
    };

    // =========================================================================
    // Construction
    // =========================================================================

    /// Create a date, falling back to [`Date::DEFAULT`] if the input is invalid.
    pub fn new(day: i32, month: i32, year: i32) -> Self {
        Self::sanitize(day, month, year).into_lenient()
    }

    /// Create a date, rejecting invalid input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the month is not in `1..=12`, the
    /// year is not greater than 1, or the day does not exist in that month.
    pub fn try_new(day: i32, month: i32, year: i32) -> Result<Self, DomainError> {
        let month = u32::try_from(month)
            .ok()
            .filter(|m| (FIRST_MONTH..=LAST_MONTH).contains(m))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Month {} is outside {}-{}",
                    month, FIRST_MONTH, LAST_MONTH
                ))
            })?;
        if year <= LAST_INVALID_YEAR {
            return Err(DomainError::validation(format!(
                "Year {} must be greater than {}",
                year, LAST_INVALID_YEAR
            )));
        }
        let max_day = Self::days_in_month(month, year).unwrap_or(0);
        let day = u32::try_from(day)
            .ok()
            .filter(|d| (1..=max_day).contains(d))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "Day {} does not exist in {:02}/{}",
                    day, month, year
                ))
            })?;
        Ok(Self { day, month, year })
    }

    /// Validate the input and report both the value to use and whether a
    /// substitution happened.
    pub fn sanitize(day: i32, month: i32, year: i32) -> Sanitized<Self> {
        match Self::try_new(day, month, year) {
            Ok(date) => Sanitized::accepted(date),
            Err(err) => {
                tracing::debug!(day, month, year, reason = %err, "invalid date replaced by default");
                Sanitized::substituted(Self::DEFAULT, err)
            }
        }
    }

    /// Returns true if `day/month/year` is a date [`Date::try_new`] accepts.
    pub fn is_valid(day: i32, month: i32, year: i32) -> bool {
        Self::try_new(day, month, year).is_ok()
    }

    /// Gregorian leap-year rule.
    pub fn is_leap_year(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    /// Number of days in `month` of `year`, or `None` for a month outside `1..=12`.
    pub fn days_in_month(month: u32, year: i32) -> Option<u32> {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => Some(31),
            4 | 6 | 9 | 11 => Some(30),
            FEBRUARY if Self::is_leap_year(year) => Some(DAYS_IN_LEAP_FEBRUARY),
            FEBRUARY => Some(DAYS_IN_FEBRUARY),
            _ => None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Change the day; ignored if the resulting date would be invalid.
    pub fn set_day(&mut self, day: i32) {
        self.replace_if_valid("day", day, self.month as i32, self.year);
    }

    /// Change the month; ignored if the resulting date would be invalid.
    pub fn set_month(&mut self, month: i32) {
        self.replace_if_valid("month", self.day as i32, month, self.year);
    }

    /// Change the year; ignored if the resulting date would be invalid.
    pub fn set_year(&mut self, year: i32) {
        self.replace_if_valid("year", self.day as i32, self.month as i32, year);
    }

    fn replace_if_valid(&mut self, field: &'static str, day: i32, month: i32, year: i32) {
        match Self::try_new(day, month, year) {
            Ok(date) => *self = date,
            Err(err) => {
                tracing::debug!(field, date = %self, reason = %err, "date change ignored");
            }
        }
    }

    // =========================================================================
    // Comparison and arithmetic
    // =========================================================================

    /// Returns true if this date falls strictly before `other`.
    pub fn is_before(&self, other: Date) -> bool {
        *self < other
    }

    /// Returns true if this date falls strictly after `other`.
    pub fn is_after(&self, other: Date) -> bool {
        other.is_before(*self)
    }

    /// Absolute number of days between the two dates.
    ///
    /// ```
    /// use rentals_domain::Date;
    ///
    /// let a = Date::new(28, 2, 2000);
    /// let b = Date::new(1, 3, 2000);
    /// assert_eq!(a.difference(b), 2);
    /// assert_eq!(b.difference(a), 2);
    /// ```
    pub fn difference(&self, other: Date) -> u64 {
        (self.day_number() - other.day_number()).unsigned_abs()
    }

    /// Proleptic day count. January and February are counted as months 13
    /// and 14 of the previous year so the leap day falls at the end.
    fn day_number(&self) -> i64 {
        let (mut year, mut month) = (i64::from(self.year), i64::from(self.month));
        if month < 3 {
            year -= 1;
            month += 12;
        }
        365 * year + year / 4 - year / 100 + year / 400 + ((month + 1) * 306) / 10
            + (i64::from(self.day) - 62)
    }

    /// A new date `years` later (or earlier, for negative `years`).
    ///
    /// The last day of February stays the last day of February: 29/02 moves to
    /// 28/02 in a common year and 28/02 moves to 29/02 in a leap year. A
    /// target year that is not representable or not valid yields
    /// [`Date::DEFAULT`].
    pub fn add_years(&self, years: i32) -> Date {
        self.checked_add_years(years).unwrap_or_else(|| {
            tracing::debug!(date = %self, years, "year out of range, using default date");
            Self::DEFAULT
        })
    }

    /// Like [`Date::add_years`], but `None` when the target year is not
    /// representable or not valid.
    pub fn checked_add_years(&self, years: i32) -> Option<Date> {
        let target_year = self.year.checked_add(years)?;
        let day = match (self.month, self.day) {
            (FEBRUARY, DAYS_IN_FEBRUARY) if Self::is_leap_year(target_year) => {
                DAYS_IN_LEAP_FEBRUARY
            }
            (FEBRUARY, DAYS_IN_LEAP_FEBRUARY) if !Self::is_leap_year(target_year) => {
                DAYS_IN_FEBRUARY
            }
            (_, day) => day,
        };
        Self::try_new(day as i32, self.month as i32, target_year).ok()
    }
}

impl Default for Date {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Ord for Date {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year
            .cmp(&other.year)
            .then(self.month.cmp(&other.month))
            .then(self.day.cmp(&other.day))
    }
}

impl PartialOrd for Date {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{}", self.day, self.month, self.year)
    }
}

impl FromStr for Date {
    type Err = DomainError;

    /// Parses `D/M/YYYY` (zero padding optional). Strict: a well-formed but
    /// impossible date such as `31/04/2024` is a `Validation` error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        let [day, month, year] = parts.as_slice() else {
            return Err(DomainError::parse(format!(
                "Expected DD/MM/YYYY, got '{}'",
                s
            )));
        };
        let number = |part: &str| {
            part.trim()
                .parse::<i32>()
                .map_err(|_| DomainError::parse(format!("'{}' is not a number in '{}'", part, s)))
        };
        Self::try_new(number(*day)?, number(*month)?, number(*year)?)
    }
}

// ============================================================================
// chrono interop
// ============================================================================

impl From<NaiveDate> for Date {
    /// Lenient: chrono dates in year 1 or earlier become [`Date::DEFAULT`].
    fn from(date: NaiveDate) -> Self {
        Self::new(date.day() as i32, date.month() as i32, date.year())
    }
}

impl TryFrom<Date> for NaiveDate {
    type Error = DomainError;

    fn try_from(date: Date) -> Result<Self, Self::Error> {
        NaiveDate::from_ymd_opt(date.year, date.month, date.day).ok_or_else(|| {
            DomainError::constraint(format!("{} is outside the range chrono supports", date))
        })
    }
}

// ============================================================================
// Serde Implementation
// ============================================================================

/// Unvalidated wire format; deserialization is strict.
#[derive(Deserialize)]
struct DateWireFormat {
    day: i32,
    month: i32,
    year: i32,
}

impl TryFrom<DateWireFormat> for Date {
    type Error = DomainError;

    fn try_from(wire: DateWireFormat) -> Result<Self, Self::Error> {
        Self::try_new(wire.day, wire.month, wire.year)
    }
}

// ============================================================================
// Tests
// ============================================================================
