//! calendar.rs
//!
//! Recurring-anniversary arithmetic over partial dates.
//!
//! A birthday is stored as month/day with an optional year. Matching is done
//! against "today" at day granularity, ignoring the birth year entirely;
//! the year only matters when computing the age someone turns next.
//!
//! Feb 29 birthdays need care:
//!   • in leap years they fall on Feb 29
//!   • in common years they are observed on Feb 28
//!   • moved into a common year, Feb 29 clamps to Feb 28 (so Mar 1 is "after")

use chrono::{Datelike, NaiveDate};
use std::fmt;

const FEBRUARY: u32 = 2;
const LEAP_DAY: u32 = 29;
const OBSERVED_LEAP_DAY: u32 = 28;

/// A month/day pair with an optional year, as recorded in a contact directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub year: Option<i32>,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(year: Option<i32>, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Date with a known birth year.
    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self::new(Some(year), month, day)
    }

    /// Date where only month and day are known.
    pub fn md(month: u32, day: u32) -> Self {
        Self::new(None, month, day)
    }

    fn is_leap_day(&self) -> bool {
        self.month == FEBRUARY && self.day == LEAP_DAY
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.year {
            Some(year) => write!(f, "{year:04}-{:02}-{:02}", self.month, self.day),
            None => write!(f, "--{:02}-{:02}", self.month, self.day),
        }
    }
}

/// True when `date`, moved into `today`'s year, falls strictly before `today`.
///
/// The day is clamped to the length of the month in `today`'s year, so a
/// Feb 29 birthday becomes Feb 28 in a common year.
pub fn moved_to_current_year_is_before_today(date: &CalendarDate, today: NaiveDate) -> bool {
    let day = date.day.min(days_in_month(today.year(), date.month));
    (date.month, day) < (today.month(), today.day())
}

/// The age the person turns on the next occurrence of their birthday.
///
/// `None` when the birth year is unknown. A birthday falling on `today`
/// counts as the next occurrence.
pub fn age_at_next_birthday(date: &CalendarDate, today: NaiveDate) -> Option<i32> {
    let year = date.year?;
    let age = today.year() - year;

    if moved_to_current_year_is_before_today(date, today) {
        Some(age + 1)
    } else {
        Some(age)
    }
}

/// Returns true if `today` is the anniversary of `date`.
pub fn is_birthday_today(date: Option<&CalendarDate>, today: NaiveDate) -> bool {
    let Some(date) = date else {
        return false;
    };

    if date.is_leap_day() {
        let observed = if is_leap_year(today.year()) {
            LEAP_DAY
        } else {
            OBSERVED_LEAP_DAY
        };
        return today.month() == FEBRUARY && today.day() == observed;
    }

    today.month() == date.month && today.day() == date.day
}

/// Returns number of days in a given year/month (handles leap years)
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 31, // out-of-range months are never clamped
    }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
