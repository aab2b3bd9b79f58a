//! Partial dates and decoded calendar timestamps.
//!
//! Filenames declare their date range at a precision driven by the sampling
//! frequency (a monthly file declares `YYYYMM`, a 6-hourly file
//! `YYYYMMDDhhmm`). `PartialDate` carries exactly the declared components;
//! `CalendarDateTime` is the fully-populated timestamp a time axis decodes
//! to. Comparing the two only looks at the components the filename declared.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A date/time value populated contiguously from the year downward.
///
/// Equality is fieldwise: two values are equal iff every component present
/// in either is present and equal in both. A `PartialDate` with a month
/// never compares equal to one without, so precision differences are never
/// silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDate {
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
}

impl PartialDate {
    /// Year-only precision (`YYYY`).
    pub fn from_year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
            hour: None,
            minute: None,
            second: None,
        }
    }

    /// Year and month precision (`YYYYMM`).
    pub fn from_ym(year: i32, month: u32) -> Self {
        Self {
            month: Some(month),
            ..Self::from_year(year)
        }
    }

    /// Full date precision (`YYYYMMDD`).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            day: Some(day),
            ..Self::from_ym(year, month)
        }
    }

    /// Minute precision (`YYYYMMDDhhmm`).
    pub fn from_ymd_hm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Self {
        Self {
            hour: Some(hour),
            minute: Some(minute),
            ..Self::from_ymd(year, month, day)
        }
    }

    /// Second precision (`YYYYMMDDhhmmss`).
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Self {
        Self {
            second: Some(second),
            ..Self::from_ymd_hm(year, month, day, hour, minute)
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn day(&self) -> Option<u32> {
        self.day
    }

    pub fn hour(&self) -> Option<u32> {
        self.hour
    }

    pub fn minute(&self) -> Option<u32> {
        self.minute
    }

    pub fn second(&self) -> Option<u32> {
        self.second
    }

    /// Compares the populated components against a full timestamp.
    ///
    /// This is the comparison the temporal consistency check uses: a
    /// monthly filename date `(1859, 12)` matches any timestamp within
    /// December 1859.
    pub fn matches(&self, datetime: &CalendarDateTime) -> bool {
        if self.year != datetime.year {
            return false;
        }
        let components = [
            (self.month, datetime.month),
            (self.day, datetime.day),
            (self.hour, datetime.hour),
            (self.minute, datetime.minute),
            (self.second, datetime.second),
        ];
        components
            .iter()
            .all(|(declared, actual)| declared.is_none_or(|value| value == *actual))
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(month) = self.month {
            write!(f, "-{month:02}")?;
        }
        if let Some(day) = self.day {
            write!(f, "-{day:02}")?;
        }
        if let Some(hour) = self.hour {
            write!(f, " {hour:02}")?;
        }
        if let Some(minute) = self.minute {
            write!(f, ":{minute:02}")?;
        }
        if let Some(second) = self.second {
            write!(f, ":{second:02}")?;
        }
        Ok(())
    }
}

/// A fully-populated calendar timestamp decoded from a numeric time value.
///
/// Calendar-agnostic value type: the decoder that produced it knows whether
/// the underlying calendar was Gregorian, 360-day, or no-leap, but the
/// components themselves are plain calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarDateTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Rounds to the nearest whole minute; 30 seconds or more rounds up.
    ///
    /// Stored time values drift by fractions of a minute relative to the
    /// round minutes declared in filenames, so sub-daily comparisons round
    /// both endpoints first. Carry past 59 minutes rolls the hour, day,
    /// month and year as needed using Gregorian month lengths.
    pub fn rounded_to_minute(&self) -> Self {
        let mut rounded = Self {
            second: 0,
            ..*self
        };
        if self.second < 30 {
            return rounded;
        }
        rounded.minute += 1;
        if rounded.minute == 60 {
            rounded.minute = 0;
            rounded.hour += 1;
        }
        if rounded.hour == 24 {
            rounded.hour = 0;
            rounded.day += 1;
        }
        if rounded.day > days_in_month(rounded.year, rounded.month) {
            rounded.day = 1;
            rounded.month += 1;
        }
        if rounded.month == 13 {
            rounded.month = 1;
            rounded.year += 1;
        }
        rounded
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Number of days in a Gregorian month.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
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
        _ => 31,
    }
}

pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
