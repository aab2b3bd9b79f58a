//! CF time-unit decoding: numeric time values to calendar timestamps.
//!
//! Climate files store their time axis as numbers relative to an epoch
//! (`days since 1850-01-01`) under a named calendar. The calendar decides
//! the arithmetic: `standard` follows the Gregorian rules, while `noleap`,
//! `all_leap` and `360_day` use fixed-length years.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use thiserror::Error;

use crate::date::CalendarDateTime;

#[derive(Debug, Error)]
pub enum TimeUnitsError {
    #[error("unrecognized time unit in '{0}'")]
    UnrecognizedUnit(String),
    #[error("malformed epoch in time units '{0}'")]
    MalformedEpoch(String),
    #[error("unknown calendar '{0}'")]
    UnknownCalendar(String),
}

/// Calendar governing time-axis arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Calendar {
    /// Gregorian rules (`standard`, `gregorian`, `proleptic_gregorian`).
    #[default]
    Standard,
    /// 365-day years, no leap days (`noleap`, `365_day`).
    NoLeap,
    /// 366-day years (`all_leap`, `366_day`).
    AllLeap,
    /// Twelve 30-day months (`360_day`).
    Day360,
}

impl Calendar {
    pub fn parse(name: &str) -> Result<Self, TimeUnitsError> {
        match name.trim().to_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Ok(Self::Standard),
            "noleap" | "365_day" => Ok(Self::NoLeap),
            "all_leap" | "366_day" => Ok(Self::AllLeap),
            "360_day" => Ok(Self::Day360),
            other => Err(TimeUnitsError::UnknownCalendar(other.to_string())),
        }
    }

    fn year_length(&self) -> i64 {
        match self {
            Self::Standard => unreachable!("standard calendar uses chrono arithmetic"),
            Self::NoLeap => 365,
            Self::AllLeap => 366,
            Self::Day360 => 360,
        }
    }

    fn month_lengths(&self) -> [i64; 12] {
        match self {
            Self::Standard => unreachable!("standard calendar uses chrono arithmetic"),
            Self::NoLeap => [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
            Self::AllLeap => [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
            Self::Day360 => [30; 12],
        }
    }
}

/// Base unit of a CF time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn seconds(&self) -> f64 {
        match self {
            Self::Days => 86_400.0,
            Self::Hours => 3_600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }
}

/// Parsed CF time units: a base unit and an epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUnits {
    pub unit: TimeUnit,
    pub epoch: CalendarDateTime,
}

impl TimeUnits {
    /// Parses a CF units string such as `days since 1850-01-01` or
    /// `hours since 1950-01-01 06:00:00`.
    pub fn parse(units: &str) -> Result<Self, TimeUnitsError> {
        let mut parts = units.trim().splitn(3, char::is_whitespace);
        let unit_word = parts
            .next()
            .ok_or_else(|| TimeUnitsError::UnrecognizedUnit(units.to_string()))?;
        let unit = match unit_word.to_lowercase().as_str() {
            "day" | "days" => TimeUnit::Days,
            "hour" | "hours" | "hr" | "hrs" => TimeUnit::Hours,
            "minute" | "minutes" | "min" | "mins" => TimeUnit::Minutes,
            "second" | "seconds" | "sec" | "secs" => TimeUnit::Seconds,
            _ => return Err(TimeUnitsError::UnrecognizedUnit(units.to_string())),
        };
        let since = parts
            .next()
            .ok_or_else(|| TimeUnitsError::MalformedEpoch(units.to_string()))?;
        if !since.eq_ignore_ascii_case("since") {
            return Err(TimeUnitsError::MalformedEpoch(units.to_string()));
        }
        let epoch_str = parts
            .next()
            .ok_or_else(|| TimeUnitsError::MalformedEpoch(units.to_string()))?;
        let epoch = parse_epoch(epoch_str)
            .ok_or_else(|| TimeUnitsError::MalformedEpoch(units.to_string()))?;
        Ok(Self { unit, epoch })
    }

    /// Decodes a numeric time value into a calendar timestamp.
    ///
    /// The offset is rounded to the nearest whole second; any finer drift
    /// is below the resolution the validation checks operate at.
    pub fn decode(&self, value: f64, calendar: Calendar) -> CalendarDateTime {
        let offset_seconds = (value * self.unit.seconds()).round() as i64;
        match calendar {
            Calendar::Standard => decode_standard(&self.epoch, offset_seconds),
            fixed => decode_fixed(&self.epoch, offset_seconds, fixed),
        }
    }
}

/// Parses `YYYY-MM-DD`, optionally followed by `THH:MM:SS` or ` HH:MM:SS`.
/// Single-digit components are accepted (`1850-1-1`).
fn parse_epoch(text: &str) -> Option<CalendarDateTime> {
    let (date_part, time_part) = match text.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time)),
        None => (text, None),
    };

    let mut date_fields = date_part.splitn(3, '-');
    let year: i32 = date_fields.next()?.parse().ok()?;
    let month: u32 = date_fields.next()?.parse().ok()?;
    let day: u32 = date_fields.next()?.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let (hour, minute, second) = match time_part {
        Some(time) => {
            let mut time_fields = time.splitn(3, ':');
            let hour: u32 = time_fields.next()?.parse().ok()?;
            let minute: u32 = time_fields.next().unwrap_or("0").parse().ok()?;
            let second: u32 = match time_fields.next() {
                // Tolerate fractional epoch seconds by truncating them.
                Some(sec) => sec.split('.').next()?.parse().ok()?,
                None => 0,
            };
            (hour, minute, second)
        }
        None => (0, 0, 0),
    };
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    Some(CalendarDateTime::new(year, month, day, hour, minute, second))
}

fn decode_standard(epoch: &CalendarDateTime, offset_seconds: i64) -> CalendarDateTime {
    let date = NaiveDate::from_ymd_opt(epoch.year, epoch.month, epoch.day)
        .unwrap_or(NaiveDate::MIN);
    let time = NaiveTime::from_hms_opt(epoch.hour, epoch.minute, epoch.second)
        .unwrap_or(NaiveTime::MIN);
    let decoded = NaiveDateTime::new(date, time) + TimeDelta::seconds(offset_seconds);
    CalendarDateTime::new(
        decoded.year(),
        decoded.month(),
        decoded.day(),
        decoded.hour(),
        decoded.minute(),
        decoded.second(),
    )
}

fn decode_fixed(
    epoch: &CalendarDateTime,
    offset_seconds: i64,
    calendar: Calendar,
) -> CalendarDateTime {
    let year_length = calendar.year_length();
    let months = calendar.month_lengths();

    // Absolute day count of the epoch since year 0 of this calendar.
    let mut epoch_days = i64::from(epoch.year) * year_length;
    epoch_days += months[..(epoch.month as usize - 1)].iter().sum::<i64>();
    epoch_days += i64::from(epoch.day) - 1;
    let epoch_seconds = epoch_days * 86_400
        + i64::from(epoch.hour) * 3_600
        + i64::from(epoch.minute) * 60
        + i64::from(epoch.second);

    let total = epoch_seconds + offset_seconds;
    let total_days = total.div_euclid(86_400);
    let day_seconds = total.rem_euclid(86_400);

    let year = total_days.div_euclid(year_length);
    let mut day_of_year = total_days.rem_euclid(year_length);
    let mut month = 0usize;
    while day_of_year >= months[month] {
        day_of_year -= months[month];
        month += 1;
    }

    CalendarDateTime::new(
        year as i32,
        month as u32 + 1,
        day_of_year as u32 + 1,
        (day_seconds / 3_600) as u32,
        (day_seconds % 3_600 / 60) as u32,
        (day_seconds % 60) as u32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::days_in_month as standard_days_in_month;

    #[test]
    fn parses_units_strings() {
        let units = TimeUnits::parse("days since 1850-01-01").unwrap();
        assert_eq!(units.unit, TimeUnit::Days);
        assert_eq!(units.epoch, CalendarDateTime::new(1850, 1, 1, 0, 0, 0));

        let units = TimeUnits::parse("hours since 1950-1-1 06:00:00").unwrap();
        assert_eq!(units.unit, TimeUnit::Hours);
        assert_eq!(units.epoch, CalendarDateTime::new(1950, 1, 1, 6, 0, 0));

        assert!(TimeUnits::parse("fortnights since 1850-01-01").is_err());
        assert!(TimeUnits::parse("days until 1850-01-01").is_err());
    }

    #[test]
    fn decodes_standard_calendar() {
        let units = TimeUnits::parse("days since 1850-01-01").unwrap();
        assert_eq!(
            units.decode(0.0, Calendar::Standard),
            CalendarDateTime::new(1850, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            units.decode(31.0, Calendar::Standard),
            CalendarDateTime::new(1850, 2, 1, 0, 0, 0)
        );
        // 1852 is a leap year under Gregorian rules.
        assert_eq!(
            units.decode(365.0 * 2.0 + 366.0, Calendar::Standard),
            CalendarDateTime::new(1853, 1, 1, 0, 0, 0)
        );
        assert_eq!(standard_days_in_month(1852, 2), 29);
    }

    #[test]
    fn decodes_360_day_calendar() {
        let units = TimeUnits::parse("days since 1850-01-01").unwrap();
        assert_eq!(
            units.decode(30.0, Calendar::Day360),
            CalendarDateTime::new(1850, 2, 1, 0, 0, 0)
        );
        assert_eq!(
            units.decode(360.0, Calendar::Day360),
            CalendarDateTime::new(1851, 1, 1, 0, 0, 0)
        );
        // February keeps 30 days.
        assert_eq!(
            units.decode(59.0, Calendar::Day360),
            CalendarDateTime::new(1850, 2, 30, 0, 0, 0)
        );
    }

    #[test]
    fn decodes_noleap_calendar() {
        let units = TimeUnits::parse("days since 1850-01-01").unwrap();
        assert_eq!(
            units.decode(365.0, Calendar::NoLeap),
            CalendarDateTime::new(1851, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            units.decode(58.0, Calendar::NoLeap),
            CalendarDateTime::new(1850, 2, 28, 0, 0, 0)
        );
    }

    #[test]
    fn decodes_negative_offsets() {
        let units = TimeUnits::parse("days since 1850-01-01").unwrap();
        assert_eq!(
            units.decode(-1.0, Calendar::Day360),
            CalendarDateTime::new(1849, 12, 30, 0, 0, 0)
        );
        assert_eq!(
            units.decode(-1.0, Calendar::Standard),
            CalendarDateTime::new(1849, 12, 31, 0, 0, 0)
        );
    }

    #[test]
    fn fractional_values_round_to_seconds() {
        let units = TimeUnits::parse("days since 1850-01-01").unwrap();
        // Half a day.
        assert_eq!(
            units.decode(0.5, Calendar::Standard),
            CalendarDateTime::new(1850, 1, 1, 12, 0, 0)
        );
        // Drift of ~34 seconds past a round minute survives decoding.
        let drifted = 0.25 + 34.0 / 86_400.0;
        assert_eq!(
            units.decode(drifted, Calendar::Standard),
            CalendarDateTime::new(1850, 1, 1, 6, 0, 34)
        );
    }
}
