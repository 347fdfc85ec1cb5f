// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar instants and the day count behind the equation of time.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};

use crate::clock_time::ClockTime;
use crate::error::{Error, Result};

/// First year for which the equation-of-time approximation holds.
pub const FIRST_SUPPORTED_YEAR: i32 = 2000;

/// Last year for which the equation-of-time approximation holds.
pub const LAST_SUPPORTED_YEAR: i32 = 2099;

/// Whether `year` lies in the 2000–2099 window.
#[inline]
pub const fn is_supported_year(year: i32) -> bool {
    year >= FIRST_SUPPORTED_YEAR && year <= LAST_SUPPORTED_YEAR
}

/// A civil date with an hour and minute.
///
/// Built either from the wall clock ([`CalendarInstant::from_datetime`]) or
/// from user input ([`CalendarInstant::new`]). Immutable once constructed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarInstant {
    date: NaiveDate,
    time: ClockTime,
}

impl CalendarInstant {
    /// Validate and build from raw fields.
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Result<Self> {
        let invalid = || Error::InvalidDate {
            year,
            month,
            day,
            hour,
            minute,
        };
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        let time = ClockTime::new(hour, minute).map_err(|_| invalid())?;
        Ok(Self { date, time })
    }

    /// The wall-clock reading of `datetime` in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self::from(datetime.naive_local())
    }

    #[inline]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[inline]
    pub const fn time(&self) -> ClockTime {
        self.time
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    #[inline]
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    #[inline]
    pub const fn hour(&self) -> u32 {
        self.time.hour()
    }

    #[inline]
    pub const fn minute(&self) -> u32 {
        self.time.minute()
    }
}

impl fmt::Display for CalendarInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time)
    }
}

impl From<NaiveDateTime> for CalendarInstant {
    fn from(value: NaiveDateTime) -> Self {
        Self {
            date: value.date(),
            time: ClockTime::of(&value),
        }
    }
}

/// Whole days since 2000-01-01 for the given date and hour.
///
/// Standard civil-calendar to Julian-day transform: January and February
/// count as months 13 and 14 of the previous year, the Gregorian century
/// correction `B = 2 − A + ⌊A/4⌋` is applied, and the epoch offset
/// `730 550.5` shifts the origin to the start of 2000. The sum, including
/// the `hour / 24` fraction, is truncated to an integer.
///
/// Only meaningful for 2000–2099; inputs are not range-checked.
pub(crate) fn days_since_y2k(year: i32, month: u32, day: u32, hour: u32) -> i64 {
    let (yr, mo) = if month <= 2 {
        (i64::from(year) - 1, i64::from(month) + 12)
    } else {
        (i64::from(year), i64::from(month))
    };

    let a = yr / 100;
    let b = 2 - a + a / 4;
    let c = (365.25 * yr as f64) as i64;
    let d = (30.6001 * (mo as f64 + 1.0)) as i64;

    ((b + c + d + i64::from(day)) as f64 + (f64::from(hour) / 24.0 - 730_550.5)) as i64
}
