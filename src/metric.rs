// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Four-digit metric time.
//!
//! The day is split into 10 000 equal units of 8.64 s (a hundred microdays).
//! A reading is the number of *whole* units elapsed since the frame's
//! midnight: local midnight for civil time, UTC midnight for solar time.
//!
//! Encoding floors, it never rounds: a unit only ticks over once it has fully
//! elapsed, so `9999` is the last value of a day and `10000` never appears.
//!
//! ```rust
//! use qtty::Seconds;
//! use soltime::MetricTime;
//!
//! let noon = MetricTime::from_seconds(Seconds::new(43_200.0));
//! assert_eq!(noon.to_string(), "5000");
//! assert_eq!(noon.to_seconds(), Seconds::new(43_200.0));
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::Timelike;
use qtty::*;

use crate::error::{Error, Result};

/// Metric units in one day.
pub const UNITS_PER_DAY: u32 = 10_000;

/// Duration of one metric unit: `86 400 s / 10 000`.
pub const UNIT_DURATION: Seconds = Seconds::new(8.64);

/// Absorbs the f64 representation error of exact unit boundaries, so that
/// `n × 8.64 s` encodes back to `n`. About 9 ns, far below one unit.
const BOUNDARY_EPSILON: f64 = 1e-9;

/// A metric time-of-day reading, `0000..=9999`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct MetricTime(u16);

impl MetricTime {
    /// `0000`, exactly at midnight.
    pub const MIDNIGHT: Self = Self(0);

    /// `9999`, the last unit before the next midnight.
    pub const LAST: Self = Self(9_999);

    /// Build from a raw value, rejecting anything above 9999.
    pub fn new(value: u32) -> Result<Self> {
        if value >= UNITS_PER_DAY {
            return Err(Error::InvalidMetric(value));
        }
        Ok(Self(value as u16))
    }

    /// Encode seconds since the frame's midnight, flooring to whole units.
    ///
    /// Values outside `[0, 86 400)` clamp to 0000 or 9999. NaN reads as
    /// 0000.
    pub fn from_seconds(seconds: Seconds) -> Self {
        let units = (seconds.value() / UNIT_DURATION.value() + BOUNDARY_EPSILON).floor();
        Self(units.clamp(0.0, f64::from(UNITS_PER_DAY - 1)) as u16)
    }

    /// Metric reading of any chrono time value, sub-second precision included.
    pub fn of<T: Timelike>(time: &T) -> Self {
        let nanos = f64::from(time.nanosecond().min(999_999_999)) / 1e9;
        Self::from_seconds(Seconds::new(
            f64::from(time.num_seconds_from_midnight()) + nanos,
        ))
    }

    /// Decode to seconds since midnight (start of the unit).
    #[inline]
    pub fn to_seconds(self) -> Seconds {
        UNIT_DURATION * f64::from(self.0)
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    /// Whole hour of the day in which this unit starts.
    #[inline]
    pub fn hour(self) -> u32 {
        (self.to_seconds().value() / 3_600.0).floor() as u32
    }

    /// Fraction of the day elapsed, `0.0..1.0`.
    #[inline]
    pub fn day_progress(self) -> f64 {
        f64::from(self.0) / f64::from(UNITS_PER_DAY)
    }

    /// Day progress as a whole percentage, `0..=100`.
    #[inline]
    pub fn percent_of_day(self) -> u8 {
        (self.day_progress() * 100.0).round() as u8
    }
}

/// Encode seconds since midnight as a zero-padded four-digit string.
pub fn encode_metric(seconds: Seconds) -> String {
    MetricTime::from_seconds(seconds).to_string()
}

/// Decode a metric reading to seconds since midnight.
#[inline]
pub fn decode_metric(value: MetricTime) -> Seconds {
    value.to_seconds()
}

impl fmt::Display for MetricTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

impl FromStr for MetricTime {
    type Err = Error;

    /// Parse one to four decimal digits; `"42"` is `0042`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::EmptyEntry);
        }
        if s.len() > 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidMetric(s.parse().unwrap_or(u32::MAX)));
        }
        let value: u32 = s.parse().map_err(|_| Error::InvalidMetric(u32::MAX))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for MetricTime {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MetricTime> for u32 {
    fn from(value: MetricTime) -> Self {
        u32::from(value.0)
    }
}
