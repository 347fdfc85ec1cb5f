// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the time model and converter.
//!
//! Every failure here is local and recoverable: the engine never aborts on
//! bad input, it hands the caller something to render.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`OutOfRangeDate`](Error::OutOfRangeDate) | [`equation_of_time`](crate::equation_of_time) outside 2000–2099 |
//! | [`InvalidDate`](Error::InvalidDate) | calendar construction |
//! | [`InvalidHhmm`](Error::InvalidHhmm) | hh:mm entry outside the active clock mode |
//! | [`InvalidMetric`](Error::InvalidMetric) | metric value above 9999 |
//! | [`EmptyEntry`](Error::EmptyEntry) | convert requested with no digits entered |
//! | [`NonexistentLocalTime`](Error::NonexistentLocalTime) | civil wall time skipped by a DST transition |
//! | [`InvalidCoordinate`](Error::InvalidCoordinate) | latitude/longitude outside their ranges |
//! | [`SunCalculation`](Error::SunCalculation) | sunrise/sunset collaborator failure |
//!
//! A missing location is deliberately *not* an error. Solar-side values
//! carry [`Reading::Unavailable`](crate::Reading::Unavailable) instead.

use thiserror::Error;

use crate::clock_time::ClockMode;

/// Errors produced by `soltime`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The equation-of-time approximation only holds for 2000–2099.
    #[error("year {year} is outside the supported range 2000-2099")]
    OutOfRangeDate { year: i32 },

    /// The calendar fields do not name a real date/time.
    #[error("invalid date {year}-{month:02}-{day:02} {hour:02}:{minute:02}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
    },

    /// hh:mm entry outside the range allowed by the clock mode.
    #[error("invalid time {hour:02}:{minute:02} for {mode} clock")]
    InvalidHhmm {
        hour: u32,
        minute: u32,
        mode: ClockMode,
    },

    /// Metric values run from 0000 to 9999.
    #[error("invalid metric time {0}: must be 0000-9999")]
    InvalidMetric(u32),

    /// Convert was requested with nothing typed in.
    #[error("no digits entered")]
    EmptyEntry,

    /// The civil wall time falls in a gap of the civil time zone.
    #[error("{date} {hour:02}:{minute:02} does not exist in the civil time zone")]
    NonexistentLocalTime {
        date: chrono::NaiveDate,
        hour: u32,
        minute: u32,
    },

    /// Latitude must be within ±90°, longitude within ±180°.
    #[error("invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// The sunrise/sunset collaborator rejected its input.
    #[error("sunrise/sunset calculation failed: {0}")]
    SunCalculation(String),
}

/// Shorthand for results with [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        let err = Error::InvalidHhmm {
            hour: 13,
            minute: 0,
            mode: ClockMode::TwelveHour,
        };
        assert_eq!(err.to_string(), "invalid time 13:00 for 12-hour clock");

        assert_eq!(
            Error::OutOfRangeDate { year: 2100 }.to_string(),
            "year 2100 is outside the supported range 2000-2099"
        );
        assert_eq!(
            Error::InvalidMetric(10_000).to_string(),
            "invalid metric time 10000: must be 0000-9999"
        );
    }
}
