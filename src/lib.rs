// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil and solar time of day.
//!
//! Civil time is what the time zone's clock shows. Solar time follows the
//! sun: at solar noon the sun crosses the local meridian. The two differ by
//! the longitude offset from the zone's reference and by the *equation of
//! time*, the yearly wobble caused by the Earth's tilt and eccentric orbit.
//!
//! Each frame can be read as `hh:mm` or as four-digit *metric* time, the
//! number of ten-thousandths of a day elapsed since midnight.
//!
//! # Core types
//!
//! - [`SolarClock`] keeps a live snapshot of both frames, ticked by
//!   [`driver::spawn`] every 864 ms (one metric unit).
//! - [`TimeConverter`] turns any one of the four representations into the
//!   other three for a given date and location.
//! - [`MetricTime`] is the four-digit codec.
//! - [`equation_of_time()`] and [`solar_delta()`] are the underlying model.
//! - [`Reading<T>`] is a value or the reason it is missing, shown as `---`.
//!
//! # Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`calendar`] | [`CalendarInstant`], supported year range |
//! | [`equation_of_time`](mod@equation_of_time) | four-harmonic EoT fit, 2000–2099 |
//! | [`metric`] | [`MetricTime`], 8.64 s units |
//! | [`clock_time`] | [`ClockTime`], 12/24-hour modes |
//! | [`delta`] | [`GeoCoordinate`], [`SolarCivilDelta`] |
//! | [`sun`] | sunrise/sunset collaborator |
//! | [`engine`] | [`SolarClock`], [`ClockSnapshot`] |
//! | [`driver`] | tokio tick/location loop |
//! | [`converter`] | [`TimeConverter`], keypad [`Entry`] |
//! | `config` | TOML [`ClockConfig`] (feature `config`) |
//!
//! # Solar frame
//!
//! Solar instants are `DateTime<Utc>`: solar hh:mm and solar metric are read
//! against UTC midnight, so daylight-saving transitions in the civil zone
//! never shift them.
//!
//! ```rust
//! use chrono::{FixedOffset, NaiveDate};
//! use soltime::{ClockTime, ConversionRequest, GeoCoordinate, TimeConverter};
//!
//! let pdt = FixedOffset::west_opt(7 * 3600).unwrap();
//! let sf = GeoCoordinate::new(37.77, -122.4).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 20).unwrap();
//!
//! let result = TimeConverter::new(pdt)
//!     .convert(ConversionRequest::CivilHhmm(ClockTime::NOON), date, Some(&sf))
//!     .unwrap();
//! assert_eq!(result.civil_metric.to_string(), "5000");
//! assert_eq!(result.solar_hhmm.to_string(), "10:43");
//! ```

pub mod calendar;
pub mod clock_time;
#[cfg(feature = "config")]
pub mod config;
pub mod converter;
pub mod delta;
pub mod driver;
pub mod engine;
pub mod equation_of_time;
mod error;
pub mod metric;
pub mod reading;
pub mod sun;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{CalendarInstant, FIRST_SUPPORTED_YEAR, LAST_SUPPORTED_YEAR};
pub use clock_time::{ClockMode, ClockTime, Meridiem};
#[cfg(feature = "config")]
pub use config::{ClockConfig, ConfigError, LocationConfig};
pub use converter::{
    ConversionRequest, ConversionResult, Entry, TimeConverter, TimeRepresentationKind,
};
pub use delta::{solar_delta, GeoCoordinate, SolarCivilDelta};
pub use driver::{ClockHandle, DEFAULT_TICK_INTERVAL};
pub use engine::{ClockSnapshot, FrameTime, LocationUpdate, SolarClock, SolarReading};
pub use equation_of_time::{equation_of_time, equation_of_time_minutes};
pub use error::{Error, Result};
pub use metric::{decode_metric, encode_metric, MetricTime};
pub use reading::{Reading, Unavailable};
#[cfg(feature = "spa")]
pub use sun::SpaSunriseSunset;
pub use sun::{SunEvent, SunTimes, SunriseSunset};
