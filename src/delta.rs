// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar/civil delta.
//!
//! The offset that carries a civil instant onto the solar axis:
//!
//! ```text
//! solar = civil + delta
//! delta = (−EoT + 4 min/° × longitude) × 60 s/min
//! ```
//!
//! The equation-of-time term is negated (the model returns clock minus sun),
//! the longitude term is added as is: every degree east of Greenwich puts
//! the sun four minutes earlier. The civil time zone plays no part: the
//! solar instant is read against UTC midnight.
//!
//! A delta is only valid for the date, hour and location it was computed
//! from. It moves with the equation of time, so recompute it per instant.

use std::fmt;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use qtty::*;

use crate::calendar::{is_supported_year, CalendarInstant};
use crate::equation_of_time::equation_of_time_minutes;
use crate::error::{Error, Result};
use crate::reading::Unavailable;

/// Minutes of clock time per degree of longitude (24 h / 360°).
const MINUTES_PER_DEGREE: f64 = 4.0;

/// A position on the Earth's surface.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoCoordinate {
    latitude: Degrees,
    longitude: Degrees,
}

impl GeoCoordinate {
    /// Build from degrees, rejecting latitudes beyond ±90° and longitudes
    /// beyond ±180°.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude: Degrees::new(latitude),
            longitude: Degrees::new(longitude),
        })
    }

    #[inline]
    pub const fn latitude(&self) -> Degrees {
        self.latitude
    }

    #[inline]
    pub const fn longitude(&self) -> Degrees {
        self.longitude
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.4}°, {:.4}°",
            self.latitude.value(),
            self.longitude.value()
        )
    }
}

/// Signed offset such that `solar = civil + delta`.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct SolarCivilDelta(Seconds);

impl SolarCivilDelta {
    #[inline]
    pub const fn new(seconds: Seconds) -> Self {
        Self(seconds)
    }

    #[inline]
    pub const fn seconds(&self) -> Seconds {
        self.0
    }

    #[inline]
    pub fn minutes(&self) -> Minutes {
        self.0.to::<Minute>()
    }

    /// The delta as a chrono duration, at microsecond resolution.
    pub fn to_duration(&self) -> chrono::Duration {
        chrono::Duration::microseconds((self.0.value() * 1e6).round() as i64)
    }

    /// Carry a civil instant onto the solar axis.
    pub fn to_solar<Tz: TimeZone>(&self, civil: &DateTime<Tz>) -> DateTime<Utc> {
        civil.with_timezone(&Utc) + self.to_duration()
    }

    /// Carry a solar instant back onto the civil axis of `tz`.
    pub fn to_civil<Tz: TimeZone>(&self, solar: &DateTime<Utc>, tz: &Tz) -> DateTime<Tz> {
        (*solar - self.to_duration()).with_timezone(tz)
    }
}

impl fmt::Display for SolarCivilDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.1} min", self.minutes().value())
    }
}

/// Solar/civil delta for `date` at `hour` and `location`.
///
/// Unavailable with [`Unavailable::OutOfRangeDate`] outside 2000–2099, and
/// with [`Unavailable::NoLocation`] when `location` is `None`. The two stay
/// distinct so callers can tell a bad date from a missing fix.
pub fn solar_delta(
    date: NaiveDate,
    hour: u32,
    location: Option<&GeoCoordinate>,
) -> std::result::Result<SolarCivilDelta, Unavailable> {
    use chrono::Datelike;

    let year = date.year();
    if !is_supported_year(year) {
        return Err(Unavailable::OutOfRangeDate { year });
    }
    let location = location.ok_or(Unavailable::NoLocation)?;

    let eot = equation_of_time_minutes(year, date.month(), date.day(), hour);
    let offset = Minutes::new(-eot + location.longitude.value() * MINUTES_PER_DEGREE);
    Ok(SolarCivilDelta(offset.to::<Second>()))
}

impl CalendarInstant {
    /// Solar/civil delta at this instant's date and hour.
    #[inline]
    pub fn solar_delta(
        &self,
        location: Option<&GeoCoordinate>,
    ) -> std::result::Result<SolarCivilDelta, Unavailable> {
        solar_delta(self.date(), self.hour(), location)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl serde::Serialize for GeoCoordinate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut s = serializer.serialize_struct("GeoCoordinate", 2)?;
        s.serialize_field("latitude", &self.latitude.value())?;
        s.serialize_field("longitude", &self.longitude.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for GeoCoordinate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            latitude: f64,
            longitude: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        GeoCoordinate::new(raw.latitude, raw.longitude).map_err(serde::de::Error::custom)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SolarCivilDelta {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for SolarCivilDelta {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v = <f64 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self(Seconds::new(v)))
    }
}
