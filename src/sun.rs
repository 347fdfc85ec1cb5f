// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sunrise and sunset.
//!
//! The rise/set computation itself belongs to an astronomical library. This
//! module only defines the seam ([`SunriseSunset`]) and the result shape:
//! each event either happens at an instant or does not happen at all today
//! (polar day or night). "Does not occur" is a real answer and is kept apart
//! from "unavailable" ([`Reading::Unavailable`](crate::Reading)).

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::delta::{GeoCoordinate, SolarCivilDelta};
use crate::error::Result;

/// Placeholder shown for an event that does not happen today.
pub const NO_EVENT_TEXT: &str = "none";

/// A sunrise or sunset.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SunEvent<T> {
    /// The event happens at this instant.
    At(T),
    /// Polar day or night: the sun does not rise (or set) today.
    DoesNotOccur,
}

impl<T> SunEvent<T> {
    #[inline]
    pub fn instant(&self) -> Option<&T> {
        match self {
            SunEvent::At(t) => Some(t),
            SunEvent::DoesNotOccur => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> SunEvent<U> {
        match self {
            SunEvent::At(t) => SunEvent::At(f(t)),
            SunEvent::DoesNotOccur => SunEvent::DoesNotOccur,
        }
    }
}

impl<T: fmt::Display> fmt::Display for SunEvent<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SunEvent::At(t) => t.fmt(f),
            SunEvent::DoesNotOccur => f.write_str(NO_EVENT_TEXT),
        }
    }
}

/// Sunrise and sunset of one day.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunTimes<T> {
    pub sunrise: SunEvent<T>,
    pub sunset: SunEvent<T>,
}

impl<T> SunTimes<T> {
    /// Both events missing: polar day or polar night.
    pub const fn polar() -> Self {
        Self {
            sunrise: SunEvent::DoesNotOccur,
            sunset: SunEvent::DoesNotOccur,
        }
    }

    pub fn map<U, F: Fn(T) -> U>(self, f: F) -> SunTimes<U> {
        SunTimes {
            sunrise: self.sunrise.map(&f),
            sunset: self.sunset.map(&f),
        }
    }
}

impl SunTimes<DateTime<Utc>> {
    /// Express both events on the civil axis of `tz`.
    pub fn in_timezone<Tz: TimeZone>(&self, tz: &Tz) -> SunTimes<DateTime<Tz>> {
        self.map(|t| t.with_timezone(tz))
    }

    /// Shift both events by `delta` onto the solar axis.
    pub fn shifted(&self, delta: &SolarCivilDelta) -> SunTimes<DateTime<Utc>> {
        self.map(|t| delta.to_solar(&t))
    }
}

/// Source of sunrise/sunset instants.
///
/// Implementations compute the events of the day containing `instant` at
/// `location`, as UTC instants. Closures with the same signature implement
/// the trait, which keeps test doubles short.
pub trait SunriseSunset {
    fn sunrise_sunset(
        &self,
        instant: DateTime<Utc>,
        location: &GeoCoordinate,
    ) -> Result<SunTimes<DateTime<Utc>>>;
}

impl<F> SunriseSunset for F
where
    F: Fn(DateTime<Utc>, &GeoCoordinate) -> Result<SunTimes<DateTime<Utc>>>,
{
    fn sunrise_sunset(
        &self,
        instant: DateTime<Utc>,
        location: &GeoCoordinate,
    ) -> Result<SunTimes<DateTime<Utc>>> {
        self(instant, location)
    }
}

/// [`SunriseSunset`] backed by the NREL solar position algorithm.
#[cfg(feature = "spa")]
#[derive(Debug, Copy, Clone, Default)]
pub struct SpaSunriseSunset;

#[cfg(feature = "spa")]
impl SunriseSunset for SpaSunriseSunset {
    fn sunrise_sunset(
        &self,
        instant: DateTime<Utc>,
        location: &GeoCoordinate,
    ) -> Result<SunTimes<DateTime<Utc>>> {
        use spa::{sunrise_and_set, StdFloatOps, SunriseAndSet};

        let lat = location.latitude().value();
        let lon = location.longitude().value();
        match sunrise_and_set::<StdFloatOps>(instant, lat, lon) {
            Ok(SunriseAndSet::Daylight(sunrise, sunset)) => Ok(SunTimes {
                sunrise: SunEvent::At(sunrise),
                sunset: SunEvent::At(sunset),
            }),
            Ok(SunriseAndSet::PolarDay) | Ok(SunriseAndSet::PolarNight) => Ok(SunTimes::polar()),
            Err(e) => Err(crate::error::Error::SunCalculation(format!("{e:?}"))),
        }
    }
}
