// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Solar time engine.
//!
//! [`SolarClock`] owns the last known location and the current
//! [`ClockSnapshot`]. Each [`tick`](SolarClock::tick) builds a fresh snapshot
//! from the wall clock and *replaces* the previous one, then publishes it to
//! every subscriber through a `tokio::sync::watch` channel.
//!
//! Without a location the whole solar side of the snapshot is
//! [`Reading::Unavailable`] at once; there is no state in which some solar
//! fields are filled and others are not.
//!
//! The engine is synchronous and single-owner. [`crate::driver`] runs it on a
//! timer and feeds it location events.

use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::calendar::CalendarInstant;
use crate::clock_time::ClockTime;
use crate::delta::{GeoCoordinate, SolarCivilDelta};
use crate::metric::MetricTime;
use crate::reading::{Reading, Unavailable};
use crate::sun::{SunTimes, SunriseSunset};

/// Event delivered by a location provider.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LocationUpdate {
    /// A new position fix. Replaces the previous one.
    Fix(GeoCoordinate),
    /// Location access was denied or restricted. Same as having no fix.
    Unavailable,
}

/// One instant read on one clock face: wall time, hh:mm and metric.
///
/// For the civil frame the wall clock is the civil time zone's; for the
/// solar frame it is UTC, so that daylight-saving shifts never touch the
/// solar reading.
#[derive(Debug, Clone)]
pub struct FrameTime<Tz: TimeZone> {
    pub instant: DateTime<Tz>,
    pub clock: ClockTime,
    pub metric: MetricTime,
}

impl<Tz: TimeZone> FrameTime<Tz> {
    pub fn new(instant: DateTime<Tz>) -> Self {
        let clock = ClockTime::of(&instant);
        let metric = MetricTime::of(&instant);
        Self {
            instant,
            clock,
            metric,
        }
    }

    /// Fraction of this frame's day elapsed.
    #[inline]
    pub fn day_progress(&self) -> f64 {
        self.metric.day_progress()
    }
}

/// Solar side of a snapshot: only exists when the delta could be computed.
#[derive(Debug, Clone)]
pub struct SolarReading {
    pub delta: SolarCivilDelta,
    pub now: FrameTime<Utc>,
    pub sun: Reading<SunTimes<FrameTime<Utc>>>,
}

/// Everything the engine publishes after one tick.
#[derive(Debug, Clone)]
pub struct ClockSnapshot<Tz: TimeZone> {
    pub civil: FrameTime<Tz>,
    pub civil_sun: Reading<SunTimes<FrameTime<Tz>>>,
    pub solar: Reading<SolarReading>,
    pub location: Option<GeoCoordinate>,
}

impl<Tz: TimeZone> ClockSnapshot<Tz> {
    /// The current solar instant, if solar time is available.
    pub fn solar_instant(&self) -> Option<DateTime<Utc>> {
        self.solar.value().map(|s| s.now.instant)
    }

    /// The delta in use, if solar time is available.
    pub fn delta(&self) -> Option<SolarCivilDelta> {
        self.solar.value().map(|s| s.delta)
    }
}

/// Build the snapshot for `now` without touching any engine state.
pub fn snapshot_at<Tz, S>(
    now: DateTime<Utc>,
    tz: &Tz,
    location: Option<&GeoCoordinate>,
    sun: &S,
) -> ClockSnapshot<Tz>
where
    Tz: TimeZone,
    S: SunriseSunset + ?Sized,
{
    let civil_instant = now.with_timezone(tz);
    let civil = FrameTime::new(civil_instant.clone());

    let Some(location) = location else {
        return ClockSnapshot {
            civil,
            civil_sun: Reading::Unavailable(Unavailable::NoLocation),
            solar: Reading::Unavailable(Unavailable::NoLocation),
            location: None,
        };
    };

    let sun_times = sun.sunrise_sunset(now, location).map_err(|err| {
        warn!(%err, %location, "sunrise/sunset lookup failed");
        Unavailable::SunCalculationFailed
    });

    let civil_sun = Reading::from(
        sun_times
            .as_ref()
            .map(|times| times.in_timezone(tz).map(FrameTime::new))
            .map_err(|why| *why),
    );

    let wall = CalendarInstant::from_datetime(&civil_instant);
    let solar = Reading::from(wall.solar_delta(Some(location))).map(|delta| SolarReading {
        delta,
        now: FrameTime::new(delta.to_solar(&civil_instant)),
        sun: Reading::from(
            sun_times
                .as_ref()
                .map(|times| times.shifted(&delta).map(FrameTime::new))
                .map_err(|why| *why),
        ),
    });

    ClockSnapshot {
        civil,
        civil_sun,
        solar,
        location: Some(*location),
    }
}

/// The live civil/solar clock.
pub struct SolarClock<Tz: TimeZone, S> {
    tz: Tz,
    sun: S,
    location: Option<GeoCoordinate>,
    snapshot: ClockSnapshot<Tz>,
    publisher: watch::Sender<ClockSnapshot<Tz>>,
}

impl<Tz, S> SolarClock<Tz, S>
where
    Tz: TimeZone,
    S: SunriseSunset,
{
    /// A clock for civil time zone `tz`, with no location yet.
    ///
    /// The first snapshot is taken immediately.
    pub fn new(tz: Tz, sun: S) -> Self {
        Self::starting_at(tz, sun, Utc::now())
    }

    /// Like [`new`](Self::new) with an explicit first instant.
    pub fn starting_at(tz: Tz, sun: S, now: DateTime<Utc>) -> Self {
        let snapshot = snapshot_at(now, &tz, None, &sun);
        let (publisher, _) = watch::channel(snapshot.clone());
        Self {
            tz,
            sun,
            location: None,
            snapshot,
            publisher,
        }
    }

    /// Start from a known location.
    pub fn with_location(mut self, location: GeoCoordinate) -> Self {
        self.location = Some(location);
        self
    }

    #[inline]
    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    #[inline]
    pub fn location(&self) -> Option<&GeoCoordinate> {
        self.location.as_ref()
    }

    /// The most recent snapshot.
    #[inline]
    pub fn snapshot(&self) -> &ClockSnapshot<Tz> {
        &self.snapshot
    }

    /// Observe every future snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ClockSnapshot<Tz>> {
        self.publisher.subscribe()
    }

    /// Record a location event. Takes effect on the next tick.
    pub fn apply(&mut self, update: LocationUpdate) {
        match update {
            LocationUpdate::Fix(location) => {
                if self.location.is_none() {
                    info!(%location, "location acquired");
                } else {
                    debug!(%location, "location updated");
                }
                self.location = Some(location);
            }
            LocationUpdate::Unavailable => {
                if self.location.take().is_some() {
                    info!("location lost, solar time unavailable");
                }
            }
        }
    }

    /// Recompute from the system clock.
    pub fn tick(&mut self) -> &ClockSnapshot<Tz> {
        self.tick_at(Utc::now())
    }

    /// Recompute for `now`, replace the snapshot and publish it.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> &ClockSnapshot<Tz> {
        let previous = self.snapshot.solar.reason();
        self.snapshot = snapshot_at(now, &self.tz, self.location.as_ref(), &self.sun);
        let current = self.snapshot.solar.reason();
        if current != previous {
            match current {
                Some(Unavailable::OutOfRangeDate { year }) => {
                    warn!(year, "date outside 2000-2099, solar time unavailable")
                }
                Some(why) => debug!(%why, "solar time unavailable"),
                None => debug!("solar time available"),
            }
        }
        let civil = &self.snapshot.civil;
        debug!(clock = %civil.clock, metric = %civil.metric, "tick");
        self.publisher.send_replace(self.snapshot.clone());
        &self.snapshot
    }
}
