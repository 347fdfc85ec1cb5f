// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Runs a [`SolarClock`] on a timer.
//!
//! [`spawn`] moves the clock into a tokio task that ticks it once per
//! interval (one metric unit, 864 ms, by default) and recomputes right away
//! whenever a [`LocationUpdate`] arrives. The periodic tick and the location
//! subscription live in the same task, so stopping the task through
//! [`ClockHandle::shutdown`] (or dropping the handle) ends both together.

use std::time::Duration;

use chrono::TimeZone;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::engine::{ClockSnapshot, LocationUpdate, SolarClock};
use crate::sun::SunriseSunset;

/// One metric unit.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(864);

const LOCATION_QUEUE: usize = 16;

/// Control side of a running clock.
pub struct ClockHandle<Tz: TimeZone> {
    locations: mpsc::Sender<LocationUpdate>,
    snapshots: watch::Receiver<ClockSnapshot<Tz>>,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl<Tz: TimeZone> ClockHandle<Tz> {
    /// Sender for location events. Clone it into the location provider.
    pub fn locations(&self) -> mpsc::Sender<LocationUpdate> {
        self.locations.clone()
    }

    /// Receiver that sees every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ClockSnapshot<Tz>> {
        self.snapshots.clone()
    }

    /// The latest snapshot.
    pub fn latest(&self) -> ClockSnapshot<Tz> {
        self.snapshots.borrow().clone()
    }

    /// Stop ticking and drop the location subscription, then wait for the
    /// task to finish.
    pub async fn shutdown(self) {
        // The task may already be gone; either way it is stopping.
        let _ = self.shutdown.send(());
        if let Err(err) = self.task.await {
            debug!(%err, "clock task ended abnormally");
        }
    }
}

/// Start ticking `clock` every `interval` on the current tokio runtime.
pub fn spawn<Tz, S>(mut clock: SolarClock<Tz, S>, interval: Duration) -> ClockHandle<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
    S: SunriseSunset + Send + 'static,
{
    let (locations, mut location_rx) = mpsc::channel(LOCATION_QUEUE);
    let (shutdown, mut shutdown_rx) = oneshot::channel();
    let snapshots = clock.subscribe();

    let task = tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "clock started");
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut provider_open = true;

        loop {
            tokio::select! {
                _ = &mut shutdown_rx => break,
                _ = ticker.tick() => {
                    clock.tick();
                }
                update = location_rx.recv(), if provider_open => match update {
                    Some(update) => {
                        clock.apply(update);
                        clock.tick();
                    }
                    None => {
                        debug!("location provider closed");
                        provider_open = false;
                    }
                },
            }
        }
        info!("clock stopped");
    });

    ClockHandle {
        locations,
        snapshots,
        shutdown,
        task,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::GeoCoordinate;
    use crate::error::Result;
    use crate::sun::SunTimes;
    use chrono::{DateTime, Utc};

    fn polar(_: DateTime<Utc>, _: &GeoCoordinate) -> Result<SunTimes<DateTime<Utc>>> {
        Ok(SunTimes::polar())
    }

    #[tokio::test]
    async fn location_events_recompute_immediately() {
        // A long interval: only location events can produce the updates below.
        let handle = spawn(SolarClock::new(Utc, polar), Duration::from_secs(3_600));
        let mut rx = handle.subscribe();

        let fix = GeoCoordinate::new(48.85, 2.35).unwrap();
        handle.locations().send(LocationUpdate::Fix(fix)).await.unwrap();
        let snap = rx.wait_for(|s| s.solar.is_available()).await.unwrap().clone();
        assert_eq!(snap.location, Some(fix));

        handle
            .locations()
            .send(LocationUpdate::Unavailable)
            .await
            .unwrap();
        rx.wait_for(|s| !s.solar.is_available()).await.unwrap();

        handle.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_on_interval() {
        let handle = spawn(SolarClock::new(Utc, polar), DEFAULT_TICK_INTERVAL);
        let mut rx = handle.subscribe();
        rx.mark_unchanged();

        rx.changed().await.unwrap();
        rx.changed().await.unwrap();
        assert!(!handle.latest().solar.is_available());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn shutdown_closes_the_subscription() {
        let handle = spawn(SolarClock::new(Utc, polar), DEFAULT_TICK_INTERVAL);
        let locations = handle.locations();
        let mut rx = handle.subscribe();

        handle.shutdown().await;
        assert!(locations.send(LocationUpdate::Unavailable).await.is_err());
        // The clock (and its watch sender) went away with the task.
        rx.mark_unchanged();
        assert!(rx.changed().await.is_err());
    }
}
