// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Equation of Time — four-harmonic Fourier approximation
//!
//! The equation of time is the periodic drift between mean (clock) time and
//! apparent (sun) time, driven by the eccentricity of the Earth's orbit and
//! the tilt of its axis. Over a year it swings between roughly ±16 minutes.
//!
//! This module evaluates a cheap regression fit of observed solar positions:
//! four sinusoidal harmonics of the position within a four-year leap cycle,
//! plus a constant bias.
//!
//! ## Sign convention
//! The value returned is **clock minus sun**: positive when the clock is
//! ahead of the sun (mid-February, ≈ +14 min), negative when the sun is ahead
//! (early November, ≈ −16 min). [`solar_delta`](crate::solar_delta) negates
//! it when shifting a civil instant onto the solar axis.
//!
//! ## Valid range
//! Accurate to about ±13 s for any date from 2000 through 2099. Outside that
//! window the fit degrades without bound, so the checked entry point
//! [`equation_of_time`] refuses such dates.
//!
//! ## Reference
//! * equation-of-time.info, *Calculating the equation of time*

use chrono::{Datelike, NaiveDate};
use qtty::*;

use crate::calendar::{days_since_y2k, is_supported_year, CalendarInstant};
use crate::error::{Error, Result};

/// Length of the leap cycle in quarter-days (`4 × 365.25`).
const LEAP_CYCLE: f64 = 1_461.0;

/// Radians per quarter-day of the leap cycle.
const CYCLE_TO_RADIANS: f64 = 0.004_301;

/// Constant bias of the fit, in minutes.
const BIAS_MIN: f64 = 0.019;

/// `(amplitude in minutes, phase in radians)` for harmonics 1 through 4.
const HARMONICS: [(f64, f64); 4] = [
    (7.353, 6.209),
    (9.927, 0.37),
    (0.337, 0.304),
    (0.232, 0.715),
];

/// Raw equation of time, in minutes, for a date and hour.
///
/// This is the unchecked model: the caller must ensure
/// `2000 ≤ year ≤ 2099`. Prefer [`equation_of_time`] unless the range has
/// already been validated.
pub fn equation_of_time_minutes(year: i32, month: u32, day: u32, hour: u32) -> f64 {
    let days = days_since_y2k(year, month, day, hour);

    let mut cycle = 4.0 * days as f64;
    cycle -= (cycle / LEAP_CYCLE).trunc() * LEAP_CYCLE;
    let theta = cycle * CYCLE_TO_RADIANS;

    HARMONICS
        .iter()
        .enumerate()
        .fold(BIAS_MIN, |eot, (i, &(amplitude, phase))| {
            let k = (i + 1) as f64;
            eot + amplitude * (k * theta + phase).sin()
        })
}

/// Equation of time for `date` at `hour` (0–23, civil wall clock).
///
/// Returns [`Error::OutOfRangeDate`] outside 2000–2099.
pub fn equation_of_time(date: NaiveDate, hour: u32) -> Result<Minutes> {
    let year = date.year();
    if !is_supported_year(year) {
        return Err(Error::OutOfRangeDate { year });
    }
    Ok(Minutes::new(equation_of_time_minutes(
        year,
        date.month(),
        date.day(),
        hour,
    )))
}

impl CalendarInstant {
    /// Equation of time at this instant's date and hour.
    #[inline]
    pub fn equation_of_time(&self) -> Result<Minutes> {
        equation_of_time(self.date(), self.hour())
    }
}
