// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Conventional hours:minutes values.
//!
//! [`ClockTime`] always stores a 24-hour `hour` in `0..=23`. The 12-hour
//! form only exists at the edges: when validating keypad input
//! ([`ClockTime::from_hhmm`]) and when rendering ([`ClockTime::display`]).

use std::fmt;

use chrono::Timelike;
use qtty::*;

use crate::error::{Error, Result};

/// Whether hh:mm values are entered and shown on a 12- or 24-hour dial.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClockMode {
    #[default]
    TwelveHour,
    TwentyFourHour,
}

impl fmt::Display for ClockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockMode::TwelveHour => f.write_str("12-hour"),
            ClockMode::TwentyFourHour => f.write_str("24-hour"),
        }
    }
}

/// Ante or post meridiem, for 12-hour entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Meridiem {
    #[default]
    Am,
    Pm,
}

/// A time of day at minute resolution.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Midnight, 00:00.
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Noon, 12:00.
    pub const NOON: Self = Self {
        hour: 12,
        minute: 0,
    };

    /// Build from a 24-hour `hour` and a `minute`.
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        if hour > 23 || minute > 59 {
            return Err(Error::InvalidHhmm {
                hour,
                minute,
                mode: ClockMode::TwentyFourHour,
            });
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
        })
    }

    /// Validate a four-digit `hhmm` entry and normalise it to 24 hours.
    ///
    /// * 12-hour mode: `1 ≤ hh ≤ 12`, `0 ≤ mm ≤ 59`; `Pm` adds twelve hours
    ///   unless the hour is already 12, `Am` takes twelve off 12 (so 12:15 am
    ///   is 00:15).
    /// * 24-hour mode: `0 ≤ hh ≤ 23`, `0 ≤ mm ≤ 59`; the meridiem is ignored.
    ///
    /// Out-of-range values are rejected with [`Error::InvalidHhmm`], never
    /// wrapped or clamped.
    pub fn from_hhmm(hhmm: u16, mode: ClockMode, meridiem: Meridiem) -> Result<Self> {
        let hour = u32::from(hhmm / 100);
        let minute = u32::from(hhmm % 100);
        let invalid = Error::InvalidHhmm { hour, minute, mode };

        match mode {
            ClockMode::TwelveHour => {
                if !(1..=12).contains(&hour) || minute > 59 {
                    return Err(invalid);
                }
                let hour = match meridiem {
                    Meridiem::Pm if hour < 12 => hour + 12,
                    Meridiem::Am if hour >= 12 => hour - 12,
                    _ => hour,
                };
                Self::new(hour, minute)
            }
            ClockMode::TwentyFourHour => Self::new(hour, minute).map_err(|_| invalid),
        }
    }

    /// Wall-clock hour and minute of any chrono time value.
    pub fn of<T: Timelike>(time: &T) -> Self {
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// 24-hour hour, `0..=23`.
    #[inline]
    pub const fn hour(&self) -> u32 {
        self.hour as u32
    }

    #[inline]
    pub const fn minute(&self) -> u32 {
        self.minute as u32
    }

    /// The value as a 24-hour `hhmm` number, e.g. `1330`.
    #[inline]
    pub const fn hhmm(&self) -> u16 {
        self.hour as u16 * 100 + self.minute as u16
    }

    /// Seconds elapsed since midnight.
    pub fn seconds_since_midnight(&self) -> Seconds {
        Seconds::new(f64::from(self.hour() * 3_600 + self.minute() * 60))
    }

    /// Minutes elapsed since midnight.
    #[inline]
    pub const fn minutes_since_midnight(&self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    /// Render for the given clock mode: `h:mm AM` or `HH:mm`.
    pub fn display(self, mode: ClockMode) -> ClockDisplay {
        ClockDisplay { time: self, mode }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// A [`ClockTime`] bound to a [`ClockMode`] for display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClockDisplay {
    time: ClockTime,
    mode: ClockMode,
}

impl fmt::Display for ClockDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ClockMode::TwentyFourHour => write!(f, "{}", self.time),
            ClockMode::TwelveHour => {
                let suffix = if self.time.hour < 12 { "AM" } else { "PM" };
                let hour = match self.time.hour % 12 {
                    0 => 12,
                    h => h,
                };
                write!(f, "{}:{:02} {}", hour, self.time.minute, suffix)
            }
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ClockTime {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            hour: u32,
            minute: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        ClockTime::new(raw.hour, raw.minute).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_hour_entry_applies_meridiem() {
        let pm = ClockTime::from_hhmm(930, ClockMode::TwelveHour, Meridiem::Pm).unwrap();
        assert_eq!(pm.hhmm(), 2130);

        let noon = ClockTime::from_hhmm(1200, ClockMode::TwelveHour, Meridiem::Pm).unwrap();
        assert_eq!(noon, ClockTime::NOON);

        let after_midnight =
            ClockTime::from_hhmm(1215, ClockMode::TwelveHour, Meridiem::Am).unwrap();
        assert_eq!(after_midnight.hhmm(), 15);

        let morning = ClockTime::from_hhmm(945, ClockMode::TwelveHour, Meridiem::Am).unwrap();
        assert_eq!(morning.hhmm(), 945);
    }

    #[test]
    fn twelve_hour_entry_rejects_out_of_range() {
        for hhmm in [1300, 0, 30, 1260, 999] {
            let err = ClockTime::from_hhmm(hhmm, ClockMode::TwelveHour, Meridiem::Am).unwrap_err();
            assert!(matches!(err, Error::InvalidHhmm { .. }), "{hhmm} accepted");
        }
    }

    #[test]
    fn twenty_four_hour_entry() {
        let t = ClockTime::from_hhmm(0, ClockMode::TwentyFourHour, Meridiem::Pm).unwrap();
        assert_eq!(t, ClockTime::MIDNIGHT);

        let t = ClockTime::from_hhmm(2359, ClockMode::TwentyFourHour, Meridiem::Am).unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));

        let err = ClockTime::from_hhmm(2400, ClockMode::TwentyFourHour, Meridiem::Am).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidHhmm {
                hour: 24,
                minute: 0,
                mode: ClockMode::TwentyFourHour
            }
        );
    }

    #[test]
    fn seconds_since_midnight() {
        let t = ClockTime::new(17, 42).unwrap();
        assert_eq!(t.seconds_since_midnight(), Seconds::new(63_720.0));
        assert_eq!(t.minutes_since_midnight(), 1_062);
    }

    #[test]
    fn display_modes() {
        let t = ClockTime::new(0, 5).unwrap();
        assert_eq!(t.display(ClockMode::TwelveHour).to_string(), "12:05 AM");
        assert_eq!(t.display(ClockMode::TwentyFourHour).to_string(), "00:05");

        let t = ClockTime::new(13, 30).unwrap();
        assert_eq!(t.display(ClockMode::TwelveHour).to_string(), "1:30 PM");
        assert_eq!(t.to_string(), "13:30");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_validates() {
        let t: ClockTime = serde_json::from_str(r#"{"hour":21,"minute":30}"#).unwrap();
        assert_eq!(t.hhmm(), 2130);
        assert_eq!(serde_json::to_string(&t).unwrap(), r#"{"hour":21,"minute":30}"#);

        for json in [r#"{"hour":24,"minute":0}"#, r#"{"hour":99,"minute":75}"#] {
            let err = serde_json::from_str::<ClockTime>(json).unwrap_err();
            assert!(err.to_string().contains("invalid"), "{json}: {err}");
        }
    }
}
