// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time converter.
//!
//! Given one of the four representations of a time of day, a date and an
//! optional location, [`TimeConverter::convert`] reconstructs the other
//! three:
//!
//! | Frame | hh:mm | metric |
//! |-------|-------|--------|
//! | civil | wall clock of the civil time zone | units since local midnight |
//! | solar | UTC-referenced solar clock | units since UTC midnight |
//!
//! The input frame is always computed. The other frame needs the
//! solar/civil delta and becomes [`Reading::Unavailable`] (both of its
//! styles at once) when no location is known or the date is outside
//! 2000–2099.
//!
//! Civil input evaluates the delta at the entered civil hour (the whole hour
//! containing the decoded value for metric input). Solar input evaluates it
//! at the civil hour the result lands in, so a civil hh:mm taken to solar
//! hh:mm and back on the same date comes home within one minute.
//!
//! [`Entry`] models the keypad that feeds the converter.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc};
use qtty::Seconds;
use tracing::debug;

use crate::clock_time::{ClockMode, ClockTime, Meridiem};
use crate::delta::{solar_delta, GeoCoordinate, SolarCivilDelta};
use crate::error::{Error, Result};
use crate::metric::MetricTime;
use crate::reading::{Reading, Unavailable};

/// Which of the four representations a value is expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeRepresentationKind {
    #[default]
    CivilHhmm,
    CivilMetric,
    SolarHhmm,
    SolarMetric,
}

impl TimeRepresentationKind {
    pub const ALL: [Self; 4] = [
        Self::CivilHhmm,
        Self::CivilMetric,
        Self::SolarHhmm,
        Self::SolarMetric,
    ];

    #[inline]
    pub const fn is_metric(self) -> bool {
        matches!(self, Self::CivilMetric | Self::SolarMetric)
    }
}

impl fmt::Display for TimeRepresentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CivilHhmm => "civil hh:mm",
            Self::CivilMetric => "civil metric",
            Self::SolarHhmm => "solar hh:mm",
            Self::SolarMetric => "solar metric",
        })
    }
}

/// A validated converter input.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConversionRequest {
    CivilHhmm(ClockTime),
    CivilMetric(MetricTime),
    SolarHhmm(ClockTime),
    SolarMetric(MetricTime),
}

impl ConversionRequest {
    /// Validate a raw keypad value for `kind`.
    ///
    /// hh:mm kinds read `value` as `hhmm` under `mode` (see
    /// [`ClockTime::from_hhmm`]); metric kinds accept `0..=9999`.
    pub fn new(
        kind: TimeRepresentationKind,
        value: u16,
        mode: ClockMode,
        meridiem: Meridiem,
    ) -> Result<Self> {
        use TimeRepresentationKind as K;
        Ok(match kind {
            K::CivilHhmm => Self::CivilHhmm(ClockTime::from_hhmm(value, mode, meridiem)?),
            K::SolarHhmm => Self::SolarHhmm(ClockTime::from_hhmm(value, mode, meridiem)?),
            K::CivilMetric => Self::CivilMetric(MetricTime::new(u32::from(value))?),
            K::SolarMetric => Self::SolarMetric(MetricTime::new(u32::from(value))?),
        })
    }

    pub const fn kind(&self) -> TimeRepresentationKind {
        match self {
            Self::CivilHhmm(_) => TimeRepresentationKind::CivilHhmm,
            Self::CivilMetric(_) => TimeRepresentationKind::CivilMetric,
            Self::SolarHhmm(_) => TimeRepresentationKind::SolarHhmm,
            Self::SolarMetric(_) => TimeRepresentationKind::SolarMetric,
        }
    }
}

/// All four representations of one time of day.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConversionResult {
    pub civil_hhmm: Reading<ClockTime>,
    pub civil_metric: Reading<MetricTime>,
    pub solar_hhmm: Reading<ClockTime>,
    pub solar_metric: Reading<MetricTime>,
    /// The delta used, or why there was none.
    pub delta: Reading<SolarCivilDelta>,
}

impl ConversionResult {
    fn new<A, B>(civil: Reading<A>, solar: Reading<B>, delta: Reading<SolarCivilDelta>) -> Self
    where
        A: Timelike,
        B: Timelike,
    {
        Self {
            civil_hhmm: civil.as_ref().map(ClockTime::of),
            civil_metric: civil.as_ref().map(MetricTime::of),
            solar_hhmm: solar.as_ref().map(ClockTime::of),
            solar_metric: solar.as_ref().map(MetricTime::of),
            delta,
        }
    }

    /// One representation rendered for display, `---` when unavailable.
    pub fn render(&self, kind: TimeRepresentationKind, mode: ClockMode) -> String {
        use TimeRepresentationKind as K;
        match kind {
            K::CivilHhmm => self.civil_hhmm.map(|t| t.display(mode)).to_string(),
            K::CivilMetric => self.civil_metric.to_string(),
            K::SolarHhmm => self.solar_hhmm.map(|t| t.display(mode)).to_string(),
            K::SolarMetric => self.solar_metric.to_string(),
        }
    }
}

/// Converts between civil time in `Tz` and UTC-referenced solar time.
#[derive(Debug, Clone)]
pub struct TimeConverter<Tz: TimeZone> {
    tz: Tz,
}

impl<Tz: TimeZone> TimeConverter<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Reconstruct all four representations from `request` on `date`.
    ///
    /// Fails only when a civil input names a wall time that the civil time
    /// zone skips ([`Error::NonexistentLocalTime`]). A missing location or an
    /// unsupported year is not a failure; it leaves the other frame
    /// unavailable.
    pub fn convert(
        &self,
        request: ConversionRequest,
        date: NaiveDate,
        location: Option<&GeoCoordinate>,
    ) -> Result<ConversionResult> {
        let result = match request {
            ConversionRequest::CivilHhmm(t) => self.from_civil_hhmm(t, date, location)?,
            ConversionRequest::CivilMetric(m) => self.from_civil_metric(m, date, location)?,
            ConversionRequest::SolarHhmm(t) => self.from_solar_hhmm(t, date, location),
            ConversionRequest::SolarMetric(m) => self.from_solar_metric(m, date, location),
        };
        if let Some(why) = result.delta.reason() {
            debug!(kind = %request.kind(), %date, %why, "converted without solar delta");
        }
        Ok(result)
    }

    /// Validate the keypad state under `mode`, then convert.
    pub fn convert_entry(
        &self,
        entry: &Entry,
        mode: ClockMode,
        date: NaiveDate,
        location: Option<&GeoCoordinate>,
    ) -> Result<ConversionResult> {
        self.convert(entry.to_request(mode)?, date, location)
    }

    fn from_civil_hhmm(
        &self,
        time: ClockTime,
        date: NaiveDate,
        location: Option<&GeoCoordinate>,
    ) -> Result<ConversionResult> {
        let civil = self.civil_instant(date, time.seconds_since_midnight())?;
        Ok(self.civil_to_solar(civil, solar_delta(date, time.hour(), location)))
    }

    fn from_civil_metric(
        &self,
        metric: MetricTime,
        date: NaiveDate,
        location: Option<&GeoCoordinate>,
    ) -> Result<ConversionResult> {
        let civil = self.civil_instant(date, metric.to_seconds())?;
        Ok(self.civil_to_solar(civil, solar_delta(date, metric.hour(), location)))
    }

    fn from_solar_hhmm(
        &self,
        time: ClockTime,
        date: NaiveDate,
        location: Option<&GeoCoordinate>,
    ) -> ConversionResult {
        let solar = solar_instant(date, time.seconds_since_midnight());
        let delta = solar_delta(date, time.hour(), location)
            .map(|estimate| self.settle_hhmm(time, &solar, estimate, date, location));
        self.solar_to_civil(solar, delta)
    }

    fn from_solar_metric(
        &self,
        metric: MetricTime,
        date: NaiveDate,
        location: Option<&GeoCoordinate>,
    ) -> ConversionResult {
        let solar = solar_instant(date, metric.to_seconds());
        let delta = solar_delta(date, metric.hour(), location).and_then(|estimate| {
            let civil = estimate.to_civil(&solar, &self.tz);
            solar_delta(date, civil.hour(), location)
        });
        self.solar_to_civil(solar, delta)
    }

    /// The delta for solar hh:mm input.
    ///
    /// `estimate` is taken at the solar hour. The wall minutes around the
    /// civil time it gives are tried latest first, and the first one whose
    /// civil-to-solar conversion on `date` reads `time` lends the delta of its
    /// civil hour. The delta jumps where the day count rolls over, so a
    /// solar minute can have two civil preimages or none; without a match
    /// `estimate` is kept.
    fn settle_hhmm(
        &self,
        time: ClockTime,
        solar: &DateTime<Utc>,
        estimate: SolarCivilDelta,
        date: NaiveDate,
        location: Option<&GeoCoordinate>,
    ) -> SolarCivilDelta {
        let civil = estimate.to_civil(solar, &self.tz);
        let Some(minute) = civil.with_second(0).and_then(|t| t.with_nanosecond(0)) else {
            return estimate;
        };
        (-SETTLE_MINUTES..=SETTLE_MINUTES)
            .rev()
            .map(|k| minute.clone() + Duration::minutes(k))
            .find_map(|candidate| {
                let delta = solar_delta(date, candidate.hour(), location).ok()?;
                (ClockTime::of(&delta.to_solar(&candidate)) == time).then_some(delta)
            })
            .unwrap_or(estimate)
    }

    fn civil_to_solar(
        &self,
        civil: DateTime<Tz>,
        delta: std::result::Result<SolarCivilDelta, Unavailable>,
    ) -> ConversionResult {
        let delta = Reading::from(delta);
        let solar = delta.map(|d| d.to_solar(&civil));
        ConversionResult::new(Reading::Value(civil), solar, delta)
    }

    fn solar_to_civil(
        &self,
        solar: DateTime<Utc>,
        delta: std::result::Result<SolarCivilDelta, Unavailable>,
    ) -> ConversionResult {
        let delta = Reading::from(delta);
        let civil = delta.map(|d| d.to_civil(&solar, &self.tz));
        ConversionResult::new(civil, Reading::Value(solar), delta)
    }

    /// The civil instant `seconds` after local midnight of `date`.
    ///
    /// Ambiguous wall times resolve to the earlier instant.
    fn civil_instant(&self, date: NaiveDate, seconds: Seconds) -> Result<DateTime<Tz>> {
        let wall = wall_time(date, seconds);
        self.tz
            .from_local_datetime(&wall)
            .earliest()
            .ok_or(Error::NonexistentLocalTime {
                date,
                hour: wall.hour(),
                minute: wall.minute(),
            })
    }
}

/// How far, in wall minutes, solar hh:mm input looks for its civil preimage.
const SETTLE_MINUTES: i64 = 2;

/// The solar instant `seconds` after UTC midnight of `date`.
fn solar_instant(date: NaiveDate, seconds: Seconds) -> DateTime<Utc> {
    Utc.from_utc_datetime(&wall_time(date, seconds))
}

fn wall_time(date: NaiveDate, seconds: Seconds) -> NaiveDateTime {
    let offset = Duration::microseconds((seconds.value() * 1e6).round() as i64);
    date.and_time(NaiveTime::MIN) + offset
}

/// Maximum number of digits on the keypad.
pub const MAX_DIGITS: usize = 4;

/// Keypad state for the converter.
///
/// Digits are read right-aligned: `9`, `3`, `0` is 9:30 for hh:mm kinds and
/// `0930` for metric kinds. The am/pm flag only applies to hh:mm kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    kind: TimeRepresentationKind,
    digits: String,
    meridiem: Meridiem,
}

impl Entry {
    pub fn new(kind: TimeRepresentationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    #[inline]
    pub fn kind(&self) -> TimeRepresentationKind {
        self.kind
    }

    #[inline]
    pub fn digits(&self) -> &str {
        &self.digits
    }

    #[inline]
    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Switch representation. Typed digits are cleared.
    pub fn select(&mut self, kind: TimeRepresentationKind) {
        if kind != self.kind {
            self.kind = kind;
            self.digits.clear();
        }
    }

    /// Append a digit. Returns `false` when the keypad is full or `digit`
    /// is not 0–9.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        self.digits.push(char::from(b'0' + digit));
        true
    }

    /// Remove the last digit.
    pub fn delete(&mut self) {
        self.digits.pop();
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    /// Set am/pm. Ignored while a metric kind is selected.
    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        if !self.kind.is_metric() {
            self.meridiem = meridiem;
        }
    }

    /// Digits as a number, `None` when nothing was typed.
    pub fn value(&self) -> Option<u16> {
        self.digits.parse().ok()
    }

    /// Validate the entry for `mode`.
    pub fn to_request(&self, mode: ClockMode) -> Result<ConversionRequest> {
        let value = self.value().ok_or(Error::EmptyEntry)?;
        ConversionRequest::new(self.kind, value, mode, self.meridiem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult};

    fn equinox() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    fn pdt() -> TimeConverter<FixedOffset> {
        TimeConverter::new(FixedOffset::west_opt(7 * 3_600).unwrap())
    }

    fn san_francisco() -> GeoCoordinate {
        GeoCoordinate::new(37.77, -122.4).unwrap()
    }

    fn hhmm(h: u32, m: u32) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    /// US Pacific rules for 2024 only: PST, PDT from 2024-03-10 02:00 local,
    /// PST again from 2024-11-03 02:00 local.
    #[derive(Debug, Clone, Copy)]
    struct Pacific2024;

    fn pst() -> FixedOffset {
        FixedOffset::west_opt(8 * 3_600).unwrap()
    }

    fn pdt_offset() -> FixedOffset {
        FixedOffset::west_opt(7 * 3_600).unwrap()
    }

    fn naive(m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    impl TimeZone for Pacific2024 {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            Pacific2024
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            if *local < naive(3, 10, 2) {
                LocalResult::Single(pst())
            } else if *local < naive(3, 10, 3) {
                LocalResult::None
            } else if *local < naive(11, 3, 1) {
                LocalResult::Single(pdt_offset())
            } else if *local < naive(11, 3, 2) {
                LocalResult::Ambiguous(pdt_offset(), pst())
            } else {
                LocalResult::Single(pst())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc >= naive(3, 10, 10) && *utc < naive(11, 3, 9) {
                pdt_offset()
            } else {
                pst()
            }
        }
    }

    #[test]
    fn civil_only_without_location() {
        let request = ConversionRequest::CivilHhmm(hhmm(9, 30));
        let result = pdt().convert(request, equinox(), None).unwrap();

        assert_eq!(result.civil_hhmm, Reading::Value(hhmm(9, 30)));
        assert_eq!(result.civil_metric.to_string(), "3958");
        assert_eq!(result.solar_hhmm.reason(), Some(Unavailable::NoLocation));
        assert_eq!(result.solar_metric.to_string(), "---");
        assert_eq!(result.delta.reason(), Some(Unavailable::NoLocation));
    }

    #[test]
    fn solar_input_without_location_keeps_solar_frame() {
        let metric = MetricTime::new(5_000).unwrap();
        let result = pdt()
            .convert(ConversionRequest::SolarMetric(metric), equinox(), None)
            .unwrap();
        assert_eq!(result.solar_metric, Reading::Value(metric));
        assert_eq!(result.solar_hhmm, Reading::Value(ClockTime::NOON));
        assert!(!result.civil_hhmm.is_available());
        assert!(!result.civil_metric.is_available());
    }

    #[test]
    fn pacific_equinox_noon() {
        let sf = san_francisco();
        let result = pdt()
            .convert(ConversionRequest::CivilHhmm(ClockTime::NOON), equinox(), Some(&sf))
            .unwrap();

        assert_eq!(result.civil_metric.to_string(), "5000");
        // 19:00 UTC − 8 h 16.85 min
        assert_eq!(result.solar_hhmm, Reading::Value(hhmm(10, 43)));
        assert_eq!(result.solar_metric.to_string(), "4466");
        assert_eq!(
            result.render(TimeRepresentationKind::SolarHhmm, ClockMode::TwelveHour),
            "10:43 AM"
        );
    }

    #[test]
    fn civil_solar_round_trip_within_a_minute() {
        let places = [
            (san_francisco(), -7),
            (GeoCoordinate::new(35.68, 139.69).unwrap(), 9),
            (GeoCoordinate::new(40.42, -3.70).unwrap(), 1),
        ];
        let dates = [(2, 12), (3, 20), (6, 21), (11, 3), (12, 24)]
            .map(|(m, d)| NaiveDate::from_ymd_opt(2024, m, d).unwrap());

        for (place, hours) in places {
            let converter = TimeConverter::new(FixedOffset::east_opt(hours * 3_600).unwrap());
            for date in dates {
                for minute in 0..1_440 {
                    let start = hhmm(minute / 60, minute % 60);
                    let forward = converter
                        .convert(ConversionRequest::CivilHhmm(start), date, Some(&place))
                        .unwrap();
                    let solar = forward.solar_hhmm.into_option().unwrap();
                    let back = converter
                        .convert(ConversionRequest::SolarHhmm(solar), date, Some(&place))
                        .unwrap();
                    let civil = back.civil_hhmm.into_option().unwrap();

                    let drift = (i64::from(civil.minutes_since_midnight()) - i64::from(minute))
                        .rem_euclid(1_440);
                    assert!(
                        drift <= 1 || drift >= 1_439,
                        "{date} at {hours:+}h: {start} → {solar} → {civil}"
                    );
                }
            }
        }
    }

    #[test]
    fn solar_input_prefers_the_civil_hour_delta() {
        // 00:00 PDT is 22:42 solar on the previous UTC day. Read back on the
        // same date it lands next to midnight, not two minutes short.
        let sf = san_francisco();
        let back = pdt()
            .convert(ConversionRequest::SolarHhmm(hhmm(22, 42)), equinox(), Some(&sf))
            .unwrap();
        let civil = back.civil_hhmm.into_option().unwrap();
        assert!(civil == hhmm(23, 59) || civil == ClockTime::MIDNIGHT, "{civil}");

        let midnight = pdt()
            .convert(ConversionRequest::CivilHhmm(ClockTime::MIDNIGHT), equinox(), Some(&sf))
            .unwrap();
        assert_eq!(back.delta, midnight.delta);
    }

    #[test]
    fn metric_input_keeps_its_value() {
        let sf = san_francisco();
        for v in [0, 1, 3_958, 5_000, 9_999] {
            let metric = MetricTime::new(v).unwrap();
            let result = pdt()
                .convert(ConversionRequest::CivilMetric(metric), equinox(), Some(&sf))
                .unwrap();
            assert_eq!(result.civil_metric, Reading::Value(metric));
            assert!(result.solar_metric.is_available());
        }
    }

    #[test]
    fn out_of_range_year_is_reported() {
        let sf = san_francisco();
        let date = NaiveDate::from_ymd_opt(2100, 1, 1).unwrap();
        let result = pdt()
            .convert(ConversionRequest::CivilHhmm(ClockTime::NOON), date, Some(&sf))
            .unwrap();
        assert!(result.civil_hhmm.is_available());
        assert_eq!(
            result.solar_hhmm.reason(),
            Some(Unavailable::OutOfRangeDate { year: 2100 })
        );
    }

    #[test]
    fn dst_gap_and_overlap() {
        let converter = TimeConverter::new(Pacific2024);
        let spring = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(
            converter.convert(ConversionRequest::CivilHhmm(hhmm(2, 30)), spring, None),
            Err(Error::NonexistentLocalTime {
                date: spring,
                hour: 2,
                minute: 30
            })
        );

        // 01:30 happens twice on 2024-11-03; the PDT one comes first.
        let fall = NaiveDate::from_ymd_opt(2024, 11, 3).unwrap();
        let sf = san_francisco();
        let first = converter
            .convert(ConversionRequest::CivilHhmm(hhmm(1, 30)), fall, Some(&sf))
            .unwrap();
        let pinned = TimeConverter::new(pdt_offset())
            .convert(ConversionRequest::CivilHhmm(hhmm(1, 30)), fall, Some(&sf))
            .unwrap();
        assert_eq!(first.solar_hhmm, pinned.solar_hhmm);
    }

    #[test]
    fn solar_time_ignores_daylight_saving() {
        // The same solar input lands one civil hour apart across the switch.
        let converter = TimeConverter::new(Pacific2024);
        let sf = san_francisco();
        let before = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let after = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        let solar = ConversionRequest::SolarHhmm(ClockTime::NOON);

        let a = converter.convert(solar, before, Some(&sf)).unwrap();
        let b = converter.convert(solar, after, Some(&sf)).unwrap();
        let (a, b) = (
            a.civil_hhmm.into_option().unwrap(),
            b.civil_hhmm.into_option().unwrap(),
        );
        let shift = i64::from(b.minutes_since_midnight()) - i64::from(a.minutes_since_midnight());
        assert!((shift - 60).abs() <= 1, "{a} → {b}");
    }

    #[test]
    fn keypad_entry() {
        let mut entry = Entry::new(TimeRepresentationKind::CivilHhmm);
        assert_eq!(entry.to_request(ClockMode::TwelveHour), Err(Error::EmptyEntry));

        for d in [9, 3, 0] {
            assert!(entry.push_digit(d));
        }
        entry.set_meridiem(Meridiem::Pm);
        assert_eq!(
            entry.to_request(ClockMode::TwelveHour),
            Ok(ConversionRequest::CivilHhmm(hhmm(21, 30)))
        );
        assert_eq!(
            entry.to_request(ClockMode::TwentyFourHour),
            Ok(ConversionRequest::CivilHhmm(hhmm(9, 30)))
        );

        assert!(entry.push_digit(5));
        assert!(!entry.push_digit(1));
        assert!(!entry.push_digit(10));
        entry.delete();
        assert_eq!(entry.digits(), "930");
        entry.clear();
        assert!(entry.is_empty());
    }

    #[test]
    fn keypad_rejects_invalid_hhmm() {
        let mut entry = Entry::new(TimeRepresentationKind::SolarHhmm);
        for d in [1, 3, 0, 0] {
            entry.push_digit(d);
        }
        assert_eq!(
            entry.to_request(ClockMode::TwelveHour),
            Err(Error::InvalidHhmm {
                hour: 13,
                minute: 0,
                mode: ClockMode::TwelveHour
            })
        );
        assert!(entry.to_request(ClockMode::TwentyFourHour).is_ok());
    }

    #[test]
    fn meridiem_is_ignored_for_metric() {
        let mut entry = Entry::new(TimeRepresentationKind::CivilMetric);
        entry.set_meridiem(Meridiem::Pm);
        assert_eq!(entry.meridiem(), Meridiem::Am);
        entry.push_digit(4);
        entry.push_digit(2);
        assert_eq!(
            entry.to_request(ClockMode::TwelveHour),
            Ok(ConversionRequest::CivilMetric(MetricTime::new(42).unwrap()))
        );

        entry.select(TimeRepresentationKind::SolarHhmm);
        assert!(entry.is_empty());
    }

    #[test]
    fn convert_entry_validates_first() {
        let entry = Entry::new(TimeRepresentationKind::SolarMetric);
        assert_eq!(
            pdt().convert_entry(&entry, ClockMode::TwelveHour, equinox(), None),
            Err(Error::EmptyEntry)
        );
    }
}
