//! Data models for navigation processing
//!
//! This module contains the value types shared by every stage of the
//! pipeline: precision-carrying numbers and times of day, calendar dates with
//! integer day arithmetic, fixes before and after dating, and anchors.
//!
//! Source precision is part of the value. A latitude read as `4807.038`
//! carries three minute decimals and is emitted as degrees with five, and a
//! time read as `123519.25` is emitted with two fractional-second digits.

use crate::constants::{NOT_AVAILABLE, SECONDS_PER_DAY};
use crate::{Error, Result};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Fractional-second digits beyond nanoseconds are truncated
const MAX_FRACTION_DIGITS: u8 = 9;

/// `num_days_from_ce` of 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i64 = 719_163;

// =============================================================================
// Precision-carrying Decimal
// =============================================================================

/// A decimal reading together with the number of fractional digits it had
/// in the source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measure {
    value: f64,
    digits: u8,
}

impl Measure {
    pub fn new(value: f64, digits: u8) -> Self {
        Self { value, digits }
    }

    /// Parse a plain decimal literal, recording its fractional digit count
    ///
    /// Returns `None` for empty text, the not-available sentinel, and anything
    /// that is not a finite decimal number.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case(NOT_AVAILABLE) {
            return None;
        }

        let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
        if unsigned.is_empty()
            || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
            || unsigned.matches('.').count() > 1
        {
            return None;
        }

        let value: f64 = text.parse().ok()?;
        value
            .is_finite()
            .then(|| Self::new(value, fraction_digits(text)))
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn digits(&self) -> u8 {
        self.digits
    }

    /// Flip the sign, leaving zero untouched so it never prints as `-0`
    pub fn negated(self) -> Self {
        if self.value == 0.0 {
            self
        } else {
            Self::new(-self.value, self.digits)
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*}", self.digits as usize, self.value)
    }
}

/// Count the digits after the decimal point of a numeric literal
pub fn fraction_digits(text: &str) -> u8 {
    text.trim()
        .split_once('.')
        .map(|(_, frac)| frac.chars().take_while(|c| c.is_ascii_digit()).count())
        .unwrap_or(0)
        .min(u8::MAX as usize) as u8
}

/// Format an optional reading, writing the sentinel when absent
pub fn format_optional<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

// =============================================================================
// Time of Day
// =============================================================================

/// UTC time of day with the fractional-second precision of its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
    fraction: u32,
    fraction_digits: u8,
}

impl TimeOfDay {
    /// Build a time of day; `fraction` is the integer written after the
    /// decimal point using `fraction_digits` digits
    pub fn new(hour: u8, minute: u8, second: u8, fraction: u32, fraction_digits: u8) -> Result<Self> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(Error::sentence_decode(
                "time",
                format!("{:02}:{:02}:{:02} is not a valid time of day", hour, minute, second),
            ));
        }
        if fraction_digits > MAX_FRACTION_DIGITS
            || u64::from(fraction) >= 10u64.pow(u32::from(fraction_digits))
        {
            return Err(Error::sentence_decode(
                "time",
                format!("fraction {} does not fit {} digits", fraction, fraction_digits),
            ));
        }

        Ok(Self {
            hour,
            minute,
            second,
            fraction,
            fraction_digits,
        })
    }

    /// Whole-second time of day
    pub fn from_hms(hour: u8, minute: u8, second: u8) -> Result<Self> {
        Self::new(hour, minute, second, 0, 0)
    }

    /// Parse the NMEA `hhmmss[.sss]` encoding
    pub fn parse_hhmmss(text: &str) -> Result<Self> {
        let text = text.trim();
        let (whole, frac) = text.split_once('.').unwrap_or((text, ""));
        if whole.len() != 6 || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::sentence_decode(
                "time",
                format!("'{}' is not hhmmss", text),
            ));
        }

        let (fraction, digits) = parse_fraction(frac)?;
        Self::new(
            two_digits(&whole[0..2])?,
            two_digits(&whole[2..4])?,
            two_digits(&whole[4..6])?,
            fraction,
            digits,
        )
    }

    /// Parse a colon-separated `hh:mm:ss[.sss]` clock reading
    pub fn parse_colon(text: &str) -> Result<Self> {
        let text = text.trim();
        let mut parts = text.split(':');
        let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(Error::sentence_decode(
                "time",
                format!("'{}' is not hh:mm:ss", text),
            ));
        };

        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        let (fraction, digits) = parse_fraction(frac)?;
        Self::new(
            small_number(h)?,
            small_number(m)?,
            small_number(whole)?,
            fraction,
            digits,
        )
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    /// Nanoseconds since midnight
    pub fn nanos_of_day(&self) -> u64 {
        let whole = u64::from(self.hour) * 3600 + u64::from(self.minute) * 60 + u64::from(self.second);
        let scale = 10u64.pow(u32::from(MAX_FRACTION_DIGITS - self.fraction_digits));
        whole * 1_000_000_000 + u64::from(self.fraction) * scale
    }

    /// Seconds since midnight
    pub fn seconds_of_day(&self) -> f64 {
        self.nanos_of_day() as f64 / 1e9
    }

    /// Signed difference `self - earlier` in seconds, within one day
    pub fn seconds_since(&self, earlier: &TimeOfDay) -> f64 {
        self.seconds_of_day() - earlier.seconds_of_day()
    }

    /// The `hhmmss.sss` numeric encoding used by NMEA receivers
    pub fn hhmmss(&self) -> f64 {
        f64::from(self.hour) * 1e4
            + f64::from(self.minute) * 1e2
            + f64::from(self.second)
            + (self.nanos_of_day() % 1_000_000_000) as f64 / 1e9
    }
}

impl Ord for TimeOfDay {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos_of_day()
            .cmp(&other.nanos_of_day())
            .then(self.fraction_digits.cmp(&other.fraction_digits))
    }
}

impl PartialOrd for TimeOfDay {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.fraction_digits > 0 {
            write!(
                f,
                ".{:0width$}",
                self.fraction,
                width = self.fraction_digits as usize
            )?;
        }
        Ok(())
    }
}

fn parse_fraction(frac: &str) -> Result<(u32, u8)> {
    if frac.is_empty() {
        return Ok((0, 0));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::sentence_decode(
            "time",
            format!("'{}' is not a fractional second", frac),
        ));
    }

    let kept = &frac[..frac.len().min(MAX_FRACTION_DIGITS as usize)];
    let value = kept.parse::<u32>().map_err(|e| {
        Error::sentence_decode("time", format!("fraction '{}': {}", frac, e))
    })?;
    Ok((value, kept.len() as u8))
}

fn two_digits(text: &str) -> Result<u8> {
    text.parse::<u8>()
        .map_err(|e| Error::sentence_decode("time", format!("'{}': {}", text, e)))
}

fn small_number(text: &str) -> Result<u8> {
    let text = text.trim();
    if text.is_empty() || text.len() > 2 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::sentence_decode(
            "time",
            format!("'{}' is not a clock component", text),
        ));
    }
    two_digits(text)
}

// =============================================================================
// Calendar Date
// =============================================================================

/// A UTC calendar day with integer day arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                Error::sentence_decode(
                    "date",
                    format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
                )
            })
    }

    /// Date from a year and a 1-based day of year
    pub fn from_year_day(year: i32, day_of_year: u32) -> Result<Self> {
        NaiveDate::from_yo_opt(year, day_of_year)
            .map(Self)
            .ok_or_else(|| {
                Error::sentence_decode(
                    "date",
                    format!("day {} does not exist in {}", day_of_year, year),
                )
            })
    }

    /// Parse `YYYY-MM-DD`
    pub fn parse_iso(text: &str) -> Result<Self> {
        NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| Error::datetime_parsing(format!("Invalid date '{}'", text), e))
    }

    /// Move forward (positive) or backward (negative) by whole days
    pub fn advance_days(self, days: i64) -> Result<Self> {
        let step = Days::new(days.unsigned_abs());
        let moved = if days >= 0 {
            self.0.checked_add_days(step)
        } else {
            self.0.checked_sub_days(step)
        };
        moved.map(Self).ok_or_else(|| {
            Error::sentence_decode("date", format!("{} {:+} days is out of range", self, days))
        })
    }

    pub fn next_day(self) -> Result<Self> {
        self.advance_days(1)
    }

    pub fn previous_day(self) -> Result<Self> {
        self.advance_days(-1)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Whole days since 1970-01-01
    pub fn days_since_unix_epoch(&self) -> i64 {
        i64::from(self.0.num_days_from_ce()) - UNIX_EPOCH_DAYS_FROM_CE
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}

// =============================================================================
// Timestamp
// =============================================================================

/// A calendar date plus time of day, rendered as ISO-8601 UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp {
    pub date: CalendarDate,
    pub time: TimeOfDay,
}

impl Timestamp {
    pub fn new(date: CalendarDate, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    /// Seconds since the Unix epoch, including the fractional part
    pub fn epoch_seconds(&self) -> f64 {
        self.date.days_since_unix_epoch() as f64 * SECONDS_PER_DAY + self.time.seconds_of_day()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}Z", self.date, self.time)
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    /// Parse `YYYY-MM-DDThh:mm:ss[.f...]Z`
    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let body = text.strip_suffix('Z').unwrap_or(text);
        let (date, time) = body.split_once('T').ok_or_else(|| {
            Error::sentence_decode("timestamp", format!("'{}' has no 'T' separator", text))
        })?;
        Ok(Self::new(
            CalendarDate::parse_iso(date)?,
            TimeOfDay::parse_colon(time)?,
        ))
    }
}

// =============================================================================
// Geographic Point
// =============================================================================

/// A plain longitude/latitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Longitude in [-180, 180) and latitude in [-90, 90]
    pub fn is_valid(&self) -> bool {
        (-180.0..180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(Error::configuration(format!(
                "position {},{} is outside the valid longitude/latitude range",
                self.longitude, self.latitude
            )))
        }
    }
}

impl FromStr for GeoPoint {
    type Err = Error;

    /// Parse `longitude,latitude`
    fn from_str(text: &str) -> Result<Self> {
        let (lon, lat) = text.split_once(',').ok_or_else(|| {
            Error::configuration(format!("expected 'longitude,latitude', got '{}'", text))
        })?;
        let parse = |s: &str| {
            s.trim().parse::<f64>().map_err(|e| {
                Error::configuration(format!("'{}' is not a coordinate: {}", s.trim(), e))
            })
        };
        let point = Self::new(parse(lon)?, parse(lat)?);
        point.validate()?;
        Ok(point)
    }
}

// =============================================================================
// Fixes and Anchors
// =============================================================================

/// A position fix carrying only a time of day
///
/// Longitude and latitude are signed decimal degrees (west and south
/// negative). Any field may be unavailable.
#[derive(Debug, Clone, PartialEq)]
pub struct UndatedFix {
    pub time: TimeOfDay,
    pub longitude: Option<Measure>,
    pub latitude: Option<Measure>,
    pub quality: Option<u8>,
    pub satellites: Option<u32>,
    pub hdop: Option<Measure>,
    pub altitude: Option<Measure>,
}

impl UndatedFix {
    /// A fix at `time` with every other field unavailable
    pub fn at(time: TimeOfDay) -> Self {
        Self {
            time,
            longitude: None,
            latitude: None,
            quality: None,
            satellites: None,
            hdop: None,
            altitude: None,
        }
    }

    pub fn with_position(mut self, longitude: Option<Measure>, latitude: Option<Measure>) -> Self {
        self.longitude = longitude;
        self.latitude = latitude;
        self
    }

    pub fn has_position(&self) -> bool {
        self.longitude.is_some() && self.latitude.is_some()
    }

    /// Attach a resolved calendar date
    pub fn dated(self, date: CalendarDate) -> CanonicalFix {
        CanonicalFix { date, fix: self }
    }
}

/// Where an anchor's absolute timestamp came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnchorSource {
    /// A periodic date/time sentence from the receiver (ZDA, RMC)
    DeviceSentence,
    /// A wall clock written by the logging computer on the same line
    LoggerClock,
    /// The record carries its own full date
    RecordDate,
}

/// A trusted absolute timestamp used to date time-of-day-only fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorDate {
    pub timestamp: Timestamp,
    pub source: AnchorSource,
}

impl AnchorDate {
    pub fn new(date: CalendarDate, time: TimeOfDay, source: AnchorSource) -> Self {
        Self {
            timestamp: Timestamp::new(date, time),
            source,
        }
    }

    pub fn date(&self) -> CalendarDate {
        self.timestamp.date
    }

    pub fn time(&self) -> TimeOfDay {
        self.timestamp.time
    }
}

/// A fix with its resolved calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFix {
    pub date: CalendarDate,
    pub fix: UndatedFix,
}

impl CanonicalFix {
    pub fn timestamp(&self) -> Timestamp {
        Timestamp::new(self.date, self.fix.time)
    }

    pub fn epoch_seconds(&self) -> f64 {
        self.timestamp().epoch_seconds()
    }

    /// Plain position when both coordinates are available
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.fix.longitude, self.fix.latitude) {
            (Some(lon), Some(lat)) => Some(GeoPoint::new(lon.value(), lat.value())),
            _ => None,
        }
    }
}
