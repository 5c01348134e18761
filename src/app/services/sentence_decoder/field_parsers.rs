//! Field parsing utilities for NMEA sentences
//!
//! Helpers that turn individual field strings into typed values. Empty
//! fields become `None`; malformed required fields become decode errors.

use crate::app::models::{CalendarDate, Measure, TimeOfDay};
use crate::{Error, Result};
use regex::Regex;
use std::sync::LazyLock;

static LATITUDE_DDMM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})(\d{2}(?:\.\d*)?)$").expect("latitude pattern"));

static LONGITUDE_DDDMM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{3})(\d{2}(?:\.\d*)?)$").expect("longitude pattern"));

static SINGLE_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("quality pattern"));

/// Hemisphere letter of a coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Parse `N`, `S`, `E`, or `W`; anything else (including blank) is unknown
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "N" | "n" => Some(Self::North),
            "S" | "s" => Some(Self::South),
            "E" | "e" => Some(Self::East),
            "W" | "w" => Some(Self::West),
            _ => None,
        }
    }

    /// True for the hemispheres that make a coordinate negative
    pub fn is_negative(&self) -> bool {
        matches!(self, Self::South | Self::West)
    }
}

/// Coordinate magnitude as decoded, before the hemisphere is applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCoordinate {
    /// Unsigned decimal degrees; `None` when the field was blank
    pub degrees: Option<Measure>,
    pub hemisphere: Option<Hemisphere>,
}

impl RawCoordinate {
    /// Signed degrees when both magnitude and hemisphere are present
    pub fn signed(&self) -> Option<Measure> {
        let degrees = self.degrees?;
        let hemisphere = self.hemisphere?;
        Some(apply_hemisphere(degrees, hemisphere))
    }
}

/// Apply a hemisphere sign to an unsigned magnitude
pub fn apply_hemisphere(degrees: Measure, hemisphere: Hemisphere) -> Measure {
    if hemisphere.is_negative() {
        degrees.negated()
    } else {
        degrees
    }
}

/// Parse an NMEA `DDMM.mmmm` latitude
pub fn parse_latitude(value: &str, hemisphere: &str) -> Result<RawCoordinate> {
    parse_coordinate(&LATITUDE_DDMM, "latitude", value, hemisphere)
}

/// Parse an NMEA `DDDMM.mmmm` longitude
pub fn parse_longitude(value: &str, hemisphere: &str) -> Result<RawCoordinate> {
    parse_coordinate(&LONGITUDE_DDDMM, "longitude", value, hemisphere)
}

fn parse_coordinate(
    pattern: &Regex,
    name: &str,
    value: &str,
    hemisphere: &str,
) -> Result<RawCoordinate> {
    let value = value.trim();
    let hemisphere = Hemisphere::parse(hemisphere);
    if value.is_empty() {
        return Ok(RawCoordinate {
            degrees: None,
            hemisphere,
        });
    }

    let captures = pattern.captures(value).ok_or_else(|| {
        Error::sentence_decode(name, format!("'{}' is not a degrees-minutes value", value))
    })?;

    Ok(RawCoordinate {
        degrees: Some(degrees_minutes(&captures[1], &captures[2])?),
        hemisphere,
    })
}

/// Combine separate degree and minute fields into decimal degrees
///
/// The result carries two more fractional digits than the minutes did, which
/// keeps the instrument resolution visible after conversion.
pub fn degrees_minutes(degrees: &str, minutes: &str) -> Result<Measure> {
    let whole: f64 = degrees.trim().parse().map_err(|_| {
        Error::sentence_decode("coordinate", format!("'{}' is not a degree value", degrees))
    })?;
    let minutes_measure = Measure::parse(minutes).ok_or_else(|| {
        Error::sentence_decode("coordinate", format!("'{}' is not a minute value", minutes))
    })?;

    let magnitude = whole.abs() + minutes_measure.value().abs() / 60.0;
    let value = if whole < 0.0 || degrees.trim().starts_with('-') {
        -magnitude
    } else {
        magnitude
    };
    Ok(Measure::new(value, minutes_measure.digits().saturating_add(2)))
}

/// Parse a required NMEA time-of-day field
pub fn parse_required_time(value: &str) -> Result<TimeOfDay> {
    if value.trim().is_empty() {
        return Err(Error::sentence_decode("time", "missing time of day"));
    }
    TimeOfDay::parse_hhmmss(value)
}

/// Parse an optional NMEA time-of-day field
pub fn parse_optional_time(value: &str) -> Result<Option<TimeOfDay>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        TimeOfDay::parse_hhmmss(value).map(Some)
    }
}

/// GPS quality code: exactly one digit, otherwise unavailable
pub fn parse_quality(value: &str) -> Option<u8> {
    let value = value.trim();
    if SINGLE_DIGIT.is_match(value) {
        value.parse().ok()
    } else {
        None
    }
}

/// Non-negative integer count such as satellites in use
pub fn parse_count(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

/// Optional decimal reading with its source precision
pub fn parse_measure(value: &str) -> Option<Measure> {
    Measure::parse(value)
}

/// Date from separate day, month, and four-digit year fields
pub fn parse_day_month_year(day: &str, month: &str, year: &str) -> Result<CalendarDate> {
    let number = |text: &str, width: usize, name: &str| -> Result<u32> {
        let text = text.trim();
        if text.len() != width || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::sentence_decode(
                "date",
                format!("{} '{}' must have {} digits", name, text, width),
            ));
        }
        text.parse::<u32>()
            .map_err(|e| Error::sentence_decode("date", format!("{} '{}': {}", name, text, e)))
    };

    let year = number(year, 4, "year")?;
    CalendarDate::from_ymd(year as i32, number(month, 2, "month")?, number(day, 2, "day")?)
}

/// Date from the RMC `ddmmyy` field; two-digit years map to 2000-2099
pub fn parse_ddmmyy(value: &str) -> Result<CalendarDate> {
    let value = value.trim();
    if value.len() != 6 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::sentence_decode(
            "date",
            format!("'{}' is not ddmmyy", value),
        ));
    }
    let part = |range: std::ops::Range<usize>| value[range].parse::<u32>().unwrap_or(0);
    CalendarDate::from_ymd(2000 + part(4..6) as i32, part(2..4), part(0..2))
}
