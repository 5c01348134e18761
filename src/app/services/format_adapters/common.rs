//! Helpers shared by the format adapters
//!
//! Hemisphere carry-forward, duplicate suppression, logger clock parsing,
//! and conversion from decoded sentences to undated fixes.

use super::stats::AdapterStats;
use crate::app::models::{CalendarDate, Measure, TimeOfDay, Timestamp, UndatedFix};
use crate::app::services::sentence_decoder::{
    DecodedSentence, Hemisphere, PartialPosition, PositionFix, RawCoordinate,
    RecommendedMinimum, apply_hemisphere, decode,
};
use crate::{Error, Result};
use csv::StringRecord;

/// Where a line came from, for error reporting
#[derive(Debug, Clone)]
pub struct LineLocation {
    pub file: String,
    pub line: usize,
}

impl LineLocation {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Fatal error for a record whose required fields cannot be read
    pub fn malformed(&self, message: impl Into<String>) -> Error {
        Error::malformed_record(self.file.clone(), self.line, message)
    }

    /// Short `file:line` form
    pub fn describe(&self) -> String {
        format!("{}:{}", self.file, self.line)
    }
}

/// Last known hemisphere per axis, used when a record leaves the letter blank
#[derive(Debug, Clone, Copy)]
pub struct HemisphereMemory {
    latitude: Hemisphere,
    longitude: Hemisphere,
}

impl HemisphereMemory {
    pub fn new(latitude: Hemisphere, longitude: Hemisphere) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Start in the north-east quadrant (positive coordinates)
    pub fn north_east() -> Self {
        Self::new(Hemisphere::North, Hemisphere::East)
    }

    /// Start in the north-west quadrant
    pub fn north_west() -> Self {
        Self::new(Hemisphere::North, Hemisphere::West)
    }

    /// Signed latitude, remembering any hemisphere the record supplied
    pub fn resolve_latitude(&mut self, raw: RawCoordinate) -> Option<Measure> {
        if let Some(hemisphere) = raw.hemisphere {
            self.latitude = hemisphere;
        }
        raw.degrees.map(|d| apply_hemisphere(d, self.latitude))
    }

    /// Signed longitude, remembering any hemisphere the record supplied
    pub fn resolve_longitude(&mut self, raw: RawCoordinate) -> Option<Measure> {
        if let Some(hemisphere) = raw.hemisphere {
            self.longitude = hemisphere;
        }
        raw.degrees.map(|d| apply_hemisphere(d, self.longitude))
    }
}

impl Default for HemisphereMemory {
    fn default() -> Self {
        Self::north_east()
    }
}

/// Drops a fix whose time of day repeats the one immediately before it
#[derive(Debug, Clone, Default)]
pub struct DuplicateFilter {
    last: Option<TimeOfDay>,
}

impl DuplicateFilter {
    /// Returns `true` (and counts it) when `time` repeats the previous fix
    pub fn is_repeat(&mut self, time: TimeOfDay, stats: &mut AdapterStats) -> bool {
        let repeat = self.last == Some(time);
        self.last = Some(time);
        if repeat {
            stats.duplicates_suppressed += 1;
        }
        repeat
    }
}

/// Decode an NMEA sentence, absorbing recoverable failures into the stats
///
/// Returns `Ok(None)` when the sentence was rejected but processing should
/// continue.
pub fn decode_or_skip(
    text: &str,
    location: &LineLocation,
    stats: &mut AdapterStats,
) -> Result<Option<DecodedSentence>> {
    match decode(text) {
        Ok(sentence) => Ok(Some(sentence)),
        Err(error) if error.is_recoverable() => {
            tracing::debug!("Dropping sentence at {}: {}", location.describe(), error);
            stats.record_rejection(&error, &location.describe());
            Ok(None)
        }
        Err(error) => Err(error),
    }
}

/// Undated fix from a GGA sentence
pub fn fix_from_gga(gga: &PositionFix, hemispheres: &mut HemisphereMemory) -> UndatedFix {
    UndatedFix {
        time: gga.time,
        longitude: hemispheres.resolve_longitude(gga.longitude),
        latitude: hemispheres.resolve_latitude(gga.latitude),
        quality: gga.quality,
        satellites: gga.satellites,
        hdop: gga.hdop,
        altitude: gga.altitude,
    }
}

/// Undated fix from an RMC sentence; the status stands in for the quality code
pub fn fix_from_rmc(rmc: &RecommendedMinimum, hemispheres: &mut HemisphereMemory) -> UndatedFix {
    let mut fix = UndatedFix::at(rmc.time).with_position(
        hemispheres.resolve_longitude(rmc.longitude),
        hemispheres.resolve_latitude(rmc.latitude),
    );
    fix.quality = rmc.status.map(|s| s.quality_code());
    fix
}

/// Undated fix from a GLL sentence at an externally supplied time
pub fn fix_from_gll(
    gll: &PartialPosition,
    time: TimeOfDay,
    hemispheres: &mut HemisphereMemory,
) -> UndatedFix {
    let mut fix = UndatedFix::at(time).with_position(
        hemispheres.resolve_longitude(gll.longitude),
        hemispheres.resolve_latitude(gll.latitude),
    );
    fix.quality = gll.status.map(|s| s.quality_code());
    fix
}

/// Parse a `mm/dd/yyyy` logger date
pub fn parse_us_date(text: &str) -> Result<CalendarDate> {
    let parts: Vec<&str> = text.trim().split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(Error::sentence_decode(
            "date",
            format!("'{}' is not mm/dd/yyyy", text.trim()),
        ));
    };
    CalendarDate::from_ymd(parse_int(year)?, parse_int(month)? as u32, parse_int(day)? as u32)
}

/// Parse a `dd-mm-yyyy` or `dd/mm/yyyy` date
pub fn parse_day_first_date(text: &str) -> Result<CalendarDate> {
    let parts: Vec<&str> = text.trim().split(['-', '/']).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(Error::sentence_decode(
            "date",
            format!("'{}' is not dd-mm-yyyy", text.trim()),
        ));
    };
    CalendarDate::from_ymd(parse_int(year)?, parse_int(month)? as u32, parse_int(day)? as u32)
}

/// Parse a `yyyy:ddd:hh:mm:ss[.f]` day-of-year logger clock
pub fn parse_doy_clock(text: &str) -> Result<Timestamp> {
    let text = text.trim();
    let Some((year, rest)) = text.split_once(':') else {
        return Err(Error::sentence_decode(
            "clock",
            format!("'{}' is not yyyy:ddd:hh:mm:ss", text),
        ));
    };
    let Some((doy, clock)) = rest.split_once(':') else {
        return Err(Error::sentence_decode(
            "clock",
            format!("'{}' is not yyyy:ddd:hh:mm:ss", text),
        ));
    };
    let date = CalendarDate::from_year_day(parse_int(year)?, parse_int(doy)? as u32)?;
    Ok(Timestamp::new(date, TimeOfDay::parse_colon(clock)?))
}

/// Parse an `hh:mm:ss:mmm` clock whose last field is milliseconds
pub fn parse_clock_with_millis(text: &str) -> Result<TimeOfDay> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let [hour, minute, second, millis] = parts.as_slice() else {
        return Err(Error::sentence_decode(
            "clock",
            format!("'{}' is not hh:mm:ss:ms", text.trim()),
        ));
    };
    parse_int(millis)?;
    TimeOfDay::parse_colon(&format!(
        "{}:{}:{}.{}",
        hour.trim(),
        minute.trim(),
        second.trim(),
        millis.trim()
    ))
}

/// Parse a small non-negative integer field
pub fn parse_int(text: &str) -> Result<i32> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) || text.len() > 9 {
        return Err(Error::sentence_decode(
            "field",
            format!("'{}' is not an unsigned integer", text),
        ));
    }
    text.parse::<i32>()
        .map_err(|e| Error::sentence_decode("field", format!("'{}': {}", text, e)))
}

/// Split one comma-separated line, honouring quoted fields
pub fn split_csv_line(line: &str, location: &LineLocation) -> Result<StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(line.as_bytes());

    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(_) => Ok(record),
        Err(e) => Err(Error::csv_parsing(
            location.describe(),
            "Failed to split CSV record",
            Some(e),
        )),
    }
}

/// Text from the first `$` onwards, if any
pub fn sentence_part(line: &str) -> Option<&str> {
    line.find('$').map(|i| &line[i..])
}
