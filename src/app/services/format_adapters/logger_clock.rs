//! Adapters for logs stamped by the logging computer's clock
//!
//! The acquisition PC writes its own wall-clock time in front of every GPS
//! sentence. That clock supplies the date, but the PC and the receiver
//! disagree by up to a few seconds, so around midnight the PC date can be
//! one day off the fix. Each line therefore yields a logger-clock anchor and
//! the disambiguator picks the calendar day nearest to it.

use super::common::{
    DuplicateFilter, HemisphereMemory, LineLocation, decode_or_skip, fix_from_gga, fix_from_gll,
    parse_clock_with_millis, parse_doy_clock, parse_us_date, sentence_part,
};
use super::stats::AdapterStats;
use super::{FormatAdapter, NavEvent, RawFormat};
use crate::Result;
use crate::app::models::{AnchorDate, AnchorSource, Measure, TimeOfDay, Timestamp, UndatedFix};
use crate::app::services::sentence_decoder::{
    DecodedSentence, Hemisphere, RawCoordinate, degrees_minutes,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static DOY_CLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}:\d{3}:\d{2}:\d{2}:\d{2}(\.\d+)?$").expect("day-of-year clock pattern")
});

fn logger_anchor(timestamp: Timestamp) -> NavEvent {
    NavEvent::Anchor(AnchorDate::new(
        timestamp.date,
        timestamp.time,
        AnchorSource::LoggerClock,
    ))
}

/// Split `mm/dd/yyyy,hh:mm:ss,$...` into the logger timestamp and sentence
fn split_us_clock_prefix<'a>(
    line: &'a str,
    location: &LineLocation,
) -> Result<(Timestamp, &'a str)> {
    let sentence = sentence_part(line).unwrap_or("");
    let prefix = &line[..line.len() - sentence.len()];
    let mut columns = prefix.split(',').map(str::trim);

    let (Some(date), Some(time)) = (columns.next(), columns.next()) else {
        return Err(location.malformed(format!("expected 'mm/dd/yyyy,hh:mm:ss,' before sentence in '{}'", line)));
    };

    let date = parse_us_date(date).map_err(|e| location.malformed(e.to_string()))?;
    let time = TimeOfDay::parse_colon(time).map_err(|e| location.malformed(e.to_string()))?;
    Ok((Timestamp::new(date, time), sentence))
}

/// `mm/dd/yyyy,hh:mm:ss,$GPGGA...` timed by the logger clock (`nav2`)
#[derive(Debug, Default)]
pub struct LoggerClockGgaAdapter {
    hemispheres: HemisphereMemory,
    duplicates: DuplicateFilter,
}

impl LoggerClockGgaAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatAdapter for LoggerClockGgaAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::LoggerClockGga
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        if !line.contains("GGA") {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        }

        let (clock, sentence) = split_us_clock_prefix(line, location)?;
        match decode_or_skip(sentence, location, stats)? {
            Some(DecodedSentence::PositionFix(gga)) => {
                if self.duplicates.is_repeat(gga.time, stats) {
                    return Ok(Vec::new());
                }
                Ok(vec![
                    logger_anchor(clock),
                    NavEvent::Fix(fix_from_gga(&gga, &mut self.hemispheres)),
                ])
            }
            Some(_) => {
                stats.lines_ignored += 1;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}

/// `mm/dd/yyyy,hh:mm:ss,$GPGGA|$GPGLL...` (`nav3`)
///
/// The receiver time is ignored: the logger clock is the fix time, so each
/// record is fully dated.
#[derive(Debug, Default)]
pub struct LoggerClockPositionAdapter {
    hemispheres: HemisphereMemory,
}

impl LoggerClockPositionAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatAdapter for LoggerClockPositionAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::LoggerClockPosition
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        if !(line.contains("GGA") || line.contains("GLL")) {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        }

        let (clock, sentence) = split_us_clock_prefix(line, location)?;
        let fix = match decode_or_skip(sentence, location, stats)? {
            Some(DecodedSentence::PositionFix(gga)) => {
                let mut fix = fix_from_gga(&gga, &mut self.hemispheres);
                fix.time = clock.time;
                fix
            }
            Some(DecodedSentence::PartialPosition(gll)) => {
                fix_from_gll(&gll, clock.time, &mut self.hemispheres)
            }
            Some(_) => {
                stats.lines_ignored += 1;
                return Ok(Vec::new());
            }
            None => return Ok(Vec::new()),
        };

        Ok(vec![
            NavEvent::Anchor(AnchorDate::new(
                clock.date,
                clock.time,
                AnchorSource::RecordDate,
            )),
            NavEvent::Fix(fix),
        ])
    }
}

/// `yyyy-mm-ddThh:mm:ss.ffffffZ,$GPGGA...` (`nav33`)
#[derive(Debug, Default)]
pub struct IsoClockGgaAdapter {
    hemispheres: HemisphereMemory,
    duplicates: DuplicateFilter,
}

impl IsoClockGgaAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatAdapter for IsoClockGgaAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::IsoClockGga
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        if !line.contains("GGA") {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        }

        let Some((stamp, _)) = line.split_once(',') else {
            return Err(location.malformed("expected 'timestamp,' before sentence"));
        };
        let clock: Timestamp = stamp
            .parse()
            .map_err(|e: crate::Error| location.malformed(e.to_string()))?;
        let sentence = sentence_part(line).unwrap_or("");

        match decode_or_skip(sentence, location, stats)? {
            Some(DecodedSentence::PositionFix(gga)) => {
                if self.duplicates.is_repeat(gga.time, stats) {
                    return Ok(Vec::new());
                }
                Ok(vec![
                    logger_anchor(clock),
                    NavEvent::Fix(fix_from_gga(&gga, &mut self.hemispheres)),
                ])
            }
            Some(_) => {
                stats.lines_ignored += 1;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}

/// NMEA with ZDA, or GGA lines stamped `tag yyyy:ddd:hh:mm:ss $GPGGA...` (`nav12`)
///
/// Bare GGA sentences are only trusted once a ZDA has been seen in the file.
/// Identical consecutive lines are logger repeats and are skipped.
#[derive(Debug, Default)]
pub struct DoyClockGgaAdapter {
    hemispheres: HemisphereMemory,
    duplicates: DuplicateFilter,
    have_zda: bool,
    last_line: Option<String>,
}

impl DoyClockGgaAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatAdapter for DoyClockGgaAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::DoyClockGga
    }

    fn begin_file(&mut self, _path: &Path) {
        self.have_zda = false;
        self.last_line = None;
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        if self.last_line.as_deref() == Some(line) {
            stats.duplicates_suppressed += 1;
            return Ok(Vec::new());
        }
        self.last_line = Some(line.to_string());

        let Some(sentence) = sentence_part(line) else {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        };
        let prefix = &line[..line.len() - sentence.len()];
        let clock = prefix
            .split_whitespace()
            .find(|token| DOY_CLOCK.is_match(token))
            .map(|token| parse_doy_clock(token).map_err(|e| location.malformed(e.to_string())))
            .transpose()?;

        match decode_or_skip(sentence, location, stats)? {
            Some(DecodedSentence::DateTimeStamp(zda)) => {
                self.have_zda = true;
                Ok(vec![NavEvent::Anchor(AnchorDate::new(
                    zda.date,
                    zda.time,
                    AnchorSource::DeviceSentence,
                ))])
            }
            Some(DecodedSentence::PositionFix(gga)) => {
                if clock.is_none() && !self.have_zda {
                    stats.lines_ignored += 1;
                    return Ok(Vec::new());
                }
                if self.duplicates.is_repeat(gga.time, stats) {
                    return Ok(Vec::new());
                }

                let mut events = Vec::with_capacity(2);
                if let Some(clock) = clock {
                    events.push(logger_anchor(clock));
                }
                events.push(NavEvent::Fix(fix_from_gga(&gga, &mut self.hemispheres)));
                Ok(events)
            }
            Some(_) => {
                stats.lines_ignored += 1;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}

/// Whitespace columns holding a GGA broken into fields (`nav11`)
///
/// `mm/dd/yyyy hh:mm:ss:ms hhmmss latdeg latmin N londeg lonmin W alt geoid hdop nsat qual tag`
#[derive(Debug, Default)]
pub struct LoggerColumnsAdapter {
    hemispheres: HemisphereMemory,
    duplicates: DuplicateFilter,
}

impl LoggerColumnsAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

const LOGGER_COLUMNS_FIELDS: usize = 14;

impl FormatAdapter for LoggerColumnsAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::LoggerColumns
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        if !line.contains("GGA") {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() < LOGGER_COLUMNS_FIELDS {
            return Err(location.malformed(format!(
                "expected {} whitespace-separated columns, found {}",
                LOGGER_COLUMNS_FIELDS,
                columns.len()
            )));
        }

        let malformed = |e: crate::Error| location.malformed(e.to_string());
        let date = parse_us_date(columns[0]).map_err(malformed)?;
        let clock_time = parse_clock_with_millis(columns[1]).map_err(malformed)?;
        let time = TimeOfDay::parse_hhmmss(columns[2]).map_err(malformed)?;

        if self.duplicates.is_repeat(time, stats) {
            return Ok(Vec::new());
        }

        let latitude = RawCoordinate {
            degrees: degrees_minutes(columns[3], columns[4]).ok(),
            hemisphere: Hemisphere::parse(columns[5]),
        };
        let longitude = RawCoordinate {
            degrees: degrees_minutes(columns[6], columns[7]).ok(),
            hemisphere: Hemisphere::parse(columns[8]),
        };

        let fix = UndatedFix {
            time,
            longitude: self.hemispheres.resolve_longitude(longitude),
            latitude: self.hemispheres.resolve_latitude(latitude),
            quality: columns[13].trim().parse().ok().filter(|q: &u8| *q <= 9),
            satellites: columns[12].trim().parse().ok(),
            hdop: Measure::parse(columns[11]),
            altitude: Measure::parse(columns[9]),
        };

        Ok(vec![
            logger_anchor(Timestamp::new(date, clock_time)),
            NavEvent::Fix(fix),
        ])
    }
}
