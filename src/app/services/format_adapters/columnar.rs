//! Adapters for fixed-column ASCII dumps
//!
//! Every record in these layouts carries its own full date, so each one
//! yields a record-date anchor immediately followed by its fix. The date and
//! time columns are required: a record where they cannot be read aborts the
//! run. Missing coordinates or metadata become not-available instead.

use super::common::{
    HemisphereMemory, LineLocation, parse_day_first_date, parse_int, parse_us_date,
    split_csv_line,
};
use super::stats::AdapterStats;
use super::{FormatAdapter, NavEvent, RawFormat};
use crate::Result;
use crate::app::models::{AnchorDate, AnchorSource, CalendarDate, Measure, TimeOfDay, UndatedFix};
use crate::app::services::sentence_decoder::{
    Hemisphere, RawCoordinate, degrees_minutes,
    field_parsers::{parse_latitude, parse_longitude},
};

/// Anchor and fix for a record that carries its own date
fn dated_record(date: CalendarDate, fix: UndatedFix) -> Vec<NavEvent> {
    vec![
        NavEvent::Anchor(AnchorDate::new(date, fix.time, AnchorSource::RecordDate)),
        NavEvent::Fix(fix),
    ]
}

/// Missing-value marker of the PC CSV export
const PC_CSV_MISSING: &str = "-99";

/// PC CSV exports have at least this many columns
const PC_CSV_MIN_FIELDS: usize = 31;

/// Wide PC CSV export (`nav6`)
///
/// Columns used: `[1]` mm/dd/yyyy, `[2]` hh:mm:ss, `[5]` latitude DDMM.m,
/// `[6]` N/S, `[8]` longitude DDDMM.m, `[9]` E/W. Blank hemisphere letters
/// carry forward the last one seen, starting from north and west.
#[derive(Debug)]
pub struct PcCsvAdapter {
    hemispheres: HemisphereMemory,
}

impl PcCsvAdapter {
    pub fn new() -> Self {
        Self {
            hemispheres: HemisphereMemory::north_west(),
        }
    }

    fn coordinate(
        value: &str,
        hemisphere: &str,
        parse: fn(&str, &str) -> Result<RawCoordinate>,
    ) -> RawCoordinate {
        if value == PC_CSV_MISSING {
            return RawCoordinate {
                degrees: None,
                hemisphere: Hemisphere::parse(hemisphere),
            };
        }
        parse(value, hemisphere).unwrap_or(RawCoordinate {
            degrees: None,
            hemisphere: Hemisphere::parse(hemisphere),
        })
    }
}

impl Default for PcCsvAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatAdapter for PcCsvAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::PcCsv
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        let record = split_csv_line(line, location)?;
        if record.len() < PC_CSV_MIN_FIELDS {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        }

        let field = |i: usize| record.get(i).unwrap_or("");
        let malformed = |e: crate::Error| location.malformed(e.to_string());
        let date = parse_us_date(field(1)).map_err(malformed)?;
        let time = TimeOfDay::parse_colon(field(2)).map_err(malformed)?;

        let latitude = self
            .hemispheres
            .resolve_latitude(Self::coordinate(field(5), field(6), parse_latitude));
        let longitude = self
            .hemispheres
            .resolve_longitude(Self::coordinate(field(8), field(9), parse_longitude));

        if latitude.is_none() && longitude.is_none() {
            stats.empty_positions += 1;
            return Ok(Vec::new());
        }

        Ok(dated_record(
            date,
            UndatedFix::at(time).with_position(longitude, latitude),
        ))
    }
}

const DAY_OF_YEAR_FIELDS: usize = 14;

/// Whitespace columns led by year and day of year (`nav8`)
///
/// `year doy hh mm ss ms _ lat lon hdop _ _ nsat qual`, decimal degrees,
/// millisecond time resolution, no altitude.
#[derive(Debug, Default)]
pub struct DayOfYearAdapter;

impl DayOfYearAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatAdapter for DayOfYearAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::DayOfYear
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        _stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() < DAY_OF_YEAR_FIELDS {
            return Err(location.malformed(format!(
                "expected {} columns, found {}",
                DAY_OF_YEAR_FIELDS,
                columns.len()
            )));
        }

        let malformed = |e: crate::Error| location.malformed(e.to_string());
        let year = parse_int(columns[0]).map_err(malformed)?;
        let day_of_year = parse_int(columns[1]).map_err(malformed)?;
        let date = CalendarDate::from_year_day(year, day_of_year as u32).map_err(malformed)?;

        let millis = parse_int(columns[5]).map_err(malformed)?;
        if !(0..=999).contains(&millis) {
            return Err(location.malformed(format!("millisecond field '{}' exceeds 999", columns[5])));
        }
        let time = TimeOfDay::parse_colon(&format!(
            "{}:{}:{}.{:03}",
            columns[2], columns[3], columns[4], millis
        ))
        .map_err(malformed)?;

        let fix = UndatedFix {
            time,
            longitude: Measure::parse(columns[8]),
            latitude: Measure::parse(columns[7]),
            quality: columns[13].parse().ok().filter(|q: &u8| *q <= 9),
            satellites: columns[12].parse().ok(),
            hdop: Measure::parse(columns[9]),
            altitude: None,
        };
        Ok(dated_record(date, fix))
    }
}

const SATELLITE_LOG_FIELDS: usize = 8;

/// Satellite navigator log (`nav9`)
///
/// `dd mm yyyy hhmm latdeg latmin londeg lonmin`; lines starting with `#`
/// are comments. A negative degree makes the whole coordinate negative.
#[derive(Debug, Default)]
pub struct SatelliteLogAdapter;

impl SatelliteLogAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatAdapter for SatelliteLogAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::SatelliteLog
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        if line.trim_start().starts_with('#') {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        }

        let columns: Vec<&str> = line.split_whitespace().collect();
        if columns.len() < SATELLITE_LOG_FIELDS {
            return Err(location.malformed(format!(
                "expected {} columns, found {}",
                SATELLITE_LOG_FIELDS,
                columns.len()
            )));
        }

        let malformed = |e: crate::Error| location.malformed(e.to_string());
        let date = CalendarDate::from_ymd(
            parse_int(columns[2]).map_err(malformed)?,
            parse_int(columns[1]).map_err(malformed)? as u32,
            parse_int(columns[0]).map_err(malformed)? as u32,
        )
        .map_err(malformed)?;

        let hhmm = columns[3];
        if hhmm.len() != 4 || !hhmm.bytes().all(|b| b.is_ascii_digit()) {
            return Err(location.malformed(format!("'{}' is not hhmm", hhmm)));
        }
        let time = TimeOfDay::parse_colon(&format!("{}:{}:00", &hhmm[..2], &hhmm[2..]))
            .map_err(malformed)?;

        let fix = UndatedFix::at(time).with_position(
            degrees_minutes(columns[6], columns[7]).ok(),
            degrees_minutes(columns[4], columns[5]).ok(),
        );
        Ok(dated_record(date, fix))
    }
}

/// CSV of day-first date, time, and decimal degrees (`nav10`)
///
/// `dd-mm-yyyy` or `dd/mm/yyyy`, `hh:mm:ss[.f]`, latitude, longitude. A
/// leading line whose first column is not a date is treated as a header.
#[derive(Debug, Default)]
pub struct DecimalCsvAdapter;

impl DecimalCsvAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl FormatAdapter for DecimalCsvAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::DecimalCsv
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        let record = split_csv_line(line, location)?;
        let field = |i: usize| record.get(i).unwrap_or("");

        if !field(0).starts_with(|c: char| c.is_ascii_digit()) {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        }
        if record.len() < 4 {
            return Err(location.malformed(format!(
                "expected date, time, latitude, longitude; found {} columns",
                record.len()
            )));
        }

        let malformed = |e: crate::Error| location.malformed(e.to_string());
        let date = parse_day_first_date(field(0)).map_err(malformed)?;
        let time = TimeOfDay::parse_colon(field(1)).map_err(malformed)?;

        let fix = UndatedFix::at(time).with_position(Measure::parse(field(3)), Measure::parse(field(2)));
        Ok(dated_record(date, fix))
    }
}
