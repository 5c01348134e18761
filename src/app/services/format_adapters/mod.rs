//! Raw navigation log format adapters
//!
//! Each supported vendor layout has one adapter. Every adapter honours the
//! same contract: it is handed one physical line at a time and answers with
//! the fixes and anchors that line contains, in order.
//!
//! ## Architecture
//!
//! - [`device_sentence`] - Bare NMEA streams dated by ZDA or RMC sentences
//! - [`logger_clock`] - Lines stamped by the logging computer's clock
//! - [`columnar`] - Fixed-column ASCII dumps that carry a full date per record
//! - [`common`] - Hemisphere carry-forward, duplicate suppression, clock parsing
//! - [`reader`] - Drives an adapter across an ordered file list
//! - [`stats`] - Per-run reading statistics
//!
//! ## Formats
//!
//! Formats are a closed set selected once by identifier. Each identifier also
//! has a legacy alias (`nav1`, `nav2`, ...) matching the naming used by the
//! archives that hold these logs.
//!
//! ## Error Policy
//!
//! A sentence that fails its checksum or does not decode is dropped and
//! counted. A line that is recognisably a data record but whose required
//! date or time columns cannot be read aborts the run with
//! [`crate::Error::MalformedRecord`].

pub mod columnar;
pub mod common;
pub mod device_sentence;
pub mod logger_clock;
pub mod reader;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use common::LineLocation;
pub use reader::RawLogReader;
pub use stats::AdapterStats;

use crate::app::models::{AnchorDate, UndatedFix};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// One item produced by a format adapter
#[derive(Debug, Clone, PartialEq)]
pub enum NavEvent {
    /// A fix carrying a time of day
    Fix(UndatedFix),
    /// A trusted absolute timestamp
    Anchor(AnchorDate),
}

/// Contract shared by all raw format adapters
pub trait FormatAdapter {
    /// Which format this adapter reads
    fn format(&self) -> RawFormat;

    /// Reset per-file state before the first line of a file
    fn begin_file(&mut self, _path: &Path) {}

    /// Decode one non-blank line into zero or more events
    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>>;
}

/// Supported raw log formats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RawFormat {
    /// Bare NMEA stream, GGA fixes dated by ZDA sentences
    #[serde(alias = "nav1")]
    #[value(alias = "nav1")]
    NmeaZda,

    /// `mm/dd/yyyy,hh:mm:ss,$GPGGA...` dated by the logger clock
    #[serde(alias = "nav2")]
    #[value(alias = "nav2")]
    LoggerClockGga,

    /// `mm/dd/yyyy,hh:mm:ss,$GPGGA|$GPGLL...` timed by the logger clock
    #[serde(alias = "nav3")]
    #[value(alias = "nav3")]
    LoggerClockPosition,

    /// `GPS ...` lines holding several sentences joined by `,$`
    #[serde(alias = "nav4")]
    #[value(alias = "nav4")]
    GpsPrefixed,

    /// Wide PC CSV export with DDMM coordinates
    #[serde(alias = "nav6")]
    #[value(alias = "nav6")]
    PcCsv,

    /// Whitespace columns led by year and day of year
    #[serde(alias = "nav8")]
    #[value(alias = "nav8")]
    DayOfYear,

    /// Satellite navigator log with degree and minute columns
    #[serde(alias = "nav9")]
    #[value(alias = "nav9")]
    SatelliteLog,

    /// CSV of day-first date, time, and decimal degrees
    #[serde(alias = "nav10")]
    #[value(alias = "nav10")]
    DecimalCsv,

    /// Whitespace columns holding a GGA split into fields plus logger clock
    #[serde(alias = "nav11")]
    #[value(alias = "nav11")]
    LoggerColumns,

    /// NMEA with ZDA, or GGA stamped `yyyy:ddd:hh:mm:ss`
    #[serde(alias = "nav12")]
    #[value(alias = "nav12")]
    DoyClockGga,

    /// NMEA stream containing only RMC sentences
    #[serde(alias = "nav32")]
    #[value(alias = "nav32")]
    RmcOnly,

    /// `yyyy-mm-ddThh:mm:ss.ffffffZ,$GPGGA...`
    #[serde(alias = "nav33")]
    #[value(alias = "nav33")]
    IsoClockGga,
}

impl RawFormat {
    /// Every supported format, in registry order
    pub const ALL: [RawFormat; 12] = [
        RawFormat::NmeaZda,
        RawFormat::LoggerClockGga,
        RawFormat::LoggerClockPosition,
        RawFormat::GpsPrefixed,
        RawFormat::PcCsv,
        RawFormat::DayOfYear,
        RawFormat::SatelliteLog,
        RawFormat::DecimalCsv,
        RawFormat::LoggerColumns,
        RawFormat::DoyClockGga,
        RawFormat::RmcOnly,
        RawFormat::IsoClockGga,
    ];

    /// Canonical identifier
    pub fn identifier(&self) -> &'static str {
        match self {
            RawFormat::NmeaZda => "nmea-zda",
            RawFormat::LoggerClockGga => "logger-clock-gga",
            RawFormat::LoggerClockPosition => "logger-clock-position",
            RawFormat::GpsPrefixed => "gps-prefixed",
            RawFormat::PcCsv => "pc-csv",
            RawFormat::DayOfYear => "day-of-year",
            RawFormat::SatelliteLog => "satellite-log",
            RawFormat::DecimalCsv => "decimal-csv",
            RawFormat::LoggerColumns => "logger-columns",
            RawFormat::DoyClockGga => "doy-clock-gga",
            RawFormat::RmcOnly => "rmc-only",
            RawFormat::IsoClockGga => "iso-clock-gga",
        }
    }

    /// Legacy archive name
    pub fn legacy_alias(&self) -> &'static str {
        match self {
            RawFormat::NmeaZda => "nav1",
            RawFormat::LoggerClockGga => "nav2",
            RawFormat::LoggerClockPosition => "nav3",
            RawFormat::GpsPrefixed => "nav4",
            RawFormat::PcCsv => "nav6",
            RawFormat::DayOfYear => "nav8",
            RawFormat::SatelliteLog => "nav9",
            RawFormat::DecimalCsv => "nav10",
            RawFormat::LoggerColumns => "nav11",
            RawFormat::DoyClockGga => "nav12",
            RawFormat::RmcOnly => "nav32",
            RawFormat::IsoClockGga => "nav33",
        }
    }

    /// Where this format's dates come from
    pub fn anchor_description(&self) -> &'static str {
        match self {
            RawFormat::NmeaZda => "ZDA sentences",
            RawFormat::GpsPrefixed => "ZDA or RMC sentences",
            RawFormat::RmcOnly => "RMC sentences",
            RawFormat::DoyClockGga => "ZDA sentences or day-of-year logger clock",
            RawFormat::LoggerClockGga | RawFormat::LoggerColumns | RawFormat::IsoClockGga => {
                "logger clock on each line"
            }
            RawFormat::LoggerClockPosition => "logger clock (used as fix time)",
            RawFormat::PcCsv
            | RawFormat::DayOfYear
            | RawFormat::SatelliteLog
            | RawFormat::DecimalCsv => "full date on each record",
        }
    }
}

impl fmt::Display for RawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for RawFormat {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        let name = name.trim();
        RawFormat::ALL
            .into_iter()
            .find(|f| {
                f.identifier().eq_ignore_ascii_case(name) || f.legacy_alias().eq_ignore_ascii_case(name)
            })
            .ok_or_else(|| Error::unknown_format(name))
    }
}

/// Build the adapter for a format
pub fn create_adapter(format: RawFormat) -> Box<dyn FormatAdapter> {
    match format {
        RawFormat::NmeaZda => Box::new(device_sentence::NmeaZdaAdapter::new()),
        RawFormat::GpsPrefixed => Box::new(device_sentence::GpsPrefixedAdapter::new()),
        RawFormat::RmcOnly => Box::new(device_sentence::RmcOnlyAdapter::new()),
        RawFormat::LoggerClockGga => Box::new(logger_clock::LoggerClockGgaAdapter::new()),
        RawFormat::LoggerClockPosition => {
            Box::new(logger_clock::LoggerClockPositionAdapter::new())
        }
        RawFormat::LoggerColumns => Box::new(logger_clock::LoggerColumnsAdapter::new()),
        RawFormat::DoyClockGga => Box::new(logger_clock::DoyClockGgaAdapter::new()),
        RawFormat::IsoClockGga => Box::new(logger_clock::IsoClockGgaAdapter::new()),
        RawFormat::PcCsv => Box::new(columnar::PcCsvAdapter::new()),
        RawFormat::DayOfYear => Box::new(columnar::DayOfYearAdapter::new()),
        RawFormat::SatelliteLog => Box::new(columnar::SatelliteLogAdapter::new()),
        RawFormat::DecimalCsv => Box::new(columnar::DecimalCsvAdapter::new()),
    }
}
