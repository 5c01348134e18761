//! Canonical record reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::debug;

use super::record::QcRecord;
use crate::app::models::{Measure, Timestamp, UndatedFix};
use crate::constants::{
    AUGMENTED_COLUMNS, CANONICAL_COLUMNS, FIELD_DELIMITER, NOT_AVAILABLE, QC_FLAG_MARKER,
};
use crate::{Error, Result};

/// Reads canonical records back, preserving source precision
///
/// The header line and `#` comment lines are skipped; `#` followed by a
/// digit is a flagged record. Any other line that does not parse is fatal.
pub struct CanonicalReader<R: Read> {
    reader: csv::Reader<R>,
    file: String,
    augmented: bool,
    record: StringRecord,
}

impl CanonicalReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        debug!("Reading canonical records from {}", path.display());
        Ok(Self::new(file, path.display().to_string()))
    }

    /// Read a whole canonical file
    pub fn read_all(path: &Path) -> Result<Vec<QcRecord>> {
        Self::open(path)?.collect()
    }
}

impl<R: Read> CanonicalReader<R> {
    /// Wrap a reader; `name` identifies the source in errors
    pub fn new(inner: R, name: impl Into<String>) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(FIELD_DELIMITER as u8)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(inner);

        Self {
            reader,
            file: name.into(),
            augmented: false,
            record: StringRecord::new(),
        }
    }

    /// True once a header or record with speed/course columns has been read
    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Next data record, or `None` at end of input
    pub fn read_record(&mut self) -> Result<Option<QcRecord>> {
        loop {
            let more = self.reader.read_record(&mut self.record).map_err(|e| {
                Error::csv_parsing(self.file.clone(), "Failed to read canonical record", Some(e))
            })?;
            if !more {
                return Ok(None);
            }

            let first = self.record.get(0).unwrap_or("");
            if first == CANONICAL_COLUMNS[0] {
                self.augmented = self.record.len() > CANONICAL_COLUMNS.len();
                continue;
            }
            if let Some(rest) = first.strip_prefix(QC_FLAG_MARKER) {
                if !rest.starts_with(|c: char| c.is_ascii_digit()) {
                    continue;
                }
            }

            let line = self
                .record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or_default();
            let record = parse_record(&self.record)
                .map_err(|message| Error::malformed_record(self.file.clone(), line, message))?;
            if self.record.len() > CANONICAL_COLUMNS.len() {
                self.augmented = true;
            }
            return Ok(Some(record));
        }
    }
}

impl<R: Read> Iterator for CanonicalReader<R> {
    type Item = Result<QcRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

fn parse_record(record: &StringRecord) -> std::result::Result<QcRecord, String> {
    let plain = CANONICAL_COLUMNS.len();
    let augmented = plain + AUGMENTED_COLUMNS.len();
    if record.len() != plain && record.len() != augmented {
        return Err(format!(
            "expected {} or {} fields, found {}",
            plain,
            augmented,
            record.len()
        ));
    }

    let stamp = &record[0];
    let (flagged, stamp) = match stamp.strip_prefix(QC_FLAG_MARKER) {
        Some(rest) => (true, rest),
        None => (false, stamp),
    };
    let timestamp: Timestamp = stamp
        .parse()
        .map_err(|e: Error| format!("bad timestamp: {}", e))?;

    let fix = UndatedFix {
        time: timestamp.time,
        longitude: optional(&record[1], "longitude", Measure::parse)?,
        latitude: optional(&record[2], "latitude", Measure::parse)?,
        quality: optional(&record[3], "gpsQuality", |t| t.parse::<u8>().ok())?,
        satellites: optional(&record[4], "numSatellites", |t| t.parse::<u32>().ok())?,
        hdop: optional(&record[5], "hdop", Measure::parse)?,
        altitude: optional(&record[6], "antennaAltitude", Measure::parse)?,
    };

    let (sog, cog) = if record.len() == augmented {
        (
            optional(&record[plain], "speedOverGround", parse_finite)?,
            optional(&record[plain + 1], "courseOverGround", parse_finite)?,
        )
    } else {
        (None, None)
    };

    Ok(QcRecord::new(fix.dated(timestamp.date))
        .with_flagged(flagged)
        .with_speed_course(sog, cog))
}

fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// `NAN` or empty reads as absent; anything else must parse
fn optional<T>(
    text: &str,
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> std::result::Result<Option<T>, String> {
    if text.is_empty() || text.eq_ignore_ascii_case(NOT_AVAILABLE) {
        return Ok(None);
    }
    parse(text)
        .map(Some)
        .ok_or_else(|| format!("{} '{}' is not a valid value", name, text))
}
