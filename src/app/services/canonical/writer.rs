//! Canonical record writer

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::record::QcRecord;
use crate::app::models::{CanonicalFix, format_optional};
use crate::constants::{
    AUGMENTED_COLUMNS, CANONICAL_COLUMNS, COG_DECIMALS, FIELD_DELIMITER, NOT_AVAILABLE,
    QC_FLAG_MARKER, SOG_DECIMALS,
};
use crate::{Error, Result};

/// The seven canonical fields of a fix, each at its source precision
pub fn format_fix(fix: &CanonicalFix) -> Vec<String> {
    vec![
        fix.timestamp().to_string(),
        format_optional(fix.fix.longitude),
        format_optional(fix.fix.latitude),
        format_optional(fix.fix.quality),
        format_optional(fix.fix.satellites),
        format_optional(fix.fix.hdop),
        format_optional(fix.fix.altitude),
    ]
}

fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Streams canonical records to any writer
pub struct CanonicalWriter<W: Write> {
    writer: csv::Writer<W>,
    augmented: bool,
    records_written: usize,
}

impl CanonicalWriter<BufWriter<File>> {
    /// Create (or truncate) a canonical file and write its header
    pub fn create(path: &Path, augmented: bool) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| Error::io(format!("Failed to create {}", path.display()), e))?;
        debug!("Writing canonical records to {}", path.display());
        Self::new(BufWriter::new(file), augmented)
    }
}

impl<W: Write> CanonicalWriter<W> {
    /// Wrap a writer and write the header line
    pub fn new(inner: W, augmented: bool) -> Result<Self> {
        let writer = csv::WriterBuilder::new()
            .delimiter(FIELD_DELIMITER as u8)
            .quote_style(csv::QuoteStyle::Never)
            .has_headers(false)
            .flexible(true)
            .from_writer(inner);

        let mut canonical = Self {
            writer,
            augmented,
            records_written: 0,
        };
        canonical.write_header()?;
        Ok(canonical)
    }

    fn write_header(&mut self) -> Result<()> {
        let extra: &[&str] = if self.augmented { AUGMENTED_COLUMNS } else { &[] };
        self.writer
            .write_record(CANONICAL_COLUMNS.iter().chain(extra.iter()))
            .map_err(|e| Error::csv_parsing("canonical output", "Failed to write header", Some(e)))
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Write an unflagged fix with no speed/course
    pub fn write_fix(&mut self, fix: &CanonicalFix) -> Result<()> {
        let mut fields = format_fix(fix);
        if self.augmented {
            fields.push(NOT_AVAILABLE.to_string());
            fields.push(NOT_AVAILABLE.to_string());
        }
        self.write_fields(&fields)
    }

    /// Write a record, marking it when flagged
    pub fn write_record(&mut self, record: &QcRecord) -> Result<()> {
        let mut fields = format_fix(&record.fix);
        if record.flagged {
            fields[0].insert(0, QC_FLAG_MARKER);
        }
        if self.augmented {
            fields.push(format_fixed(record.speed_over_ground, SOG_DECIMALS));
            fields.push(format_fixed(record.course_over_ground, COG_DECIMALS));
        }
        self.write_fields(&fields)
    }

    fn write_fields(&mut self, fields: &[String]) -> Result<()> {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::csv_parsing("canonical output", "Failed to write record", Some(e)))?;
        self.records_written += 1;
        Ok(())
    }

    /// Flush and hand back the underlying writer
    pub fn finish(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::io("Failed to flush canonical output", std::io::Error::other(e.to_string())))
    }
}
