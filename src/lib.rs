//! Navigation Processor Library
//!
//! A Rust library for normalising raw shipboard GPS logs into a single
//! canonical, time-ordered navigation record stream.
//!
//! This library provides tools for:
//! - Decoding NMEA-0183 sentences (GGA, ZDA, RMC, GLL, VTG) with checksum validation
//! - Reading a dozen vendor-specific raw log layouts through a common adapter interface
//! - Resolving calendar dates for time-of-day-only fixes with bounded buffering
//! - Writing and reading the tab-delimited canonical record format with source precision
//! - Flagging implausible fixes (speed, acceleration, gaps, device quality)
//! - Summarising a canonical file in a single-pass quality assessment report

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod canonical;
        pub mod disambiguator;
        pub mod format_adapters;
        pub mod geodesy;
        pub mod pipeline;
        pub mod quality_assessment;
        pub mod quality_control;
        pub mod sentence_decoder;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AnchorDate, CalendarDate, CanonicalFix, Measure, TimeOfDay, UndatedFix};
pub use config::NavConfig;

/// Result type alias for the navigation processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for navigation processing operations
///
/// Variants split into two classes. Recoverable errors describe a single bad
/// sentence or field and are absorbed by the format adapters; every other
/// variant aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Input file does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// A data record could not be split into its expected fields
    #[error("Malformed record in '{file}' at line {line}: {message}")]
    MalformedRecord {
        file: String,
        line: usize,
        message: String,
    },

    /// Fixes are waiting to be dated but no trusted timestamp has been seen
    #[error("Missing anchor: {message}")]
    MissingAnchor { message: String },

    /// The fix buffer filled up before any anchor was observed
    #[error(
        "Buffer overflow without anchor: {capacity} fixes buffered and no date/time reference seen"
    )]
    BufferOverflowWithoutAnchor { capacity: usize },

    /// Supplied NMEA checksum does not match the computed one
    #[error("Checksum mismatch: supplied {supplied}, computed {computed}")]
    ChecksumMismatch { supplied: String, computed: String },

    /// A sentence could not be decoded into its typed fields
    #[error("Cannot decode {kind} sentence: {message}")]
    SentenceDecode { kind: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unknown raw format identifier
    #[error("Unknown raw format: {name}")]
    UnknownFormat { name: String },

    /// Date/time parsing error
    #[error("Date/time parsing error: {message}")]
    DateTimeParsing {
        message: String,
        #[source]
        source: chrono::ParseError,
    },

    /// JSON (de)serialisation error
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// CSV parsing error
    #[error("CSV parsing error in file '{file}': {message}")]
    CsvParsing {
        file: String,
        message: String,
        #[source]
        source: Option<csv::Error>,
    },

    /// Invalid file glob pattern
    #[error("Invalid file pattern: {message}")]
    Pattern {
        message: String,
        #[source]
        source: glob::PatternError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a malformed record error
    pub fn malformed_record(
        file: impl Into<String>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            file: file.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a missing anchor error
    pub fn missing_anchor(message: impl Into<String>) -> Self {
        Self::MissingAnchor {
            message: message.into(),
        }
    }

    /// Create a buffer overflow error
    pub fn buffer_overflow_without_anchor(capacity: usize) -> Self {
        Self::BufferOverflowWithoutAnchor { capacity }
    }

    /// Create a checksum mismatch error
    pub fn checksum_mismatch(supplied: impl Into<String>, computed: impl Into<String>) -> Self {
        Self::ChecksumMismatch {
            supplied: supplied.into(),
            computed: computed.into(),
        }
    }

    /// Create a sentence decode error
    pub fn sentence_decode(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SentenceDecode {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown format error
    pub fn unknown_format(name: impl Into<String>) -> Self {
        Self::UnknownFormat { name: name.into() }
    }

    /// Create a date/time parsing error
    pub fn datetime_parsing(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: message.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV parsing error with context
    pub fn csv_parsing(
        file: impl Into<String>,
        message: impl Into<String>,
        source: Option<csv::Error>,
    ) -> Self {
        Self::CsvParsing {
            file: file.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a glob pattern error
    pub fn pattern(message: impl Into<String>, source: glob::PatternError) -> Self {
        Self::Pattern {
            message: message.into(),
            source,
        }
    }

    /// True for per-sentence faults that an adapter may drop and continue past
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ChecksumMismatch { .. } | Self::SentenceDecode { .. }
        )
    }

    /// True for both flavours of the missing-anchor fault
    pub fn is_missing_anchor(&self) -> bool {
        matches!(
            self,
            Self::MissingAnchor { .. } | Self::BufferOverflowWithoutAnchor { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::CsvParsing {
            file: "unknown".to_string(),
            message: "CSV parsing failed".to_string(),
            source: Some(error),
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::DateTimeParsing {
            message: "Date/time parsing failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON serialization failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::Pattern {
            message: "Glob pattern rejected".to_string(),
            source: error,
        }
    }
}
