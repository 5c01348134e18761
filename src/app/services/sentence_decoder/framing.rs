//! NMEA-0183 sentence framing and checksum validation
//!
//! Turns one raw line into a [`RawSentence`]: the text between `$` and `*`
//! split into comma-separated fields, plus the supplied checksum and whether
//! it matches the XOR of the framed bytes.

use crate::{Error, Result};
use std::fmt;

/// Start-of-sentence delimiter
pub const START_DELIMITER: char = '$';

/// Checksum delimiter
pub const CHECKSUM_DELIMITER: char = '*';

/// Message kinds the decoders understand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceKind {
    /// GGA: time, position, and solution metadata
    PositionFix,
    /// ZDA: UTC date and time
    DateTimeStamp,
    /// RMC: time, position, speed, course, and date
    RecommendedMinimum,
    /// GLL: position with optional time
    PartialPosition,
    /// VTG: course and speed over ground
    VelocityCourse,
    /// Any other sentence, by its three-letter formatter
    Other(String),
}

impl SentenceKind {
    /// Classify a sentence address such as `GPGGA` or `INZDA`
    pub fn from_address(address: &str) -> Self {
        // Addresses are ASCII alphanumeric (see `is_complete`)
        let formatter = address
            .get(address.len().saturating_sub(3)..)
            .unwrap_or(address);

        match formatter {
            "GGA" => Self::PositionFix,
            "ZDA" => Self::DateTimeStamp,
            "RMC" => Self::RecommendedMinimum,
            "GLL" => Self::PartialPosition,
            "VTG" => Self::VelocityCourse,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionFix => write!(f, "GGA"),
            Self::DateTimeStamp => write!(f, "ZDA"),
            Self::RecommendedMinimum => write!(f, "RMC"),
            Self::PartialPosition => write!(f, "GLL"),
            Self::VelocityCourse => write!(f, "VTG"),
            Self::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Outcome of comparing the supplied checksum with the computed one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumStatus {
    Valid,
    Absent,
    Mismatch { supplied: String, computed: String },
}

/// One framed sentence
///
/// `fields[0]` is the address (`GPGGA`), so field numbers match the NMEA
/// documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSentence {
    pub kind: SentenceKind,
    pub fields: Vec<String>,
    pub checksum: ChecksumStatus,
}

impl RawSentence {
    /// Frame a line, repairing concatenated transmissions
    ///
    /// When a line holds more than one `$`, only the last complete message is
    /// kept. A message is complete when it has an address followed by at
    /// least one field.
    pub fn parse(line: &str) -> Result<Self> {
        let message = last_complete_message(line).ok_or_else(|| {
            Error::sentence_decode("NMEA", format!("no complete sentence in '{}'", line.trim()))
        })?;

        let (body, supplied) = match message.split_once(CHECKSUM_DELIMITER) {
            Some((body, rest)) => (body, Some(rest.trim())),
            None => (message.trim_end(), None),
        };

        let computed = format!("{:02X}", checksum(body));
        let checksum = match supplied {
            None | Some("") => ChecksumStatus::Absent,
            Some(s) if s.eq_ignore_ascii_case(&computed) => ChecksumStatus::Valid,
            Some(s) => ChecksumStatus::Mismatch {
                supplied: s.to_string(),
                computed,
            },
        };

        let fields: Vec<String> = body.split(',').map(|f| f.trim().to_string()).collect();
        let kind = SentenceKind::from_address(&fields[0]);

        Ok(Self {
            kind,
            fields,
            checksum,
        })
    }

    /// Reject a sentence whose supplied checksum does not match
    ///
    /// A sentence without a checksum passes; older receivers never wrote one.
    pub fn verify(self) -> Result<Self> {
        match &self.checksum {
            ChecksumStatus::Valid | ChecksumStatus::Absent => Ok(self),
            ChecksumStatus::Mismatch { supplied, computed } => {
                Err(Error::checksum_mismatch(supplied.clone(), computed.clone()))
            }
        }
    }

    /// The sentence address, e.g. `GPGGA`
    pub fn address(&self) -> &str {
        &self.fields[0]
    }

    /// Field by NMEA number; missing trailing fields read as empty
    pub fn field(&self, index: usize) -> &str {
        self.fields.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

/// XOR of every byte in the framed body
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0u8, |acc, b| acc ^ b)
}

/// Text after the last `$` that starts a complete message
fn last_complete_message(line: &str) -> Option<&str> {
    line.split(START_DELIMITER)
        .skip(1)
        .filter(|candidate| is_complete(candidate))
        .last()
}

fn is_complete(candidate: &str) -> bool {
    match candidate.split_once(',') {
        Some((address, _)) => {
            address.len() >= 3 && address.bytes().all(|b| b.is_ascii_alphanumeric())
        }
        None => false,
    }
}
