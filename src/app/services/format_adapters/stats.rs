//! Reading statistics for raw navigation logs
//!
//! Counts what the adapters did with every line so a run can report how
//! much of the raw data turned into fixes and why the rest did not.

use crate::Error;
use serde::Serialize;

/// Cap on retained rejection messages; counters keep counting past it
const MAX_RETAINED_ERRORS: usize = 100;

/// Per-run reading statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdapterStats {
    /// Files opened
    pub files_read: usize,

    /// Physical lines read, including blanks and headers
    pub lines_read: usize,

    /// Fix events produced
    pub fixes: usize,

    /// Anchor events produced
    pub anchors: usize,

    /// Sentences dropped for a bad checksum
    pub checksum_failures: usize,

    /// Sentences or records dropped because a field would not decode
    pub decode_failures: usize,

    /// Fixes dropped because they repeated the previous time of day
    pub duplicates_suppressed: usize,

    /// Lines that carry no record for this format (other sentences, comments)
    pub lines_ignored: usize,

    /// Records with neither longitude nor latitude
    pub empty_positions: usize,

    /// First few rejection messages for debugging
    pub errors: Vec<String>,
}

impl AdapterStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            files_read: 0,
            lines_read: 0,
            fixes: 0,
            anchors: 0,
            checksum_failures: 0,
            decode_failures: 0,
            duplicates_suppressed: 0,
            lines_ignored: 0,
            empty_positions: 0,
            errors: Vec::new(),
        }
    }

    /// Count a recoverable rejection by kind
    pub fn record_rejection(&mut self, error: &Error, context: &str) {
        match error {
            Error::ChecksumMismatch { .. } => self.checksum_failures += 1,
            _ => self.decode_failures += 1,
        }
        if self.errors.len() < MAX_RETAINED_ERRORS {
            self.errors.push(format!("{}: {}", context, error));
        }
    }

    /// Total records rejected for checksum or decode failures
    pub fn rejected(&self) -> usize {
        self.checksum_failures + self.decode_failures
    }

    /// Percentage of candidate records that produced a fix
    pub fn success_rate(&self) -> f64 {
        let candidates = self.fixes + self.rejected();
        if candidates == 0 {
            0.0
        } else {
            (self.fixes as f64 / candidates as f64) * 100.0
        }
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Read {} lines from {} files: {} fixes, {} anchors | \
             rejected {} (checksum {}, decode {}) | duplicates {} | ignored {} | no position {}",
            self.lines_read,
            self.files_read,
            self.fixes,
            self.anchors,
            self.rejected(),
            self.checksum_failures,
            self.decode_failures,
            self.duplicates_suppressed,
            self.lines_ignored,
            self.empty_positions
        )
    }
}

impl Default for AdapterStats {
    fn default() -> Self {
        Self::new()
    }
}
