//! Statistics for temporal disambiguation

use serde::Serialize;
use std::fmt;

/// Why the buffer was drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlushCause {
    /// A new anchor arrived
    Anchor,
    /// The buffer reached capacity
    Capacity,
    /// Input ended
    EndOfInput,
    /// The first anchor dated fixes that arrived before it
    Retroactive,
}

impl fmt::Display for FlushCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Anchor => "anchor",
            Self::Capacity => "capacity",
            Self::EndOfInput => "end of input",
            Self::Retroactive => "retroactive",
        };
        write!(f, "{}", name)
    }
}

/// Counters kept by the disambiguator
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisambiguationStats {
    pub fixes_received: usize,
    pub fixes_emitted: usize,
    pub anchors_received: usize,
    pub anchor_flushes: usize,
    pub capacity_flushes: usize,
    pub end_of_input_flushes: usize,
    pub retroactive_flushes: usize,
    /// Times a fix was dated one day after its reference
    pub day_rollovers: usize,
}

impl DisambiguationStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_flush(&mut self, cause: FlushCause, fixes: usize) {
        self.fixes_emitted += fixes;
        match cause {
            FlushCause::Anchor => self.anchor_flushes += 1,
            FlushCause::Capacity => self.capacity_flushes += 1,
            FlushCause::EndOfInput => self.end_of_input_flushes += 1,
            FlushCause::Retroactive => self.retroactive_flushes += 1,
        }
    }

    /// Total number of non-empty flushes
    pub fn total_flushes(&self) -> usize {
        self.anchor_flushes + self.capacity_flushes + self.end_of_input_flushes + self.retroactive_flushes
    }

    /// Fixes still held back (non-zero only before `finish`)
    pub fn pending(&self) -> usize {
        self.fixes_received.saturating_sub(self.fixes_emitted)
    }

    pub fn summary(&self) -> String {
        format!(
            "Dated {}/{} fixes using {} anchors | {} flushes (anchor {}, capacity {}, end {}, retroactive {}) | {} day rollovers",
            self.fixes_emitted,
            self.fixes_received,
            self.anchors_received,
            self.total_flushes(),
            self.anchor_flushes,
            self.capacity_flushes,
            self.end_of_input_flushes,
            self.retroactive_flushes,
            self.day_rollovers
        )
    }
}
