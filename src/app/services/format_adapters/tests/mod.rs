//! Tests for the raw format adapters
//!
//! Adapters are exercised one line at a time through [`decode_lines`]; the
//! multi-file reader gets real temporary files.

pub mod device_sentence_tests;

use std::io::Write;
use tempfile::NamedTempFile;

use super::{AdapterStats, FormatAdapter, LineLocation, NavEvent, RawFormat, create_adapter};
use crate::app::models::{AnchorDate, UndatedFix};

pub use crate::app::services::sentence_decoder::tests::create_test_sentence;

/// Feed lines to a fresh adapter for `format`, collecting events and stats
pub fn decode_lines(format: RawFormat, lines: &[&str]) -> (Vec<NavEvent>, AdapterStats) {
    let mut adapter = create_adapter(format);
    decode_with(adapter.as_mut(), lines)
}

/// Feed lines to an existing adapter
pub fn decode_with(adapter: &mut dyn FormatAdapter, lines: &[&str]) -> (Vec<NavEvent>, AdapterStats) {
    let mut stats = AdapterStats::new();
    let mut events = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let location = LineLocation::new("test.log", index + 1);
        events.extend(adapter.decode_line(line, &location, &mut stats).unwrap());
    }
    (events, stats)
}

/// Fixes only, in order
pub fn fixes(events: &[NavEvent]) -> Vec<&UndatedFix> {
    events
        .iter()
        .filter_map(|e| match e {
            NavEvent::Fix(fix) => Some(fix),
            NavEvent::Anchor(_) => None,
        })
        .collect()
}

/// Anchors only, in order
pub fn anchors(events: &[NavEvent]) -> Vec<&AnchorDate> {
    events
        .iter()
        .filter_map(|e| match e {
            NavEvent::Anchor(anchor) => Some(anchor),
            NavEvent::Fix(_) => None,
        })
        .collect()
}

/// Write a raw log to a temporary file
pub fn create_test_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
