//! Tests for the canonical record format

pub mod reader_tests;
pub mod writer_tests;

use crate::app::models::{CanonicalFix, Measure, Timestamp, UndatedFix};

/// A fully populated fix at an ISO timestamp with textual coordinates
pub fn create_test_canonical_fix(timestamp: &str, longitude: &str, latitude: &str) -> CanonicalFix {
    let timestamp: Timestamp = timestamp.parse().unwrap();
    let fix = UndatedFix {
        time: timestamp.time,
        longitude: Measure::parse(longitude),
        latitude: Measure::parse(latitude),
        quality: Some(1),
        satellites: Some(8),
        hdop: Measure::parse("0.9"),
        altitude: Measure::parse("545.4"),
    };
    fix.dated(timestamp.date)
}

/// Write records through a canonical writer into a string
pub fn write_to_string(records: &[crate::app::services::canonical::QcRecord], augmented: bool) -> String {
    let mut writer = crate::app::services::canonical::CanonicalWriter::new(Vec::new(), augmented).unwrap();
    for record in records {
        writer.write_record(record).unwrap();
    }
    String::from_utf8(writer.finish().unwrap()).unwrap()
}
