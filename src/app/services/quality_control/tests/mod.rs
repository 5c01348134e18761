//! Tests for quality control

pub mod engine_tests;

use crate::app::models::{Measure, Timestamp, UndatedFix};
use crate::app::services::canonical::{CanonicalWriter, QcRecord};
use crate::app::services::quality_control::{QcStats, QualityControlEngine};
use crate::config::QualityControlConfig;

/// Metres per degree of latitude on the haversine sphere
pub const METERS_PER_DEGREE: f64 = 111_195.08;

/// A healthy record at `timestamp` and decimal-degree position
pub fn create_test_record(timestamp: &str, longitude: f64, latitude: f64) -> QcRecord {
    let timestamp: Timestamp = timestamp.parse().unwrap();
    let fix = UndatedFix {
        time: timestamp.time,
        longitude: Some(Measure::new(longitude, 6)),
        latitude: Some(Measure::new(latitude, 6)),
        quality: Some(1),
        satellites: Some(8),
        hdop: Some(Measure::new(0.9, 1)),
        altitude: Some(Measure::new(10.0, 1)),
    };
    QcRecord::new(fix.dated(timestamp.date))
}

/// Records one second apart moving north at `speed` m/s
pub fn create_test_track(count: usize, speed: f64) -> Vec<QcRecord> {
    (0..count)
        .map(|i| {
            let latitude = 10.0 + (i as f64 * speed) / METERS_PER_DEGREE;
            create_test_record(&format!("2002-07-04T00:{:02}:{:02}Z", i / 60, i % 60), -70.0, latitude)
        })
        .collect()
}

/// Run the engine over records, returning output text, flag log, and stats
pub fn run_qc(config: QualityControlConfig, records: Vec<QcRecord>) -> (String, String, QcStats) {
    let augmented = config.augment;
    let mut engine = QualityControlEngine::new(config);
    let mut writer = CanonicalWriter::new(Vec::new(), augmented).unwrap();
    let mut log: Vec<u8> = Vec::new();

    let stats = engine
        .process(records.into_iter().map(Ok), &mut writer, Some(&mut log))
        .unwrap();

    let output = String::from_utf8(writer.finish().unwrap()).unwrap();
    (output, String::from_utf8(log).unwrap(), stats)
}
