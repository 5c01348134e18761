//! Tests for the pairwise checks and the stream driver

use super::*;
use crate::app::services::canonical::CanonicalReader;
use crate::app::services::quality_control::{QcFlag, has_bad_quality};
use chrono::{TimeZone, Utc};

#[test]
fn test_one_kilometre_in_ten_seconds_exceeds_speed() {
    let config = QualityControlConfig::default().with_max_speed(50.0);
    let mut engine = QualityControlEngine::new(config);
    let first = create_test_record("2002-07-04T00:00:00Z", 0.0, 0.0);
    let second = create_test_record("2002-07-04T00:00:10Z", 0.0, 1000.0 / METERS_PER_DEGREE);

    assert!(engine.evaluate(&first).flags.is_empty());
    let evaluation = engine.evaluate(&second);

    assert!((evaluation.speed.unwrap() - 100.0).abs() < 0.1);
    assert!((evaluation.distance.unwrap() - 1000.0).abs() < 1.0);
    assert!(evaluation.flags.contains(QcFlag::SpeedExceeded));
    assert_eq!(evaluation.acceleration, None);
}

#[test]
fn test_speed_outlier_is_not_a_reference() {
    let mut engine = QualityControlEngine::new(QualityControlConfig::default());
    let start = create_test_record("2002-07-04T00:00:00Z", -70.0, 10.0);
    let jump = create_test_record("2002-07-04T00:00:01Z", -70.0, 11.0);
    let back = create_test_record("2002-07-04T00:00:02Z", -70.0, 10.0 + 5.0 / METERS_PER_DEGREE);

    engine.evaluate(&start);
    assert!(engine.evaluate(&jump).flags.contains(QcFlag::SpeedExceeded));

    let evaluation = engine.evaluate(&back);
    assert!(evaluation.flags.is_empty());
    assert_eq!(evaluation.interval, Some(2.0));
    assert!((evaluation.speed.unwrap() - 2.5).abs() < 0.01);
}

#[test]
fn test_acceleration_needs_reference_speed() {
    let config = QualityControlConfig::default().with_max_speed(100.0);
    let mut engine = QualityControlEngine::new(config);
    let track = [
        create_test_record("2002-07-04T00:00:00Z", -70.0, 10.0),
        create_test_record("2002-07-04T00:00:01Z", -70.0, 10.0 + 1.0 / METERS_PER_DEGREE),
        create_test_record("2002-07-04T00:00:02Z", -70.0, 10.0 + 6.0 / METERS_PER_DEGREE),
    ];

    assert_eq!(engine.evaluate(&track[0]).acceleration, None);
    assert_eq!(engine.evaluate(&track[1]).acceleration, None);
    let evaluation = engine.evaluate(&track[2]);

    assert!((evaluation.acceleration.unwrap() - 4.0).abs() < 0.01);
    assert!(evaluation.flags.contains(QcFlag::AccelExceeded));
}

#[test]
fn test_backward_time_is_out_of_sequence_and_equal_time_is_not() {
    let mut engine = QualityControlEngine::new(QualityControlConfig::default());
    engine.evaluate(&create_test_record("2002-07-04T00:00:10Z", -70.0, 10.0));

    let same = engine.evaluate(&create_test_record("2002-07-04T00:00:10Z", -70.0, 10.0));
    assert!(same.flags.is_empty());
    assert_eq!(same.speed, None);

    let earlier = engine.evaluate(&create_test_record("2002-07-04T00:00:05Z", -70.0, 10.0));
    assert!(earlier.flags.contains(QcFlag::OutOfSequence));
}

#[test]
fn test_gap_flag_keeps_record_as_reference() {
    let mut engine = QualityControlEngine::new(QualityControlConfig::default());
    engine.evaluate(&create_test_record("2002-07-04T00:00:00Z", -70.0, 10.0));

    let after_gap = engine.evaluate(&create_test_record("2002-07-04T01:00:00Z", -70.0, 10.0));
    assert!(after_gap.flags.contains(QcFlag::GapExceeded));

    let next = engine.evaluate(&create_test_record("2002-07-04T01:00:01Z", -70.0, 10.0));
    assert_eq!(next.interval, Some(1.0));
}

#[test]
fn test_invalid_positions() {
    let mut engine = QualityControlEngine::new(QualityControlConfig::default());

    let junk = engine.evaluate(&create_test_record("2002-07-04T00:00:00Z", 0.0, 0.0));
    assert!(junk.flags.contains(QcFlag::InvalidPosition));

    let out_of_range = engine.evaluate(&create_test_record("2002-07-04T00:00:01Z", 190.0, 0.0));
    assert!(out_of_range.flags.contains(QcFlag::InvalidPosition));

    let mut missing = create_test_record("2002-07-04T00:00:02Z", 1.0, 1.0);
    missing.fix.fix.latitude = None;
    assert!(engine.evaluate(&missing).flags.contains(QcFlag::InvalidPosition));

    let equator_later = engine.evaluate(&create_test_record("2002-07-04T00:00:03Z", 0.0, 0.0));
    assert!(!equator_later.flags.contains(QcFlag::InvalidPosition));
}

#[test]
fn test_bad_quality_rules() {
    let healthy = create_test_record("2002-07-04T00:00:00Z", 1.0, 1.0).fix.fix;
    assert!(!has_bad_quality(&healthy));

    let mut no_fix = healthy.clone();
    no_fix.quality = Some(0);
    assert!(has_bad_quality(&no_fix));

    let mut few_satellites = healthy.clone();
    few_satellites.satellites = Some(3);
    assert!(has_bad_quality(&few_satellites));

    let mut zero_hdop = healthy.clone();
    zero_hdop.hdop = Some(crate::app::models::Measure::new(0.0, 1));
    assert!(has_bad_quality(&zero_hdop));

    let mut high_antenna = healthy.clone();
    high_antenna.altitude = Some(crate::app::models::Measure::new(-500.0, 1));
    assert!(has_bad_quality(&high_antenna));

    // Without satellite data the altitude is not judged
    let mut rmc_style = healthy.clone();
    rmc_style.satellites = None;
    rmc_style.hdop = None;
    rmc_style.altitude = Some(crate::app::models::Measure::new(900.0, 1));
    assert!(!has_bad_quality(&rmc_style));
}

#[test]
fn test_window_flags_out_of_sequence() {
    let config = QualityControlConfig::default().with_window(
        Some(Utc.with_ymd_and_hms(2002, 7, 4, 0, 0, 1).unwrap()),
        Some(Utc.with_ymd_and_hms(2002, 7, 4, 0, 0, 2).unwrap()),
    );
    let mut engine = QualityControlEngine::new(config);

    let before = engine.evaluate(&create_test_record("2002-07-04T00:00:00Z", -70.0, 10.0));
    let inside = engine.evaluate(&create_test_record("2002-07-04T00:00:01Z", -70.0, 10.0));
    let after = engine.evaluate(&create_test_record("2002-07-04T00:00:03Z", -70.0, 10.0));

    assert!(before.flags.contains(QcFlag::OutOfSequence));
    assert!(inside.flags.is_empty());
    assert!(after.flags.contains(QcFlag::OutOfSequence));
}

#[test]
fn test_annotate_mode_marks_and_logs() {
    let mut records = create_test_track(3, 2.0);
    records[1].fix.fix.quality = Some(0);

    let (output, log, stats) = run_qc(QualityControlConfig::default(), records);
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 4);
    assert!(lines[2].starts_with("#2002-07-04T00:00:01Z"));
    assert_eq!(log, "2002-07-04T00:00:01Z\tBadQualityIndicator\n");
    assert_eq!(stats.records_read, 3);
    assert_eq!(stats.records_written, 3);
    assert_eq!(stats.records_flagged, 1);
    assert_eq!(stats.bad_quality, 1);
}

#[test]
fn test_strict_mode_omits_flagged_records() {
    let mut records = create_test_track(3, 2.0);
    records[1].fix.fix.quality = Some(0);

    let (output, log, stats) = run_qc(QualityControlConfig::default().with_strict_mode(), records);

    assert_eq!(output.lines().count(), 3);
    assert!(!output.contains('#'));
    assert_eq!(log.lines().count(), 1);
    assert_eq!(stats.records_written, 2);
    assert_eq!(stats.records_flagged, 1);
}

#[test]
fn test_output_reads_back_as_flagged() {
    let mut records = create_test_track(2, 2.0);
    records[0].fix.fix.satellites = Some(60);

    let (output, _, _) = run_qc(QualityControlConfig::default(), records);
    let read: Vec<_> = CanonicalReader::new(output.as_bytes(), "qc.tsv")
        .collect::<crate::Result<Vec<_>>>()
        .unwrap();

    assert!(read[0].flagged);
    assert!(!read[1].flagged);
}
