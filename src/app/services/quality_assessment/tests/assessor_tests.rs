//! Tests for the single-pass assessor

use super::*;
use crate::app::models::GeoPoint;

#[test]
fn test_one_hour_with_one_dropped_fix() {
    let records: Vec<QcRecord> = (0..3600)
        .filter(|s| *s != 1800)
        .map(|s| create_test_record_at(s, -70.0, 41.0))
        .collect();

    let report = assess(&records);
    let range = &report.duration_and_range_of_values;

    assert_eq!(range.epoch_interval.value, Some(1.0));
    assert_eq!(range.possible_number_of_epochs, 3600);
    assert_eq!(range.actual_number_of_epochs, 3599);
    assert_eq!(range.absent_number_of_epochs, 1);
    assert_eq!(report.quality_assessment.percent_completeness, Some(99.97));
    assert_eq!(range.first_epoch.as_deref(), Some("2002-07-04T00:00:00Z"));
    assert_eq!(range.last_epoch.as_deref(), Some("2002-07-04T00:59:59Z"));
    assert_eq!(report.quality_assessment.longest_epoch_gap.value, Some(2.0));
}

#[test]
fn test_interval_is_the_most_common_step() {
    let records: Vec<QcRecord> = [0, 5, 10, 15, 16, 20]
        .into_iter()
        .map(|s| create_test_record_at(s, -70.0, 41.0))
        .collect();

    let report = assess(&records);
    let range = &report.duration_and_range_of_values;

    assert_eq!(range.epoch_interval.value, Some(5.0));
    assert_eq!(range.possible_number_of_epochs, 5);
    // More records than the nominal rate allows never goes negative
    assert_eq!(range.absent_number_of_epochs, 0);
}

#[test]
fn test_configured_interval_wins() {
    let records: Vec<QcRecord> = (0..10).map(|s| create_test_record_at(s, -70.0, 41.0)).collect();
    let config = QualityAssessmentConfig {
        epoch_interval_secs: Some(3.0),
        ..Default::default()
    };

    let report = assess_with(config, &records);

    assert_eq!(report.duration_and_range_of_values.epoch_interval.value, Some(3.0));
    assert_eq!(report.duration_and_range_of_values.possible_number_of_epochs, 4);
}

#[test]
fn test_single_record_falls_back_to_one_second() {
    let report = assess(&[create_test_record_at(0, -70.0, 41.0)]);
    let range = &report.duration_and_range_of_values;

    assert_eq!(range.epoch_interval.value, Some(1.0));
    assert_eq!(range.possible_number_of_epochs, 1);
    assert_eq!(report.quality_assessment.percent_completeness, Some(100.0));
    assert_eq!(report.quality_assessment.longest_epoch_gap.value, None);
}

#[test]
fn test_empty_input() {
    let report = assess(&[]);

    assert_eq!(report.duration_and_range_of_values.first_epoch, None);
    assert_eq!(report.duration_and_range_of_values.possible_number_of_epochs, 0);
    assert_eq!(report.quality_assessment.percent_completeness, None);
    assert_eq!(report.duration_and_range_of_values.bounding_box, None);
}

#[test]
fn test_flagged_records_count_but_are_not_measured() {
    let mut records: Vec<QcRecord> = (0..4)
        .map(|s| create_test_record_at(s, -70.0, 41.0 + s as f64 * 2.0 / METERS_PER_DEGREE))
        .collect();
    records[2] = create_test_record_at(2, 10.0, 10.0).with_flagged(true);

    let report = assess(&records);
    let range = &report.duration_and_range_of_values;

    assert_eq!(range.actual_number_of_epochs, 4);
    assert_eq!(range.actual_countable_number_of_epochs, 3);
    assert_eq!(range.flagged_number_of_epochs, 1);
    assert_eq!(range.maximum_horizontal_speed.value, Some(2.0));
    assert_eq!(range.bounding_box.unwrap().easternmost, -70.0);
    assert_eq!(report.quality_assessment.number_of_horizontal_speeds_exceeding_threshold, 0);
}

#[test]
fn test_speed_and_acceleration_extrema() {
    // 1 m then 4 m per second
    let records = vec![
        create_test_record_at(0, -70.0, 41.0),
        create_test_record_at(1, -70.0, 41.0 + 1.0 / METERS_PER_DEGREE),
        create_test_record_at(2, -70.0, 41.0 + 5.0 / METERS_PER_DEGREE),
    ];

    let report = assess(&records);
    let range = &report.duration_and_range_of_values;

    assert_eq!(range.minimum_horizontal_speed.value, Some(1.0));
    assert_eq!(range.maximum_horizontal_speed.value, Some(4.0));
    assert_eq!(range.maximum_horizontal_acceleration.value, Some(3.0));
    assert_eq!(range.maximum_horizontal_acceleration.uom, "m/s^2");
    assert_eq!(
        report.quality_assessment.number_of_horizontal_accelerations_exceeding_threshold,
        1
    );
}

#[test]
fn test_gaps_and_out_of_sequence() {
    let records = vec![
        create_test_record_at(0, -70.0, 41.0),
        create_test_record_at(1, -70.0, 41.0),
        create_test_record_at(601, -70.0, 41.0),
        create_test_record_at(600, -70.0, 41.0),
    ];

    let report = assess(&records);
    let qa = &report.quality_assessment;

    assert_eq!(qa.longest_epoch_gap.value, Some(600.0));
    assert_eq!(qa.number_of_gaps_longer_than_threshold, 1);
    assert_eq!(qa.number_of_epochs_out_of_sequence, 1);
}

#[test]
fn test_bad_quality_is_null_without_quality_codes() {
    let mut record = create_test_record_at(0, -70.0, 41.0);
    record.fix.fix.quality = None;

    let report = assess(&[record]);
    assert_eq!(
        report.quality_assessment.number_of_epochs_with_bad_gps_quality_indicator,
        None
    );

    let mut bad = create_test_record_at(1, -70.0, 41.0);
    bad.fix.fix.quality = Some(0);
    let report = assess(&[create_test_record_at(0, -70.0, 41.0), bad]);
    assert_eq!(
        report.quality_assessment.number_of_epochs_with_bad_gps_quality_indicator,
        Some(1)
    );
}

#[test]
fn test_ranges_and_bounding_box() {
    let mut first = create_test_record_at(0, -70.5, 41.0);
    first.fix.fix.satellites = Some(5);
    let mut second = create_test_record_at(60, -70.0, 41.25);
    second.fix.fix.satellites = Some(11);
    second.fix.fix.altitude = Some(crate::app::models::Measure::new(-2.5, 1));

    let report = assess(&[first, second]);
    let range = &report.duration_and_range_of_values;

    assert_eq!(range.minimum_number_of_satellites, Some(5));
    assert_eq!(range.maximum_number_of_satellites, Some(11));
    assert_eq!(range.minimum_altitude.value, Some(-2.5));
    assert_eq!(range.maximum_altitude.value, Some(10.0));
    assert_eq!(
        range.bounding_box,
        Some(crate::app::services::quality_assessment::BoundingBox {
            westernmost: -70.5,
            easternmost: -70.0,
            southernmost: 41.0,
            northernmost: 41.25,
        })
    );
}

#[test]
fn test_port_distances() {
    let records = vec![
        create_test_record_at(0, 0.0, 1.0),
        create_test_record_at(1, 0.0, 1.0 + 1.0 / METERS_PER_DEGREE),
    ];
    let config = QualityAssessmentConfig {
        departure_port: Some(GeoPoint::new(0.0, 1.0)),
        arrival_port: Some(GeoPoint::new(0.0, 1.0 + 101.0 / METERS_PER_DEGREE)),
        ..Default::default()
    };

    let report = assess_with(config, &records);
    let range = &report.duration_and_range_of_values;

    assert_eq!(range.distance_from_port_start.unwrap().value, Some(0.0));
    assert_eq!(range.distance_from_port_end.unwrap().value, Some(100.0));
    assert!(assess(&records).duration_and_range_of_values.distance_from_port_start.is_none());
}
