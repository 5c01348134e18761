//! Tests for the canonical writer

use super::*;
use crate::app::services::canonical::{CanonicalWriter, QcRecord};

#[test]
fn test_header_and_record_at_source_precision() {
    let fix = create_test_canonical_fix("2002-07-04T12:35:19.25Z", "11.51667", "48.11730");
    let output = write_to_string(&[QcRecord::new(fix)], false);

    assert_eq!(
        output,
        "timestamp\tlongitude\tlatitude\tgpsQuality\tnumSatellites\thdop\tantennaAltitude\n\
         2002-07-04T12:35:19.25Z\t11.51667\t48.11730\t1\t8\t0.9\t545.4\n"
    );
}

#[test]
fn test_unavailable_fields_write_nan() {
    let timestamp: Timestamp = "2002-07-04T00:00:00Z".parse().unwrap();
    let fix = UndatedFix::at(timestamp.time).dated(timestamp.date);

    let mut writer = CanonicalWriter::new(Vec::new(), false).unwrap();
    writer.write_fix(&fix).unwrap();
    let output = String::from_utf8(writer.finish().unwrap()).unwrap();

    assert!(output.ends_with("2002-07-04T00:00:00Z\tNAN\tNAN\tNAN\tNAN\tNAN\tNAN\n"));
}

#[test]
fn test_flagged_and_augmented_record() {
    let fix = create_test_canonical_fix("2002-07-04T12:35:19Z", "-70.5", "41.25");
    let flagged = QcRecord::new(fix.clone()).with_flagged(true);
    let moving = QcRecord::new(fix).with_speed_course(Some(5.126), Some(90.0));

    let output = write_to_string(&[flagged, moving], true);
    let lines: Vec<&str> = output.lines().collect();

    assert!(lines[0].ends_with("\tspeedOverGround\tcourseOverGround"));
    assert_eq!(lines[1], "#2002-07-04T12:35:19Z\t-70.5\t41.25\t1\t8\t0.9\t545.4\tNAN\tNAN");
    assert_eq!(lines[2], "2002-07-04T12:35:19Z\t-70.5\t41.25\t1\t8\t0.9\t545.4\t5.13\t90.000");
}

#[test]
fn test_records_written_count() {
    let fix = create_test_canonical_fix("2002-07-04T12:35:19Z", "1.0", "2.0");
    let mut writer = CanonicalWriter::new(Vec::new(), false).unwrap();
    writer.write_fix(&fix).unwrap();
    writer.write_fix(&fix).unwrap();

    assert_eq!(writer.records_written(), 2);
}
