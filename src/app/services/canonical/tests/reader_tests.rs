//! Tests for the canonical reader

use super::*;
use crate::Error;
use crate::app::services::canonical::{CanonicalReader, QcRecord};

fn read_str(text: &str) -> crate::Result<Vec<QcRecord>> {
    CanonicalReader::new(text.as_bytes(), "test.tsv").collect()
}

#[test]
fn test_write_then_read_keeps_precision() {
    let fixes = vec![
        create_test_canonical_fix("2002-07-04T23:59:59.125Z", "-11.516670", "48.1"),
        create_test_canonical_fix("2002-07-05T00:00:00Z", "-11.5167", "48.11730"),
    ];
    let records: Vec<QcRecord> = fixes.into_iter().map(QcRecord::from).collect();

    let text = write_to_string(&records, false);
    let read = read_str(&text).unwrap();

    assert_eq!(read, records);
    assert_eq!(read[0].fix.fix.longitude.unwrap().to_string(), "-11.516670");
    assert_eq!(read[0].fix.fix.time.to_string(), "23:59:59.125");
}

#[test]
fn test_comments_skipped_and_flagged_records_read() {
    let text = "# cruise AT26-01\n\
                timestamp\tlongitude\tlatitude\tgpsQuality\tnumSatellites\thdop\tantennaAltitude\n\
                #2002-07-04T00:00:00Z\t1.0\t2.0\t1\t8\t0.9\t10.0\n\
                2002-07-04T00:00:01Z\tNAN\tNAN\tNAN\tNAN\tNAN\tNAN\n";

    let records = read_str(text).unwrap();

    assert_eq!(records.len(), 2);
    assert!(records[0].flagged);
    assert!(!records[1].flagged);
    assert!(records[1].position().is_none());
    assert_eq!(records[1].fix.fix.quality, None);
}

#[test]
fn test_augmented_columns_are_read() {
    let text = "timestamp\tlongitude\tlatitude\tgpsQuality\tnumSatellites\thdop\tantennaAltitude\tspeedOverGround\tcourseOverGround\n\
                2002-07-04T00:00:00Z\t1.0\t2.0\t1\t8\t0.9\t10.0\t5.13\t90.000\n\
                2002-07-04T00:00:01Z\t1.0\t2.0\t1\t8\t0.9\t10.0\tNAN\tNAN\n";

    let mut reader = CanonicalReader::new(text.as_bytes(), "aug.tsv");
    let first = reader.read_record().unwrap().unwrap();
    let second = reader.read_record().unwrap().unwrap();

    assert!(reader.is_augmented());
    assert_eq!(first.speed_over_ground, Some(5.13));
    assert_eq!(first.course_over_ground, Some(90.0));
    assert_eq!(second.speed_over_ground, None);
    assert!(reader.read_record().unwrap().is_none());
}

#[test]
fn test_malformed_line_reports_line_number() {
    let text = "timestamp\tlongitude\tlatitude\tgpsQuality\tnumSatellites\thdop\tantennaAltitude\n\
                2002-07-04T00:00:00Z\t1.0\t2.0\t1\t8\t0.9\t10.0\n\
                2002-07-04T00:00:01Z\tabc\t2.0\t1\t8\t0.9\t10.0\n";

    match read_str(text) {
        Err(Error::MalformedRecord { file, line, .. }) => {
            assert_eq!(file, "test.tsv");
            assert_eq!(line, 3);
        }
        other => panic!("expected malformed record, got {:?}", other),
    }
}

#[test]
fn test_wrong_field_count_is_malformed() {
    let text = "2002-07-04T00:00:00Z\t1.0\t2.0\n";
    assert!(matches!(read_str(text), Err(Error::MalformedRecord { .. })));
}

#[test]
fn test_missing_file() {
    let result = CanonicalReader::open(std::path::Path::new("/nonexistent/nav.tsv"));
    assert!(matches!(result, Err(Error::FileNotFound { .. })));
}
