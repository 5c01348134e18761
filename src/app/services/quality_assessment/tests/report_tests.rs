//! Tests for report output

use super::*;

fn sample_report() -> QaReport {
    let records: Vec<QcRecord> = (0..10)
        .filter(|s| *s != 4)
        .map(|s| create_test_record_at(s, -70.0, 41.0))
        .collect();
    assess(&records)
}

#[test]
fn test_json_groups_and_units() {
    let json: serde_json::Value = serde_json::from_str(&sample_report().to_json().unwrap()).unwrap();

    let range = &json["duration_and_range_of_values"];
    assert_eq!(range["epoch_interval"]["uom"], "s");
    assert_eq!(range["epoch_interval"]["value"], 1.0);
    assert_eq!(range["possible_number_of_epochs"], 10);
    assert_eq!(range["actual_number_of_epochs"], 9);
    assert!(range.get("distance_from_port_start").is_none());

    let qa = &json["quality_assessment"];
    assert_eq!(qa["percent_completeness"], 90.0);
    assert_eq!(qa["longest_epoch_gap"]["value"], 2.0);
}

#[test]
fn test_text_report_lines() {
    let text = sample_report().render_text();

    assert!(text.contains("First epoch"));
    assert!(text.contains("2002-07-04T00:00:00Z"));
    assert!(text.contains("Percent completeness"));
    assert!(text.contains("90.00%"));
    assert!(!text.contains("Distance from departure port"));
}
