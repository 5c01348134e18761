//! Tests for quality assessment

pub mod assessor_tests;
pub mod report_tests;

use crate::app::services::canonical::QcRecord;
use crate::app::services::quality_assessment::{QaReport, QualityAssessor};
use crate::config::{QualityAssessmentConfig, QualityControlConfig};

pub use crate::app::services::quality_control::tests::{METERS_PER_DEGREE, create_test_record};

/// Record at a whole number of seconds after midnight on 2002-07-04
pub fn create_test_record_at(seconds: u32, longitude: f64, latitude: f64) -> QcRecord {
    create_test_record(
        &format!(
            "2002-07-04T{:02}:{:02}:{:02}Z",
            seconds / 3600,
            (seconds / 60) % 60,
            seconds % 60
        ),
        longitude,
        latitude,
    )
}

/// Assess records with default thresholds
pub fn assess(records: &[QcRecord]) -> QaReport {
    assess_with(QualityAssessmentConfig::default(), records)
}

pub fn assess_with(config: QualityAssessmentConfig, records: &[QcRecord]) -> QaReport {
    let mut assessor = QualityAssessor::new(config, &QualityControlConfig::default());
    for record in records {
        assessor.push(record);
    }
    assessor.finish()
}
