//! Quality assessment of canonical navigation files
//!
//! One pass over a canonical file (quality controlled or not) produces an
//! immutable [`QaReport`]: the covered time span, how many epochs the span
//! should hold against how many are present, value ranges, and anomaly
//! counts.
//!
//! # Architecture
//!
//! - [`assessor`] - [`QualityAssessor`], the single-pass accumulator
//! - [`report`] - [`QaReport`] with JSON and text output
//!
//! # Example
//!
//! ```
//! use nav_processor::app::services::quality_assessment::QualityAssessor;
//! use nav_processor::config::{QualityAssessmentConfig, QualityControlConfig};
//!
//! let assessor = QualityAssessor::new(
//!     QualityAssessmentConfig::default(),
//!     &QualityControlConfig::default(),
//! );
//! let report = assessor.finish();
//! assert_eq!(report.duration_and_range_of_values.actual_number_of_epochs, 0);
//! ```

pub mod assessor;
pub mod report;

#[cfg(test)]
pub mod tests;

pub use assessor::QualityAssessor;
pub use report::{BoundingBox, DurationAndRange, QaReport, QualityAssessment, Quantity};
