//! Quality assessment report structures
//!
//! The report is a plain value: it is built once by the assessor and then
//! only serialised or rendered.

use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

// =============================================================================
// Report Structure
// =============================================================================

/// Aggregate assessment of one canonical file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaReport {
    /// Time span, epoch counts, and value ranges
    pub duration_and_range_of_values: DurationAndRange,

    /// Anomaly counts and completeness
    pub quality_assessment: QualityAssessment,
}

/// A value reported together with its unit of measure
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub uom: &'static str,
    pub value: Option<f64>,
}

impl Quantity {
    pub fn new(uom: &'static str, value: Option<f64>) -> Self {
        Self { uom, value }
    }

    /// Value rounded to `decimals` places
    pub fn rounded(uom: &'static str, value: Option<f64>, decimals: i32) -> Self {
        Self::new(uom, value.map(|v| round_to(v, decimals)))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "{} {}", value, self.uom),
            None => f.write_str("n/a"),
        }
    }
}

/// Extreme positions of the track in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub westernmost: f64,
    pub easternmost: f64,
    pub southernmost: f64,
    pub northernmost: f64,
}

/// Time span, epoch counts, and value ranges
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationAndRange {
    /// Timestamp of the first record in file order
    pub first_epoch: Option<String>,

    /// Timestamp of the last record in file order
    pub last_epoch: Option<String>,

    /// Nominal sampling interval
    pub epoch_interval: Quantity,

    /// Epochs the span could hold at the nominal interval
    pub possible_number_of_epochs: usize,

    /// Data records present
    pub actual_number_of_epochs: usize,

    /// Data records not flagged by quality control
    pub actual_countable_number_of_epochs: usize,

    /// Possible epochs with no record
    pub absent_number_of_epochs: usize,

    /// Data records flagged by quality control
    pub flagged_number_of_epochs: usize,

    pub maximum_number_of_satellites: Option<u32>,
    pub minimum_number_of_satellites: Option<u32>,
    pub maximum_hdop: Option<f64>,
    pub minimum_hdop: Option<f64>,
    pub maximum_altitude: Quantity,
    pub minimum_altitude: Quantity,
    pub maximum_horizontal_speed: Quantity,
    pub minimum_horizontal_speed: Quantity,
    pub maximum_horizontal_acceleration: Quantity,
    pub minimum_horizontal_acceleration: Quantity,

    /// Distance from the departure port to the first fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_port_start: Option<Quantity>,

    /// Distance from the arrival port to the last fix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_from_port_end: Option<Quantity>,

    pub bounding_box: Option<BoundingBox>,
}

/// Anomaly counts and completeness
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityAssessment {
    pub longest_epoch_gap: Quantity,
    pub number_of_gaps_longer_than_threshold: usize,
    pub number_of_epochs_out_of_sequence: usize,

    /// `None` when no record carries a quality code
    pub number_of_epochs_with_bad_gps_quality_indicator: Option<usize>,

    pub number_of_horizontal_speeds_exceeding_threshold: usize,
    pub number_of_horizontal_accelerations_exceeding_threshold: usize,

    /// Actual over possible epochs, as a percentage with two decimals
    pub percent_completeness: Option<f64>,
}

// =============================================================================
// Output
// =============================================================================

impl QaReport {
    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::serialization("Failed to serialise QA report", e))
    }

    /// Aligned two-column text
    pub fn render_text(&self) -> String {
        let range = &self.duration_and_range_of_values;
        let qa = &self.quality_assessment;
        let mut out = String::new();

        let mut line = |label: &str, value: String| {
            out.push_str(&format!("  {:<46} {}\n", label, value));
        };

        line("First epoch", optional(range.first_epoch.as_deref()));
        line("Last epoch", optional(range.last_epoch.as_deref()));
        line("Epoch interval", range.epoch_interval.to_string());
        line("Possible epochs", range.possible_number_of_epochs.to_string());
        line("Actual epochs", range.actual_number_of_epochs.to_string());
        line("Countable epochs", range.actual_countable_number_of_epochs.to_string());
        line("Absent epochs", range.absent_number_of_epochs.to_string());
        line("Flagged epochs", range.flagged_number_of_epochs.to_string());
        line(
            "Satellites (min / max)",
            pair(
                optional(range.minimum_number_of_satellites),
                optional(range.maximum_number_of_satellites),
            ),
        );
        line(
            "HDOP (min / max)",
            pair(optional(range.minimum_hdop), optional(range.maximum_hdop)),
        );
        line(
            "Altitude (min / max)",
            pair(range.minimum_altitude, range.maximum_altitude),
        );
        line(
            "Horizontal speed (min / max)",
            pair(range.minimum_horizontal_speed, range.maximum_horizontal_speed),
        );
        line(
            "Horizontal acceleration (min / max)",
            pair(
                range.minimum_horizontal_acceleration,
                range.maximum_horizontal_acceleration,
            ),
        );
        if let Some(distance) = range.distance_from_port_start {
            line("Distance from departure port", distance.to_string());
        }
        if let Some(distance) = range.distance_from_port_end {
            line("Distance from arrival port", distance.to_string());
        }
        if let Some(bbox) = range.bounding_box {
            line(
                "Bounding box (W / E / S / N)",
                format!(
                    "{} / {} / {} / {}",
                    bbox.westernmost, bbox.easternmost, bbox.southernmost, bbox.northernmost
                ),
            );
        }

        line("Longest epoch gap", qa.longest_epoch_gap.to_string());
        line("Gaps longer than threshold", qa.number_of_gaps_longer_than_threshold.to_string());
        line("Epochs out of sequence", qa.number_of_epochs_out_of_sequence.to_string());
        line(
            "Epochs with bad GPS quality",
            optional(qa.number_of_epochs_with_bad_gps_quality_indicator),
        );
        line(
            "Speeds exceeding threshold",
            qa.number_of_horizontal_speeds_exceeding_threshold.to_string(),
        );
        line(
            "Accelerations exceeding threshold",
            qa.number_of_horizontal_accelerations_exceeding_threshold.to_string(),
        );
        line(
            "Percent completeness",
            qa.percent_completeness
                .map(|p| format!("{:.2}%", p))
                .unwrap_or_else(|| "n/a".to_string()),
        );

        out
    }
}

impl fmt::Display for QaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text())
    }
}

fn optional<T: fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn pair<T: fmt::Display>(min: T, max: T) -> String {
    format!("{} / {}", min, max)
}

/// Round half away from zero to `decimals` places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
