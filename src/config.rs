//! Configuration for navigation processing
//!
//! Every threshold has a documented default so a run needs nothing beyond the
//! raw format identifier. A JSON file can override the defaults and CLI flags
//! override the file.

use crate::app::models::GeoPoint;
use crate::app::services::format_adapters::RawFormat;
use crate::constants::{DEFAULT_BUFFER_CAPACITY, qc_defaults};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What the quality control engine does with a flagged record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QcMode {
    /// Write every record, prefixing flagged ones with the QC marker
    #[default]
    Annotate,
    /// Omit flagged records from the output (they are still counted and logged)
    Strict,
}

/// Thresholds and behaviour for the quality control engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityControlConfig {
    /// Maximum plausible horizontal speed (m/s)
    pub max_speed_mps: f64,

    /// Maximum plausible horizontal acceleration magnitude (m/s^2)
    pub max_accel_mps2: f64,

    /// Longest tolerated gap between consecutive epochs (s)
    pub max_gap_secs: f64,

    /// Annotate or drop flagged records
    pub mode: QcMode,

    /// Append speed-over-ground and course-over-ground columns
    pub augment: bool,

    /// Earliest acceptable epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start: Option<DateTime<Utc>>,

    /// Latest acceptable epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_end: Option<DateTime<Utc>>,
}

impl Default for QualityControlConfig {
    fn default() -> Self {
        Self {
            max_speed_mps: qc_defaults::MAX_SPEED_MPS,
            max_accel_mps2: qc_defaults::MAX_ACCEL_MPS2,
            max_gap_secs: qc_defaults::MAX_GAP_SECS,
            mode: QcMode::Annotate,
            augment: false,
            window_start: None,
            window_end: None,
        }
    }
}

impl QualityControlConfig {
    /// Set the maximum speed threshold
    pub fn with_max_speed(mut self, max_speed_mps: f64) -> Self {
        self.max_speed_mps = max_speed_mps;
        self
    }

    /// Set the maximum acceleration threshold
    pub fn with_max_accel(mut self, max_accel_mps2: f64) -> Self {
        self.max_accel_mps2 = max_accel_mps2;
        self
    }

    /// Set the maximum gap threshold
    pub fn with_max_gap(mut self, max_gap_secs: f64) -> Self {
        self.max_gap_secs = max_gap_secs;
        self
    }

    /// Drop flagged records instead of annotating them
    pub fn with_strict_mode(mut self) -> Self {
        self.mode = QcMode::Strict;
        self
    }

    /// Append computed speed and course columns
    pub fn with_augmentation(mut self) -> Self {
        self.augment = true;
        self
    }

    /// Restrict acceptable epochs to a time window
    pub fn with_window(mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        self.window_start = start;
        self.window_end = end;
        self
    }

    /// Validate thresholds
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_speed_mps", self.max_speed_mps),
            ("max_accel_mps2", self.max_accel_mps2),
            ("max_gap_secs", self.max_gap_secs),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::configuration(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if let (Some(start), Some(end)) = (self.window_start, self.window_end) {
            if start > end {
                return Err(Error::configuration(format!(
                    "time window start {} is after end {}",
                    start, end
                )));
            }
        }

        Ok(())
    }
}

/// Settings for the quality assessment report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityAssessmentConfig {
    /// Nominal epoch interval in seconds; inferred from the data when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epoch_interval_secs: Option<f64>,

    /// Port the cruise departed from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_port: Option<GeoPoint>,

    /// Port the cruise arrived at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_port: Option<GeoPoint>,
}

impl QualityAssessmentConfig {
    /// Validate assessment settings
    pub fn validate(&self) -> Result<()> {
        if let Some(interval) = self.epoch_interval_secs {
            if !(interval.is_finite() && interval > 0.0) {
                return Err(Error::configuration(format!(
                    "epoch_interval_secs must be positive, got {}",
                    interval
                )));
            }
        }

        for port in [&self.departure_port, &self.arrival_port].into_iter().flatten() {
            port.validate()?;
        }

        Ok(())
    }
}

/// Global configuration for a navigation processing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Raw format of the input files
    pub format: RawFormat,

    /// Capacity of the disambiguator's fix buffer
    pub buffer_capacity: usize,

    /// Quality control thresholds
    pub qc: QualityControlConfig,

    /// Quality assessment settings
    pub qa: QualityAssessmentConfig,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            format: RawFormat::NmeaZda,
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            qc: QualityControlConfig::default(),
            qa: QualityAssessmentConfig::default(),
        }
    }
}

impl NavConfig {
    /// Load configuration from a JSON file, filling absent keys with defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config {}", path.display()), e)
        })?;

        let config: NavConfig = serde_json::from_str(&content).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Select the raw input format
    pub fn with_format(mut self, format: RawFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the disambiguator buffer capacity
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    /// Replace the quality control configuration
    pub fn with_qc(mut self, qc: QualityControlConfig) -> Self {
        self.qc = qc;
        self
    }

    /// Replace the quality assessment configuration
    pub fn with_qa(mut self, qa: QualityAssessmentConfig) -> Self {
        self.qa = qa;
        self
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<()> {
        if self.buffer_capacity == 0 {
            return Err(Error::configuration("buffer_capacity must be at least 1"));
        }
        self.qc.validate()?;
        self.qa.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults_are_valid() {
        let config = NavConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.buffer_capacity, 86_400);
        assert_eq!(config.qc.max_speed_mps, 8.7);
        assert_eq!(config.qc.max_accel_mps2, 1.0);
        assert_eq!(config.qc.max_gap_secs, 300.0);
        assert_eq!(config.qc.mode, QcMode::Annotate);
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = NavConfig::default().with_buffer_capacity(0);
        assert!(matches!(config.validate(), Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let qc = QualityControlConfig::default().with_max_speed(-1.0);
        assert!(qc.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_window() {
        let start = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let qc = QualityControlConfig::default().with_window(Some(start), Some(end));
        assert!(qc.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "format": "gps-prefixed", "qc": { "max_speed_mps": 12.5, "mode": "strict" } }"#;
        let config: NavConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.format, RawFormat::GpsPrefixed);
        assert_eq!(config.qc.max_speed_mps, 12.5);
        assert_eq!(config.qc.max_gap_secs, 300.0);
        assert_eq!(config.qc.mode, QcMode::Strict);
        assert_eq!(config.buffer_capacity, 86_400);
    }

    #[test]
    fn test_legacy_format_alias_in_json() {
        let config: NavConfig = serde_json::from_str(r#"{ "format": "nav33" }"#).unwrap();
        assert_eq!(config.format, RawFormat::IsoClockGga);
    }
}
