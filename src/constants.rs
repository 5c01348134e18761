//! Application constants for the navigation processor
//!
//! This module contains default thresholds, canonical format markers, and the
//! physical constants used throughout the processing pipeline.

// =============================================================================
// Canonical Record Format
// =============================================================================

/// Literal written for any field that is not available
pub const NOT_AVAILABLE: &str = "NAN";

/// Prefix marking a record flagged by quality control
pub const QC_FLAG_MARKER: char = '#';

/// Field delimiter of the canonical format
pub const FIELD_DELIMITER: char = '\t';

/// Column names of the canonical record, in order
pub const CANONICAL_COLUMNS: &[&str] = &[
    "timestamp",
    "longitude",
    "latitude",
    "gpsQuality",
    "numSatellites",
    "hdop",
    "antennaAltitude",
];

/// Extra columns appended by the speed/course augmentation step
pub const AUGMENTED_COLUMNS: &[&str] = &["speedOverGround", "courseOverGround"];

/// Decimal places for augmented speed-over-ground values (m/s)
pub const SOG_DECIMALS: usize = 2;

/// Decimal places for augmented course-over-ground values (degrees)
pub const COG_DECIMALS: usize = 3;

// =============================================================================
// Temporal Disambiguation
// =============================================================================

/// Default fix buffer capacity: one day of 1 Hz data
pub const DEFAULT_BUFFER_CAPACITY: usize = 86_400;

/// Seconds in one calendar day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// A backward time-of-day jump larger than this is a midnight rollover.
///
/// Half a day, equivalent to 120000 in hhmmss encoding.
pub const DAY_ROLLOVER_THRESHOLD_SECS: f64 = 43_200.0;

// =============================================================================
// Quality Control Defaults
// =============================================================================

pub mod qc_defaults {
    /// Maximum plausible vessel speed (m/s)
    pub const MAX_SPEED_MPS: f64 = 8.7;

    /// Maximum plausible horizontal acceleration (m/s^2)
    pub const MAX_ACCEL_MPS2: f64 = 1.0;

    /// Longest tolerated gap between epochs (s)
    pub const MAX_GAP_SECS: f64 = 300.0;
}

/// Limits applied to GGA solution metadata
pub mod gps_limits {
    /// Lowest quality code that denotes a usable fix
    pub const MIN_QUALITY: u8 = 1;

    /// Highest quality code that denotes a usable fix (float RTK)
    pub const MAX_QUALITY: u8 = 5;

    /// Fewer satellites than this cannot give a 3D solution
    pub const MIN_SATELLITES: u32 = 4;

    /// Receivers never track more than this
    pub const MAX_SATELLITES: u32 = 50;

    /// HDOP above this is meaningless
    pub const MAX_HDOP: f64 = 50.0;

    /// Antenna altitudes at or beyond this magnitude are bogus (m)
    pub const MAX_ABS_ALTITUDE_M: f64 = 500.0;
}

// =============================================================================
// Geodesy
// =============================================================================

/// Mean Earth radius used by the haversine distance (m)
pub const EARTH_RADIUS_M: f64 = 6_371_010.0;

// =============================================================================
// Quality Assessment
// =============================================================================

/// Epoch interval assumed when the data has fewer than two distinct epochs (s)
pub const FALLBACK_EPOCH_INTERVAL_SECS: f64 = 1.0;

/// Unit labels used in the assessment report
pub mod units {
    pub const SECONDS: &str = "s";
    pub const METERS: &str = "m";
    pub const METERS_PER_SECOND: &str = "m/s";
    pub const METERS_PER_SECOND_SQUARED: &str = "m/s^2";
}

// =============================================================================
// Logging
// =============================================================================

/// Default log level when no verbosity flags are given
pub const DEFAULT_LOG_LEVEL: &str = "info";
