//! Single-pass accumulation of the assessment report

use std::collections::HashMap;

use tracing::debug;

use super::report::{BoundingBox, DurationAndRange, QaReport, QualityAssessment, Quantity, round_to};
use crate::Result;
use crate::app::models::{GeoPoint, Timestamp};
use crate::app::services::canonical::QcRecord;
use crate::app::services::geodesy::haversine_distance;
use crate::app::services::quality_control::has_bad_quality;
use crate::config::{QualityAssessmentConfig, QualityControlConfig};
use crate::constants::{FALLBACK_EPOCH_INTERVAL_SECS, units};

/// Running minimum and maximum
#[derive(Debug, Clone, Copy, Default)]
struct Extent<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: PartialOrd + Copy> Extent<T> {
    fn include(&mut self, value: T) {
        if self.min.is_none_or(|min| value < min) {
            self.min = Some(value);
        }
        if self.max.is_none_or(|max| value > max) {
            self.max = Some(value);
        }
    }
}

/// Builds a [`QaReport`] from records fed in file order
///
/// Every record counts toward the epoch totals and the sampling interval.
/// Value ranges, gaps, motion, and quality counts use unflagged records only,
/// pairing each with the unflagged record before it.
#[derive(Debug)]
pub struct QualityAssessor {
    qa: QualityAssessmentConfig,
    max_speed_mps: f64,
    max_accel_mps2: f64,
    max_gap_secs: f64,

    first: Option<Timestamp>,
    last: Option<Timestamp>,
    previous_epoch: Option<f64>,
    /// Positive inter-epoch intervals in milliseconds, with occurrence counts
    interval_counts: HashMap<i64, usize>,
    actual: usize,
    flagged: usize,

    previous_unflagged: Option<f64>,
    previous_position: Option<(f64, GeoPoint)>,
    previous_speed: Option<f64>,

    satellites: Extent<u32>,
    hdop: Extent<f64>,
    altitude: Extent<f64>,
    speed: Extent<f64>,
    acceleration: Extent<f64>,
    longitude: Extent<f64>,
    latitude: Extent<f64>,
    first_position: Option<GeoPoint>,
    last_position: Option<GeoPoint>,

    longest_gap: Option<f64>,
    long_gaps: usize,
    out_of_sequence: usize,
    quality_seen: bool,
    bad_quality: usize,
    speed_violations: usize,
    accel_violations: usize,
}

impl QualityAssessor {
    /// Create an assessor; violation thresholds come from the QC settings
    pub fn new(qa: QualityAssessmentConfig, qc: &QualityControlConfig) -> Self {
        Self {
            qa,
            max_speed_mps: qc.max_speed_mps,
            max_accel_mps2: qc.max_accel_mps2,
            max_gap_secs: qc.max_gap_secs,
            first: None,
            last: None,
            previous_epoch: None,
            interval_counts: HashMap::new(),
            actual: 0,
            flagged: 0,
            previous_unflagged: None,
            previous_position: None,
            previous_speed: None,
            satellites: Extent::default(),
            hdop: Extent::default(),
            altitude: Extent::default(),
            speed: Extent::default(),
            acceleration: Extent::default(),
            longitude: Extent::default(),
            latitude: Extent::default(),
            first_position: None,
            last_position: None,
            longest_gap: None,
            long_gaps: 0,
            out_of_sequence: 0,
            quality_seen: false,
            bad_quality: 0,
            speed_violations: 0,
            accel_violations: 0,
        }
    }

    /// Assess a whole record stream
    pub fn assess<I>(mut self, records: I) -> Result<QaReport>
    where
        I: IntoIterator<Item = Result<QcRecord>>,
    {
        for record in records {
            self.push(&record?);
        }
        Ok(self.finish())
    }

    /// Accumulate one record
    pub fn push(&mut self, record: &QcRecord) {
        let timestamp = record.fix.timestamp();
        let epoch = record.epoch_seconds();

        self.actual += 1;
        self.first.get_or_insert(timestamp);
        self.last = Some(timestamp);

        if let Some(previous) = self.previous_epoch {
            let millis = ((epoch - previous) * 1000.0).round() as i64;
            if millis > 0 {
                *self.interval_counts.entry(millis).or_insert(0) += 1;
            }
        }
        self.previous_epoch = Some(epoch);

        if record.flagged {
            self.flagged += 1;
            return;
        }
        self.push_unflagged(record, epoch);
    }

    fn push_unflagged(&mut self, record: &QcRecord, epoch: f64) {
        let fix = &record.fix.fix;

        if let Some(satellites) = fix.satellites {
            self.satellites.include(satellites);
        }
        if let Some(hdop) = fix.hdop {
            self.hdop.include(hdop.value());
        }
        if let Some(altitude) = fix.altitude {
            self.altitude.include(altitude.value());
        }
        if fix.quality.is_some() {
            self.quality_seen = true;
        }
        if has_bad_quality(fix) {
            self.bad_quality += 1;
        }

        if let Some(previous) = self.previous_unflagged {
            let interval = epoch - previous;
            if interval < 0.0 {
                self.out_of_sequence += 1;
            } else {
                if self.longest_gap.is_none_or(|longest| interval > longest) {
                    self.longest_gap = Some(interval);
                }
                if interval > self.max_gap_secs {
                    self.long_gaps += 1;
                }
            }
        }
        self.previous_unflagged = Some(epoch);

        let Some(position) = record.position().filter(GeoPoint::is_valid) else {
            return;
        };
        self.longitude.include(position.longitude);
        self.latitude.include(position.latitude);
        self.first_position.get_or_insert(position);
        self.last_position = Some(position);

        if let Some((previous, from)) = self.previous_position {
            let interval = epoch - previous;
            if interval > 0.0 {
                self.measure_motion(&from, &position, interval);
            }
        }
        self.previous_position = Some((epoch, position));
    }

    fn measure_motion(&mut self, from: &GeoPoint, to: &GeoPoint, interval: f64) {
        let speed = haversine_distance(from, to) / interval;
        self.speed.include(speed);
        if speed > self.max_speed_mps {
            self.speed_violations += 1;
        }

        if let Some(previous_speed) = self.previous_speed {
            let acceleration = (speed - previous_speed) / interval;
            self.acceleration.include(acceleration);
            if acceleration.abs() > self.max_accel_mps2 {
                self.accel_violations += 1;
            }
        }
        self.previous_speed = Some(speed);
    }

    /// Nominal sampling interval in seconds
    ///
    /// The configured value wins. Otherwise the most frequent positive
    /// interval, the shorter one on a tie, or one second for a file with
    /// fewer than two distinct epochs.
    pub fn epoch_interval(&self) -> f64 {
        if let Some(interval) = self.qa.epoch_interval_secs {
            return interval;
        }
        self.interval_counts
            .iter()
            .max_by(|(a_ms, a_n), (b_ms, b_n)| a_n.cmp(b_n).then(b_ms.cmp(a_ms)))
            .map(|(ms, _)| *ms as f64 / 1000.0)
            .unwrap_or(FALLBACK_EPOCH_INTERVAL_SECS)
    }

    /// Epochs the first-to-last span could hold at the nominal interval
    pub fn possible_epochs(&self) -> usize {
        match (self.first, self.last) {
            (Some(first), Some(last)) => {
                let span = last.epoch_seconds() - first.epoch_seconds();
                (1.0 + span / self.epoch_interval()).floor().max(0.0) as usize
            }
            _ => 0,
        }
    }

    /// Produce the report
    pub fn finish(self) -> QaReport {
        let interval = self.epoch_interval();
        let possible = self.possible_epochs();
        let completeness =
            (possible > 0).then(|| round_to(100.0 * self.actual as f64 / possible as f64, 2));

        debug!(
            "Assessed {} records: interval {} s, {} possible epochs",
            self.actual, interval, possible
        );

        let port_distance = |port: Option<GeoPoint>, fix: Option<GeoPoint>| {
            port.map(|port| {
                Quantity::rounded(
                    units::METERS,
                    fix.map(|fix| haversine_distance(&port, &fix)),
                    1,
                )
            })
        };

        let bounding_box = match (self.longitude, self.latitude) {
            (
                Extent { min: Some(west), max: Some(east) },
                Extent { min: Some(south), max: Some(north) },
            ) => Some(BoundingBox {
                westernmost: west,
                easternmost: east,
                southernmost: south,
                northernmost: north,
            }),
            _ => None,
        };

        QaReport {
            duration_and_range_of_values: DurationAndRange {
                first_epoch: self.first.map(|t| t.to_string()),
                last_epoch: self.last.map(|t| t.to_string()),
                epoch_interval: Quantity::rounded(units::SECONDS, Some(interval), 3),
                possible_number_of_epochs: possible,
                actual_number_of_epochs: self.actual,
                actual_countable_number_of_epochs: self.actual - self.flagged,
                absent_number_of_epochs: possible.saturating_sub(self.actual),
                flagged_number_of_epochs: self.flagged,
                maximum_number_of_satellites: self.satellites.max,
                minimum_number_of_satellites: self.satellites.min,
                maximum_hdop: self.hdop.max,
                minimum_hdop: self.hdop.min,
                maximum_altitude: Quantity::new(units::METERS, self.altitude.max),
                minimum_altitude: Quantity::new(units::METERS, self.altitude.min),
                maximum_horizontal_speed: Quantity::rounded(units::METERS_PER_SECOND, self.speed.max, 2),
                minimum_horizontal_speed: Quantity::rounded(units::METERS_PER_SECOND, self.speed.min, 2),
                maximum_horizontal_acceleration: Quantity::rounded(
                    units::METERS_PER_SECOND_SQUARED,
                    self.acceleration.max,
                    3,
                ),
                minimum_horizontal_acceleration: Quantity::rounded(
                    units::METERS_PER_SECOND_SQUARED,
                    self.acceleration.min,
                    3,
                ),
                distance_from_port_start: port_distance(self.qa.departure_port, self.first_position),
                distance_from_port_end: port_distance(self.qa.arrival_port, self.last_position),
                bounding_box,
            },
            quality_assessment: QualityAssessment {
                longest_epoch_gap: Quantity::rounded(units::SECONDS, self.longest_gap, 3),
                number_of_gaps_longer_than_threshold: self.long_gaps,
                number_of_epochs_out_of_sequence: self.out_of_sequence,
                number_of_epochs_with_bad_gps_quality_indicator: self
                    .quality_seen
                    .then_some(self.bad_quality),
                number_of_horizontal_speeds_exceeding_threshold: self.speed_violations,
                number_of_horizontal_accelerations_exceeding_threshold: self.accel_violations,
                percent_completeness: completeness,
            },
        }
    }
}
