//! Pairwise plausibility checks over a canonical record stream

use std::io::Write;

use tracing::{debug, info};

use super::augment::Augmenter;
use super::flags::{QcFlag, QcFlags};
use super::stats::QcStats;
use crate::app::models::{GeoPoint, UndatedFix};
use crate::app::services::canonical::{CanonicalWriter, QcRecord};
use crate::app::services::geodesy::haversine_distance;
use crate::config::{QcMode, QualityControlConfig};
use crate::constants::{FIELD_DELIMITER, gps_limits};
use crate::{Error, Result};
use chrono::{DateTime, Utc};

/// The last record trusted as a reference
#[derive(Debug, Clone, Copy)]
struct Reference {
    epoch: f64,
    position: GeoPoint,
    speed: Option<f64>,
}

/// What was measured for one record against its reference
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Evaluation {
    pub flags: QcFlags,
    /// Seconds since the reference
    pub interval: Option<f64>,
    /// Metres from the reference
    pub distance: Option<f64>,
    /// m/s from the reference
    pub speed: Option<f64>,
    /// m/s^2 relative to the reference's speed
    pub acceleration: Option<f64>,
}

/// Flags implausible records in time order
#[derive(Debug)]
pub struct QualityControlEngine {
    config: QualityControlConfig,
    window: (Option<f64>, Option<f64>),
    reference: Option<Reference>,
}

fn epoch_of(moment: DateTime<Utc>) -> f64 {
    moment.timestamp() as f64 + f64::from(moment.timestamp_subsec_nanos()) / 1e9
}

impl QualityControlEngine {
    pub fn new(config: QualityControlConfig) -> Self {
        let window = (config.window_start.map(epoch_of), config.window_end.map(epoch_of));
        Self {
            config,
            window,
            reference: None,
        }
    }

    pub fn config(&self) -> &QualityControlConfig {
        &self.config
    }

    /// Evaluate the next record in stream order, updating the reference
    pub fn evaluate(&mut self, record: &QcRecord) -> Evaluation {
        let mut evaluation = Evaluation::default();
        let epoch = record.epoch_seconds();

        if self.outside_window(epoch) {
            evaluation.flags.insert(QcFlag::OutOfSequence);
        }

        let position = record.position().filter(GeoPoint::is_valid);
        if position.is_none() || is_null_island_at_midnight(record) {
            evaluation.flags.insert(QcFlag::InvalidPosition);
        }

        if has_bad_quality(&record.fix.fix) {
            evaluation.flags.insert(QcFlag::BadQualityIndicator);
        }

        if let Some(reference) = self.reference {
            let interval = epoch - reference.epoch;
            evaluation.interval = Some(interval);

            if interval < 0.0 {
                evaluation.flags.insert(QcFlag::OutOfSequence);
            } else {
                if interval > self.config.max_gap_secs {
                    evaluation.flags.insert(QcFlag::GapExceeded);
                }
                if let Some(here) = position.filter(|_| interval > 0.0) {
                    self.measure_motion(&reference, &here, interval, &mut evaluation);
                }
            }
        }

        if !evaluation.flags.is_disqualifying() {
            if let Some(position) = position {
                self.reference = Some(Reference {
                    epoch,
                    position,
                    speed: evaluation.speed,
                });
            }
        }
        evaluation
    }

    fn measure_motion(
        &self,
        reference: &Reference,
        here: &GeoPoint,
        interval: f64,
        evaluation: &mut Evaluation,
    ) {
        let distance = haversine_distance(&reference.position, here);
        let speed = distance / interval;
        evaluation.distance = Some(distance);
        evaluation.speed = Some(speed);

        if speed > self.config.max_speed_mps {
            evaluation.flags.insert(QcFlag::SpeedExceeded);
        }

        if let Some(previous_speed) = reference.speed {
            let acceleration = (speed - previous_speed) / interval;
            evaluation.acceleration = Some(acceleration);
            if acceleration.abs() > self.config.max_accel_mps2 {
                evaluation.flags.insert(QcFlag::AccelExceeded);
            }
        }
    }

    fn outside_window(&self, epoch: f64) -> bool {
        let (start, end) = self.window;
        start.is_some_and(|s| epoch < s) || end.is_some_and(|e| epoch > e)
    }

    /// Run quality control over a record stream
    ///
    /// Records already flagged in the input pass through flagged and are not
    /// used as references. `flag_log`, when given, receives one line per
    /// record flagged in this run.
    pub fn process<I, W>(
        &mut self,
        records: I,
        output: &mut CanonicalWriter<W>,
        mut flag_log: Option<&mut dyn Write>,
    ) -> Result<QcStats>
    where
        I: IntoIterator<Item = Result<QcRecord>>,
        W: Write,
    {
        let mut stats = QcStats::new();
        let mut augmenter = Augmenter::new();

        for record in records {
            let mut record = record?;
            stats.records_read += 1;

            let flags = if record.flagged {
                stats.previously_flagged += 1;
                QcFlags::empty()
            } else {
                let flags = self.evaluate(&record).flags;
                if !flags.is_empty() {
                    record.flagged = true;
                    debug!("Flagged {}: {}", record.fix.timestamp(), flags);
                }
                stats.record_flags(flags);
                flags
            };
            record.speed_over_ground = None;
            record.course_over_ground = None;

            let ready = if self.config.augment {
                augmenter.push(record, flags)
            } else {
                vec![(record, flags)]
            };
            self.emit(ready, output, &mut flag_log, &mut stats)?;
        }

        let remaining = augmenter.finish();
        self.emit(remaining, output, &mut flag_log, &mut stats)?;

        info!("{}", stats.summary());
        Ok(stats)
    }

    fn emit<W: Write>(
        &self,
        ready: Vec<(QcRecord, QcFlags)>,
        output: &mut CanonicalWriter<W>,
        flag_log: &mut Option<&mut dyn Write>,
        stats: &mut QcStats,
    ) -> Result<()> {
        for (record, flags) in ready {
            if !flags.is_empty() {
                if let Some(log) = flag_log.as_deref_mut() {
                    writeln!(log, "{}{}{}", record.fix.timestamp(), FIELD_DELIMITER, flags)
                        .map_err(|e| Error::io("Failed to write flag log", e))?;
                }
            }

            if record.flagged && self.config.mode == QcMode::Strict {
                continue;
            }
            output.write_record(&record)?;
            stats.records_written += 1;
        }
        Ok(())
    }
}

/// The all-zero junk fix some receivers emit at 00:00:00 before locking on
fn is_null_island_at_midnight(record: &QcRecord) -> bool {
    let fix = &record.fix.fix;
    fix.time.nanos_of_day() == 0
        && fix.longitude.is_some_and(|m| m.value() == 0.0)
        && fix.latitude.is_some_and(|m| m.value() == 0.0)
}

/// Device-reported solution quality outside plausible limits
pub fn has_bad_quality(fix: &UndatedFix) -> bool {
    if let Some(quality) = fix.quality {
        if !(gps_limits::MIN_QUALITY..=gps_limits::MAX_QUALITY).contains(&quality) {
            return true;
        }
    }

    if let (Some(satellites), Some(hdop)) = (fix.satellites, fix.hdop) {
        if !(gps_limits::MIN_SATELLITES..=gps_limits::MAX_SATELLITES).contains(&satellites) {
            return true;
        }
        if hdop.value() == 0.0 || hdop.value() > gps_limits::MAX_HDOP {
            return true;
        }
        if fix
            .altitude
            .is_some_and(|alt| alt.value().abs() >= gps_limits::MAX_ABS_ALTITUDE_M)
        {
            return true;
        }
    }
    false
}
