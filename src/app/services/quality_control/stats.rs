//! Quality control statistics

use super::flags::{QcFlag, QcFlags};
use serde::Serialize;

/// Totals for one quality control run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QcStats {
    pub records_read: usize,
    pub records_written: usize,
    /// Records that raised at least one flag in this run
    pub records_flagged: usize,
    /// Records that were already flagged in the input
    pub previously_flagged: usize,
    pub speed_exceeded: usize,
    pub accel_exceeded: usize,
    pub gap_exceeded: usize,
    pub out_of_sequence: usize,
    pub bad_quality: usize,
    pub invalid_position: usize,
}

impl QcStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every flag of one record
    pub fn record_flags(&mut self, flags: QcFlags) {
        if flags.is_empty() {
            return;
        }
        self.records_flagged += 1;
        for flag in flags.iter() {
            *self.counter(flag) += 1;
        }
    }

    pub fn count(&self, flag: QcFlag) -> usize {
        match flag {
            QcFlag::SpeedExceeded => self.speed_exceeded,
            QcFlag::AccelExceeded => self.accel_exceeded,
            QcFlag::GapExceeded => self.gap_exceeded,
            QcFlag::OutOfSequence => self.out_of_sequence,
            QcFlag::BadQualityIndicator => self.bad_quality,
            QcFlag::InvalidPosition => self.invalid_position,
        }
    }

    fn counter(&mut self, flag: QcFlag) -> &mut usize {
        match flag {
            QcFlag::SpeedExceeded => &mut self.speed_exceeded,
            QcFlag::AccelExceeded => &mut self.accel_exceeded,
            QcFlag::GapExceeded => &mut self.gap_exceeded,
            QcFlag::OutOfSequence => &mut self.out_of_sequence,
            QcFlag::BadQualityIndicator => &mut self.bad_quality,
            QcFlag::InvalidPosition => &mut self.invalid_position,
        }
    }

    /// Percentage of records read that passed
    pub fn pass_rate(&self) -> f64 {
        if self.records_read == 0 {
            100.0
        } else {
            let failed = self.records_flagged + self.previously_flagged;
            (self.records_read.saturating_sub(failed) as f64 / self.records_read as f64) * 100.0
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "QC read {} records, wrote {}, flagged {} ({:.1}% passed) | speed {}, accel {}, gap {}, out-of-sequence {}, quality {}, position {}",
            self.records_read,
            self.records_written,
            self.records_flagged,
            self.pass_rate(),
            self.speed_exceeded,
            self.accel_exceeded,
            self.gap_exceeded,
            self.out_of_sequence,
            self.bad_quality,
            self.invalid_position
        )
    }
}
