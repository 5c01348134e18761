//! Forward-looking speed and course over ground

use super::flags::QcFlags;
use crate::app::services::canonical::QcRecord;
use crate::app::services::geodesy::{haversine_distance, initial_bearing};

/// Speed (m/s) and course (degrees) from one record to a later one
pub fn speed_and_course(from: &QcRecord, to: &QcRecord) -> (Option<f64>, Option<f64>) {
    let (Some(start), Some(end)) = (from.position(), to.position()) else {
        return (None, None);
    };
    let elapsed = to.epoch_seconds() - from.epoch_seconds();
    let distance = haversine_distance(&start, &end);
    let speed = if elapsed > 0.0 { distance / elapsed } else { 0.0 };
    (Some(speed), Some(initial_bearing(&start, &end)))
}

/// Holds records back until the next unflagged record is known
///
/// Each unflagged record gets the speed and course toward the next unflagged
/// record. Flagged records and the final unflagged record get none. Records
/// come out in the order they went in.
#[derive(Debug, Default)]
pub struct Augmenter {
    pending: Vec<(QcRecord, QcFlags)>,
}

impl Augmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a record; returns the records that are now complete
    pub fn push(&mut self, record: QcRecord, flags: QcFlags) -> Vec<(QcRecord, QcFlags)> {
        if record.flagged {
            if self.pending.is_empty() {
                return vec![(record, flags)];
            }
            self.pending.push((record, flags));
            return Vec::new();
        }

        let mut released = std::mem::take(&mut self.pending);
        if let Some((previous, _)) = released.first_mut() {
            let (sog, cog) = speed_and_course(previous, &record);
            previous.speed_over_ground = sog;
            previous.course_over_ground = cog;
        }
        self.pending.push((record, flags));
        released
    }

    /// Release whatever is still held at end of input
    pub fn finish(&mut self) -> Vec<(QcRecord, QcFlags)> {
        std::mem::take(&mut self.pending)
    }
}
