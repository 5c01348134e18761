//! A canonical record as read back from disk

use crate::app::models::{CanonicalFix, GeoPoint};

/// One canonical record plus what quality control attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct QcRecord {
    pub fix: CanonicalFix,
    /// Written with a leading `#`
    pub flagged: bool,
    /// Speed over ground in m/s
    pub speed_over_ground: Option<f64>,
    /// Course over ground in degrees clockwise from north
    pub course_over_ground: Option<f64>,
}

impl QcRecord {
    /// An unflagged record with no speed/course
    pub fn new(fix: CanonicalFix) -> Self {
        Self {
            fix,
            flagged: false,
            speed_over_ground: None,
            course_over_ground: None,
        }
    }

    pub fn with_flagged(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }

    pub fn with_speed_course(mut self, sog: Option<f64>, cog: Option<f64>) -> Self {
        self.speed_over_ground = sog;
        self.course_over_ground = cog;
        self
    }

    pub fn epoch_seconds(&self) -> f64 {
        self.fix.epoch_seconds()
    }

    pub fn position(&self) -> Option<GeoPoint> {
        self.fix.position()
    }
}

impl From<CanonicalFix> for QcRecord {
    fn from(fix: CanonicalFix) -> Self {
        Self::new(fix)
    }
}
