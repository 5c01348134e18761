//! Quality control flags

use serde::Serialize;
use std::fmt;

/// One reason a record failed quality control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QcFlag {
    SpeedExceeded,
    AccelExceeded,
    GapExceeded,
    OutOfSequence,
    BadQualityIndicator,
    InvalidPosition,
}

impl QcFlag {
    pub const ALL: [QcFlag; 6] = [
        QcFlag::SpeedExceeded,
        QcFlag::AccelExceeded,
        QcFlag::GapExceeded,
        QcFlag::OutOfSequence,
        QcFlag::BadQualityIndicator,
        QcFlag::InvalidPosition,
    ];

    fn bit(self) -> u8 {
        match self {
            QcFlag::SpeedExceeded => 1 << 0,
            QcFlag::AccelExceeded => 1 << 1,
            QcFlag::GapExceeded => 1 << 2,
            QcFlag::OutOfSequence => 1 << 3,
            QcFlag::BadQualityIndicator => 1 << 4,
            QcFlag::InvalidPosition => 1 << 5,
        }
    }

    /// Whether a record carrying this flag may still serve as the reference
    /// for the next record. Only a long gap leaves the record itself trusted.
    pub fn disqualifies_reference(self) -> bool {
        !matches!(self, QcFlag::GapExceeded)
    }

    pub fn name(self) -> &'static str {
        match self {
            QcFlag::SpeedExceeded => "SpeedExceeded",
            QcFlag::AccelExceeded => "AccelExceeded",
            QcFlag::GapExceeded => "GapExceeded",
            QcFlag::OutOfSequence => "OutOfSequence",
            QcFlag::BadQualityIndicator => "BadQualityIndicator",
            QcFlag::InvalidPosition => "InvalidPosition",
        }
    }
}

impl fmt::Display for QcFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of flags raised for one record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct QcFlags(u8);

impl QcFlags {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, flag: QcFlag) {
        self.0 |= flag.bit();
    }

    pub fn contains(&self, flag: QcFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when any raised flag keeps this record from being a reference
    pub fn is_disqualifying(&self) -> bool {
        self.iter().any(QcFlag::disqualifies_reference)
    }

    /// Raised flags in declaration order
    pub fn iter(&self) -> impl Iterator<Item = QcFlag> + '_ {
        QcFlag::ALL.into_iter().filter(|flag| self.contains(*flag))
    }
}

impl FromIterator<QcFlag> for QcFlags {
    fn from_iter<I: IntoIterator<Item = QcFlag>>(iter: I) -> Self {
        let mut flags = Self::empty();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl fmt::Display for QcFlags {
    /// Comma-separated flag names, as written to the flag log
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(QcFlag::name).collect();
        f.write_str(&names.join(","))
    }
}
