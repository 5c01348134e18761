//! Quality control of canonical navigation records
//!
//! Each record is compared with the last record trusted as a reference:
//! elapsed time, great-circle distance, speed, and the change in speed. A
//! record that breaks a threshold, reports a poor device solution, or has no
//! usable position is flagged.
//!
//! # Architecture
//!
//! - [`engine`] - [`QualityControlEngine`], the pairwise checks and the stream driver
//! - [`flags`] - [`QcFlag`] and the per-record [`QcFlags`] set
//! - [`augment`] - Forward-looking speed and course over ground
//! - [`stats`] - Per-flag totals
//!
//! # Reference Rule
//!
//! A flagged record only stops being a reference when the flag says the
//! record itself is suspect. A long gap before an otherwise good record
//! leaves that record trusted.
//!
//! # Modes
//!
//! In annotate mode (the default) flagged records are written with a `#`
//! prefix. In strict mode they are left out. Both modes count every flag and
//! write the flag log.

pub mod augment;
pub mod engine;
pub mod flags;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use augment::{Augmenter, speed_and_course};
pub use engine::{Evaluation, QualityControlEngine, has_bad_quality};
pub use flags::{QcFlag, QcFlags};
pub use stats::QcStats;
