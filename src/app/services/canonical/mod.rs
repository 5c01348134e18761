//! Canonical tab-delimited navigation record format
//!
//! The archival output of the pipeline and the input of quality control and
//! quality assessment. One header line, then one fix per line:
//!
//! ```text
//! timestamp	longitude	latitude	gpsQuality	numSatellites	hdop	antennaAltitude
//! 2002-07-04T20:15:30Z	11.51667	48.11730	1	8	0.9	545.4
//! ```
//!
//! # Architecture
//!
//! - [`record`] - [`QcRecord`], a fix as read back with its flag marker and speed/course
//! - [`writer`] - [`CanonicalWriter`], which reproduces each value's source precision
//! - [`reader`] - [`CanonicalReader`], which parses the schema back
//!
//! # Conventions
//!
//! - Unavailable values are written as `NAN`.
//! - A record flagged by quality control starts with `#`. Any other line
//!   starting with `#` is a comment.
//! - Augmented files carry two extra columns, speed over ground (m/s, two
//!   decimals) and course over ground (degrees, three decimals).

pub mod reader;
pub mod record;
pub mod writer;

#[cfg(test)]
pub mod tests;

pub use reader::CanonicalReader;
pub use record::QcRecord;
pub use writer::{CanonicalWriter, format_fix};
