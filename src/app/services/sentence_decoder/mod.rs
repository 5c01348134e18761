//! NMEA-0183 sentence decoding
//!
//! Stateless decoders for the sentence kinds found in shipboard GPS logs.
//!
//! ## Architecture
//!
//! - [`framing`] - Locates the message on a line, splits fields, validates the XOR checksum
//! - [`field_parsers`] - Coordinates, times, dates, and optional numeric fields
//! - [`decoders`] - GGA, ZDA, RMC, GLL, and VTG typed decoders
//!
//! ## Checksum Policy
//!
//! A sentence whose supplied checksum does not match is rejected with
//! [`crate::Error::ChecksumMismatch`]. A sentence with no checksum at all is
//! accepted, since older receivers never wrote one. A mismatch is
//! recoverable: the caller drops the sentence and moves on.
//!
//! ## Example
//!
//! ```rust
//! use nav_processor::app::services::sentence_decoder::{decode, DecodedSentence};
//!
//! let line = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47";
//! match decode(line).unwrap() {
//!     DecodedSentence::PositionFix(gga) => assert_eq!(gga.satellites, Some(8)),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod decoders;
pub mod field_parsers;
pub mod framing;

#[cfg(test)]
pub mod tests;

pub use decoders::{
    DateTimeStamp, DecodedSentence, FixStatus, PartialPosition, PositionFix, RecommendedMinimum,
    VelocityCourse, decode, decode_gga, decode_gll, decode_rmc, decode_sentence, decode_vtg,
    decode_zda,
};
pub use field_parsers::{Hemisphere, RawCoordinate, apply_hemisphere, degrees_minutes};
pub use framing::{ChecksumStatus, RawSentence, SentenceKind, checksum};
