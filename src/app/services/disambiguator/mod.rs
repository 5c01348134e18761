//! Temporal disambiguation of time-of-day-only fixes
//!
//! Most shipboard receivers stamp a fix with the time of day only. This
//! module assigns each fix its calendar date from the anchors (trusted
//! absolute timestamps) interleaved with the fixes, and from the dates of the
//! fixes already emitted.
//!
//! # Architecture
//!
//! - [`buffer`] - Capacity-bounded holding area for fixes awaiting a date
//! - [`resolver`] - The [`Disambiguator`] state machine and its dating rules
//! - [`stats`] - Counters for fixes, anchors, flushes, and day rollovers
//!
//! # Dating Rules
//!
//! 1. The first fix of a flush is dated from the current anchor if no flush
//!    has used it yet, otherwise from the last emitted fix.
//! 2. Each later fix keeps its predecessor's date unless the time of day
//!    jumped backward by more than half a day, which is a midnight rollover.
//! 3. An anchor that arrives before any reference dates the waiting fixes
//!    backward from itself.
//!
//! The buffer only bounds memory: for any capacity of at least one anchor
//! interval, the dates produced are the same.
//!
//! # Example Usage
//!
//! ```rust
//! use nav_processor::app::models::{AnchorDate, AnchorSource, CalendarDate, TimeOfDay, UndatedFix};
//! use nav_processor::app::services::disambiguator::Disambiguator;
//!
//! let mut disambiguator = Disambiguator::new(16);
//! let day = CalendarDate::from_ymd(2002, 7, 4).unwrap();
//! let noon = TimeOfDay::from_hms(12, 0, 0).unwrap();
//! disambiguator
//!     .push_anchor(AnchorDate::new(day, noon, AnchorSource::DeviceSentence))
//!     .unwrap();
//!
//! disambiguator.push_fix(UndatedFix::at(TimeOfDay::from_hms(23, 59, 59).unwrap())).unwrap();
//! disambiguator.push_fix(UndatedFix::at(TimeOfDay::from_hms(0, 0, 0).unwrap())).unwrap();
//! let dated = disambiguator.finish().unwrap();
//!
//! assert_eq!(dated[0].timestamp().to_string(), "2002-07-04T23:59:59Z");
//! assert_eq!(dated[1].timestamp().to_string(), "2002-07-05T00:00:00Z");
//! ```

pub mod buffer;
pub mod resolver;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use buffer::Buffer;
pub use resolver::Disambiguator;
pub use stats::{DisambiguationStats, FlushCause};

use crate::Result;
use crate::app::models::CanonicalFix;
use crate::app::services::format_adapters::NavEvent;

/// Date a complete event sequence in one call
pub fn resolve_events<I>(capacity: usize, events: I) -> Result<(Vec<CanonicalFix>, DisambiguationStats)>
where
    I: IntoIterator<Item = NavEvent>,
{
    let mut disambiguator = Disambiguator::new(capacity);
    let mut dated = Vec::new();
    for event in events {
        dated.extend(disambiguator.push_event(event)?);
    }
    dated.extend(disambiguator.finish()?);
    Ok((dated, disambiguator.into_stats()))
}
