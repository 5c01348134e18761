//! Tests for temporal disambiguation

pub mod buffer_tests;
pub mod resolver_tests;

use crate::app::models::{AnchorDate, AnchorSource, CalendarDate, CanonicalFix, TimeOfDay, UndatedFix};
use crate::app::services::format_adapters::NavEvent;

/// Fix event at `hh:mm:ss`
pub fn create_test_fix(time: &str) -> NavEvent {
    NavEvent::Fix(UndatedFix::at(TimeOfDay::parse_colon(time).unwrap()))
}

/// Anchor event at `YYYY-MM-DD` and `hh:mm:ss`
pub fn create_test_anchor(date: &str, time: &str, source: AnchorSource) -> NavEvent {
    NavEvent::Anchor(AnchorDate::new(
        CalendarDate::parse_iso(date).unwrap(),
        TimeOfDay::parse_colon(time).unwrap(),
        source,
    ))
}

/// `YYYY-MM-DD` of every dated fix
pub fn dates_of(fixes: &[CanonicalFix]) -> Vec<String> {
    fixes.iter().map(|f| f.date.to_string()).collect()
}
