//! Tests for the dating rules

use super::*;
use crate::Error;
use crate::app::services::disambiguator::{Disambiguator, resolve_events};
use crate::constants::DEFAULT_BUFFER_CAPACITY;

fn midnight_sequence() -> Vec<NavEvent> {
    vec![
        create_test_anchor("2002-07-04", "12:00:00", AnchorSource::DeviceSentence),
        create_test_fix("23:59:58"),
        create_test_fix("23:59:59"),
        create_test_fix("00:00:00"),
        create_test_fix("00:00:01"),
    ]
}

#[test]
fn test_midnight_crossing_advances_day() {
    let (dated, stats) = resolve_events(DEFAULT_BUFFER_CAPACITY, midnight_sequence()).unwrap();

    assert_eq!(
        dates_of(&dated),
        vec!["2002-07-04", "2002-07-04", "2002-07-05", "2002-07-05"]
    );
    assert_eq!(stats.day_rollovers, 1);
    assert_eq!(stats.fixes_emitted, 4);
}

#[test]
fn test_capacity_does_not_change_dates() {
    let mut events = midnight_sequence();
    events.push(create_test_anchor("2002-07-05", "00:00:02", AnchorSource::DeviceSentence));
    events.push(create_test_fix("00:00:02"));
    events.push(create_test_fix("23:59:59"));
    events.push(create_test_fix("00:00:03"));

    let (reference, _) = resolve_events(DEFAULT_BUFFER_CAPACITY, events.clone()).unwrap();
    for capacity in [1, 2, 3] {
        let (dated, _) = resolve_events(capacity, events.clone()).unwrap();
        assert_eq!(dated, reference, "capacity {}", capacity);
    }
}

#[test]
fn test_small_backward_step_is_jitter() {
    let events = vec![
        create_test_anchor("2010-01-01", "00:00:00", AnchorSource::DeviceSentence),
        create_test_fix("00:00:05"),
        create_test_fix("00:00:02"),
    ];

    let (dated, stats) = resolve_events(100, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2010-01-01", "2010-01-01"]);
    assert_eq!(stats.day_rollovers, 0);
}

#[test]
fn test_backward_step_over_half_day_is_rollover() {
    let events = vec![
        create_test_anchor("2010-01-01", "00:00:00", AnchorSource::DeviceSentence),
        create_test_fix("13:00:00"),
        create_test_fix("00:59:59"),
    ];

    let (dated, _) = resolve_events(100, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2010-01-01", "2010-01-02"]);
}

#[test]
fn test_device_anchor_after_fix_time_means_next_day() {
    let events = vec![
        create_test_anchor("2010-12-31", "23:59:59", AnchorSource::DeviceSentence),
        create_test_fix("00:00:01"),
    ];

    let (dated, _) = resolve_events(100, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2011-01-01"]);
}

#[test]
fn test_logger_clock_picks_nearest_day() {
    let events = vec![
        // Logger already past midnight, receiver still before it
        create_test_anchor("2010-01-02", "00:00:01", AnchorSource::LoggerClock),
        create_test_fix("23:59:59"),
        // Logger still before midnight, receiver already past it
        create_test_anchor("2010-01-02", "23:59:58", AnchorSource::LoggerClock),
        create_test_fix("00:00:02"),
        // Clocks agree
        create_test_anchor("2010-01-03", "00:10:00", AnchorSource::LoggerClock),
        create_test_fix("00:09:59"),
    ];

    let (dated, _) = resolve_events(100, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2010-01-01", "2010-01-03", "2010-01-03"]);
}

#[test]
fn test_continuity_dates_fixes_after_consumed_anchor() {
    let events = vec![
        create_test_anchor("2010-01-01", "22:00:00", AnchorSource::DeviceSentence),
        create_test_fix("23:59:59"),
        create_test_fix("00:00:00"),
        create_test_fix("00:00:01"),
    ];

    // Capacity 1 flushes each fix alone; only the first may use the anchor.
    let (dated, _) = resolve_events(1, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2010-01-01", "2010-01-02", "2010-01-02"]);
}

#[test]
fn test_device_anchor_just_ahead_of_fix_keeps_continuity_date() {
    let events = vec![
        create_test_anchor("2010-03-10", "11:59:58", AnchorSource::DeviceSentence),
        create_test_fix("11:59:59"),
        // ZDA stamped a second ahead of the GGA that follows it
        create_test_anchor("2010-03-10", "12:00:01", AnchorSource::DeviceSentence),
        create_test_fix("12:00:00"),
    ];

    let (dated, stats) = resolve_events(100, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2010-03-10", "2010-03-10"]);
    assert_eq!(stats.day_rollovers, 0);
}

#[test]
fn test_device_anchor_ahead_across_midnight() {
    let events = vec![
        create_test_anchor("2010-03-10", "23:59:58", AnchorSource::DeviceSentence),
        create_test_fix("23:59:59"),
        create_test_anchor("2010-03-11", "00:00:01", AnchorSource::DeviceSentence),
        create_test_fix("00:00:00"),
    ];

    let (dated, stats) = resolve_events(100, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2010-03-10", "2010-03-11"]);
    assert_eq!(stats.day_rollovers, 1);
}

#[test]
fn test_anchor_days_away_from_continuity_re_anchors() {
    let events = vec![
        create_test_anchor("2010-03-10", "08:00:00", AnchorSource::DeviceSentence),
        create_test_fix("08:00:00"),
        // Logging resumed three days later
        create_test_anchor("2010-03-13", "09:00:00", AnchorSource::DeviceSentence),
        create_test_fix("09:00:00"),
        create_test_fix("09:00:01"),
    ];

    let (dated, _) = resolve_events(100, events).unwrap();

    assert_eq!(dates_of(&dated), vec!["2010-03-10", "2010-03-13", "2010-03-13"]);
}

#[test]
fn test_first_anchor_dates_earlier_fixes_backward() {
    let events = vec![
        create_test_fix("23:59:58"),
        create_test_fix("23:59:59"),
        create_test_fix("00:00:00"),
        create_test_anchor("2002-07-05", "00:00:00", AnchorSource::DeviceSentence),
        create_test_fix("00:00:01"),
    ];

    let (dated, stats) = resolve_events(100, events).unwrap();

    assert_eq!(
        dates_of(&dated),
        vec!["2002-07-04", "2002-07-04", "2002-07-05", "2002-07-05"]
    );
    assert_eq!(stats.retroactive_flushes, 1);
}

#[test]
fn test_missing_anchor_at_end_of_input() {
    let events = vec![create_test_fix("10:00:00"), create_test_fix("10:00:01")];

    let result = resolve_events(100, events);

    match result {
        Err(error) => {
            assert!(matches!(error, Error::MissingAnchor { .. }));
            assert!(error.is_missing_anchor());
        }
        Ok(_) => panic!("expected missing anchor"),
    }
}

#[test]
fn test_buffer_overflow_without_anchor() {
    let mut disambiguator = Disambiguator::new(2);
    disambiguator.push_event(create_test_fix("10:00:00")).unwrap();

    let result = disambiguator.push_event(create_test_fix("10:00:01"));

    match result {
        Err(Error::BufferOverflowWithoutAnchor { capacity }) => assert_eq!(capacity, 2),
        other => panic!("expected overflow, got {:?}", other),
    }
}

#[test]
fn test_no_fixes_is_not_an_error() {
    let (dated, stats) = resolve_events(100, Vec::new()).unwrap();

    assert!(dated.is_empty());
    assert_eq!(stats.total_flushes(), 0);
}

#[test]
fn test_fix_fields_survive_dating() {
    let mut disambiguator = Disambiguator::new(100);
    disambiguator
        .push_event(create_test_anchor("2002-07-04", "12:00:00", AnchorSource::RecordDate))
        .unwrap();
    let mut fix = UndatedFix::at(TimeOfDay::parse_colon("12:00:00.25").unwrap());
    fix.satellites = Some(9);
    disambiguator.push_fix(fix.clone()).unwrap();

    let dated = disambiguator.finish().unwrap();

    assert_eq!(dated[0].fix, fix);
    assert_eq!(dated[0].timestamp().to_string(), "2002-07-04T12:00:00.25Z");
    assert_eq!(disambiguator.stats().pending(), 0);
}
