//! Tests for NMEA streams dated by receiver sentences

use super::*;
use crate::app::models::AnchorSource;
use crate::app::services::sentence_decoder::tests::{REFERENCE_GGA, REFERENCE_RMC, REFERENCE_ZDA};

#[test]
fn test_nmea_zda_emits_anchor_and_fix_in_order() {
    let (events, stats) = decode_lines(RawFormat::NmeaZda, &[REFERENCE_ZDA, REFERENCE_GGA]);

    assert_eq!(events.len(), 2);
    let NavEvent::Anchor(anchor) = &events[0] else {
        panic!("expected anchor first");
    };
    assert_eq!(anchor.date().to_string(), "2002-07-04");
    assert_eq!(anchor.time().to_string(), "20:15:30.00");
    assert_eq!(anchor.source, AnchorSource::DeviceSentence);

    let NavEvent::Fix(fix) = &events[1] else {
        panic!("expected fix second");
    };
    assert_eq!(fix.time.to_string(), "12:35:19");
    assert_eq!(fix.latitude.unwrap().to_string(), "48.11730");
    assert_eq!(fix.longitude.unwrap().to_string(), "11.51667");
    assert_eq!(fix.quality, Some(1));
    assert_eq!(fix.satellites, Some(8));
    assert_eq!(stats.rejected(), 0);
}

#[test]
fn test_nmea_zda_suppresses_repeated_fix_time() {
    let (events, stats) = decode_lines(RawFormat::NmeaZda, &[REFERENCE_GGA, REFERENCE_GGA]);

    assert_eq!(fixes(&events).len(), 1);
    assert_eq!(stats.duplicates_suppressed, 1);
}

#[test]
fn test_nmea_zda_drops_bad_checksum_and_continues() {
    let corrupted = REFERENCE_GGA.replace("*47", "*48");
    let next = create_test_sentence("GPGGA,123520,4807.040,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,");

    let (events, stats) = decode_lines(RawFormat::NmeaZda, &[&corrupted, &next]);

    assert_eq!(fixes(&events).len(), 1);
    assert_eq!(fixes(&events)[0].time.to_string(), "12:35:20");
    assert_eq!(stats.checksum_failures, 1);
    assert_eq!(stats.errors.len(), 1);
}

#[test]
fn test_nmea_zda_ignores_other_sentences_and_noise() {
    let vtg = "$GPVTG,054.7,T,034.4,M,005.5,N,010.2,K*48";
    let (events, stats) = decode_lines(RawFormat::NmeaZda, &[vtg, "logger started"]);

    assert!(events.is_empty());
    assert_eq!(stats.lines_ignored, 2);
}

#[test]
fn test_nmea_zda_carries_hemisphere_forward() {
    let south = create_test_sentence("GPGGA,000001,3000.000,S,01500.000,W,1,08,0.9,1.0,M,,M,,");
    let blank = create_test_sentence("GPGGA,000002,3000.000,,01500.000,,1,08,0.9,1.0,M,,M,,");

    let (events, _) = decode_lines(RawFormat::NmeaZda, &[&south, &blank]);
    let fixes = fixes(&events);

    assert_eq!(fixes[1].latitude.unwrap().to_string(), "-30.00000");
    assert_eq!(fixes[1].longitude.unwrap().to_string(), "-15.00000");
}

#[test]
fn test_gps_prefixed_splits_joined_sentences() {
    let line = format!("GPS,{},{}", REFERENCE_GGA, REFERENCE_ZDA);
    let (events, stats) = decode_lines(RawFormat::GpsPrefixed, &[&line]);

    assert_eq!(fixes(&events).len(), 1);
    assert_eq!(anchors(&events).len(), 1);
    assert!(matches!(events[0], NavEvent::Fix(_)));
    assert_eq!(stats.rejected(), 0);
}

#[test]
fn test_gps_prefixed_accepts_rmc_anchor() {
    let line = format!("GPS {}", REFERENCE_RMC);
    let (events, _) = decode_lines(RawFormat::GpsPrefixed, &[&line]);

    let anchors = anchors(&events);
    assert_eq!(anchors.len(), 1);
    assert_eq!(anchors[0].date().to_string(), "1994-03-23");
}

#[test]
fn test_gps_prefixed_ignores_lines_without_prefix() {
    let (events, stats) = decode_lines(RawFormat::GpsPrefixed, &[REFERENCE_GGA]);

    assert!(events.is_empty());
    assert_eq!(stats.lines_ignored, 1);
}

#[test]
fn test_rmc_only_yields_anchor_then_fix() {
    let (events, _) = decode_lines(RawFormat::RmcOnly, &[REFERENCE_RMC]);

    assert_eq!(events.len(), 2);
    let NavEvent::Anchor(anchor) = &events[0] else {
        panic!("expected anchor first");
    };
    assert_eq!(anchor.date().to_string(), "1994-03-23");
    assert_eq!(anchor.source, AnchorSource::DeviceSentence);

    let NavEvent::Fix(fix) = &events[1] else {
        panic!("expected fix second");
    };
    assert_eq!(fix.quality, Some(1));
    assert_eq!(fix.satellites, None);
    assert_eq!(fix.hdop, None);
    assert_eq!(fix.altitude, None);
}
