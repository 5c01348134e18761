//! Adapters for NMEA streams dated by the receiver's own date sentences
//!
//! These logs hold GGA (or RMC) fixes with only a time of day. The date
//! arrives separately and periodically, in a ZDA or RMC sentence, so every
//! fix is left for the disambiguator to date.

use super::common::{
    DuplicateFilter, HemisphereMemory, LineLocation, decode_or_skip, fix_from_gga, fix_from_rmc,
    sentence_part,
};
use super::stats::AdapterStats;
use super::{FormatAdapter, NavEvent, RawFormat};
use crate::Result;
use crate::app::models::{AnchorDate, AnchorSource};
use crate::app::services::sentence_decoder::DecodedSentence;

/// Turn a decoded sentence into events for GGA + ZDA/RMC streams
fn device_events(
    sentence: DecodedSentence,
    accept_rmc_anchor: bool,
    hemispheres: &mut HemisphereMemory,
    duplicates: &mut DuplicateFilter,
    stats: &mut AdapterStats,
) -> Option<NavEvent> {
    match sentence {
        DecodedSentence::PositionFix(gga) => {
            if duplicates.is_repeat(gga.time, stats) {
                None
            } else {
                Some(NavEvent::Fix(fix_from_gga(&gga, hemispheres)))
            }
        }
        DecodedSentence::DateTimeStamp(zda) => Some(NavEvent::Anchor(AnchorDate::new(
            zda.date,
            zda.time,
            AnchorSource::DeviceSentence,
        ))),
        DecodedSentence::RecommendedMinimum(rmc) if accept_rmc_anchor => Some(NavEvent::Anchor(
            AnchorDate::new(rmc.date, rmc.time, AnchorSource::DeviceSentence),
        )),
        _ => {
            stats.lines_ignored += 1;
            None
        }
    }
}

/// Bare NMEA stream: GGA fixes, ZDA anchors (`nav1`)
#[derive(Debug, Default)]
pub struct NmeaZdaAdapter {
    hemispheres: HemisphereMemory,
    duplicates: DuplicateFilter,
}

impl NmeaZdaAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatAdapter for NmeaZdaAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::NmeaZda
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        let Some(text) = sentence_part(line) else {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        };

        let Some(sentence) = decode_or_skip(text, location, stats)? else {
            return Ok(Vec::new());
        };

        Ok(device_events(
            sentence,
            false,
            &mut self.hemispheres,
            &mut self.duplicates,
            stats,
        )
        .into_iter()
        .collect())
    }
}

/// `GPS` lines carrying several sentences joined by `,$` (`nav4`)
///
/// Dated by ZDA sentences, or by RMC when the receiver emits no ZDA.
#[derive(Debug, Default)]
pub struct GpsPrefixedAdapter {
    hemispheres: HemisphereMemory,
    duplicates: DuplicateFilter,
}

impl GpsPrefixedAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatAdapter for GpsPrefixedAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::GpsPrefixed
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        let payload = match (line.starts_with("GPS"), sentence_part(line)) {
            (true, Some(payload)) => payload,
            _ => {
                stats.lines_ignored += 1;
                return Ok(Vec::new());
            }
        };

        let mut events = Vec::new();
        for (index, piece) in payload.split(",$").enumerate() {
            let text = if index == 0 {
                piece.to_string()
            } else {
                format!("${}", piece)
            };

            if let Some(sentence) = decode_or_skip(&text, location, stats)? {
                events.extend(device_events(
                    sentence,
                    true,
                    &mut self.hemispheres,
                    &mut self.duplicates,
                    stats,
                ));
            }
        }
        Ok(events)
    }
}

/// NMEA stream of RMC sentences only (`nav32`)
///
/// Each RMC carries its own date, so it yields an anchor followed by a fix.
/// Satellite count, HDOP, and altitude are unavailable.
#[derive(Debug, Default)]
pub struct RmcOnlyAdapter {
    hemispheres: HemisphereMemory,
    duplicates: DuplicateFilter,
}

impl RmcOnlyAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FormatAdapter for RmcOnlyAdapter {
    fn format(&self) -> RawFormat {
        RawFormat::RmcOnly
    }

    fn decode_line(
        &mut self,
        line: &str,
        location: &LineLocation,
        stats: &mut AdapterStats,
    ) -> Result<Vec<NavEvent>> {
        let Some(text) = sentence_part(line) else {
            stats.lines_ignored += 1;
            return Ok(Vec::new());
        };

        match decode_or_skip(text, location, stats)? {
            Some(DecodedSentence::RecommendedMinimum(rmc)) => {
                if self.duplicates.is_repeat(rmc.time, stats) {
                    return Ok(Vec::new());
                }
                Ok(vec![
                    NavEvent::Anchor(AnchorDate::new(
                        rmc.date,
                        rmc.time,
                        AnchorSource::DeviceSentence,
                    )),
                    NavEvent::Fix(fix_from_rmc(&rmc, &mut self.hemispheres)),
                ])
            }
            Some(_) => {
                stats.lines_ignored += 1;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}
