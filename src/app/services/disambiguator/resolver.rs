//! Anchor and continuity dating rules

use tracing::{debug, warn};

use super::buffer::Buffer;
use super::stats::{DisambiguationStats, FlushCause};
use crate::app::models::{AnchorDate, AnchorSource, CalendarDate, CanonicalFix, TimeOfDay, Timestamp, UndatedFix};
use crate::app::services::format_adapters::NavEvent;
use crate::constants::DAY_ROLLOVER_THRESHOLD_SECS;
use crate::{Error, Result};

/// Assigns calendar dates to a stream of undated fixes
///
/// Feed it events in file order; every call returns the fixes it was able
/// to date, in input order. Call [`Disambiguator::finish`] at end of input.
#[derive(Debug)]
pub struct Disambiguator {
    buffer: Buffer,
    anchor: Option<AnchorDate>,
    anchor_consumed: bool,
    continuity: Option<Timestamp>,
    stats: DisambiguationStats,
}

impl Disambiguator {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Buffer::new(capacity),
            anchor: None,
            anchor_consumed: false,
            continuity: None,
            stats: DisambiguationStats::new(),
        }
    }

    pub fn stats(&self) -> &DisambiguationStats {
        &self.stats
    }

    pub fn into_stats(self) -> DisambiguationStats {
        self.stats
    }

    /// Date and time of the last emitted fix
    pub fn continuity(&self) -> Option<Timestamp> {
        self.continuity
    }

    pub fn push_event(&mut self, event: NavEvent) -> Result<Vec<CanonicalFix>> {
        match event {
            NavEvent::Fix(fix) => self.push_fix(fix),
            NavEvent::Anchor(anchor) => self.push_anchor(anchor),
        }
    }

    /// Buffer a fix, flushing when the buffer fills
    pub fn push_fix(&mut self, fix: UndatedFix) -> Result<Vec<CanonicalFix>> {
        self.stats.fixes_received += 1;
        self.buffer.push(fix);

        if !self.buffer.is_full() {
            return Ok(Vec::new());
        }
        if !self.has_reference() {
            warn!(
                "Buffer of {} fixes filled before any date reference",
                self.buffer.capacity()
            );
            return Err(Error::buffer_overflow_without_anchor(self.buffer.capacity()));
        }
        self.flush(FlushCause::Capacity)
    }

    /// Date everything waiting against the old reference, then adopt `anchor`
    pub fn push_anchor(&mut self, anchor: AnchorDate) -> Result<Vec<CanonicalFix>> {
        self.stats.anchors_received += 1;

        let dated = if self.has_reference() {
            self.flush(FlushCause::Anchor)?
        } else {
            self.date_backward(&anchor)?
        };

        self.anchor = Some(anchor);
        self.anchor_consumed = false;
        Ok(dated)
    }

    /// Flush the remainder at end of input
    pub fn finish(&mut self) -> Result<Vec<CanonicalFix>> {
        if !self.buffer.is_empty() && !self.has_reference() {
            warn!("{} fixes left with no date reference", self.buffer.len());
            return Err(Error::missing_anchor(format!(
                "{} fixes reached end of input and no date/time reference was ever seen",
                self.buffer.len()
            )));
        }
        let dated = self.flush(FlushCause::EndOfInput)?;
        debug!("{}", self.stats.summary());
        Ok(dated)
    }

    fn has_reference(&self) -> bool {
        self.anchor.is_some() || self.continuity.is_some()
    }

    fn flush(&mut self, cause: FlushCause) -> Result<Vec<CanonicalFix>> {
        if self.buffer.is_empty() {
            return Ok(Vec::new());
        }

        let fixes = self.buffer.flush();
        let mut dated = Vec::with_capacity(fixes.len());
        let mut previous: Option<Timestamp> = None;

        for fix in fixes {
            let date = match previous {
                Some(predecessor) => self.follow(&predecessor, fix.time)?,
                None => self.first_date(fix.time)?,
            };
            previous = Some(Timestamp::new(date, fix.time));
            dated.push(fix.dated(date));
        }

        self.continuity = previous;
        self.anchor_consumed = true;
        self.stats.record_flush(cause, dated.len());
        debug!("Flushed {} fixes on {}", dated.len(), cause);
        Ok(dated)
    }

    /// Date of the first fix in a flush
    ///
    /// The continuity point wins. A fresh anchor only re-anchors when the
    /// continuity date lands more than half a day away from it.
    fn first_date(&mut self, time: TimeOfDay) -> Result<CalendarDate> {
        let fresh_anchor = self.anchor.filter(|_| !self.anchor_consumed);

        match (self.continuity, fresh_anchor) {
            (Some(predecessor), Some(anchor)) => {
                let (date, rolled) = roll_forward(&predecessor, time)?;
                let anchor_at = Timestamp::new(anchor.date(), anchor.time());
                let drift = Timestamp::new(date, time).epoch_seconds() - anchor_at.epoch_seconds();
                if drift.abs() > DAY_ROLLOVER_THRESHOLD_SECS {
                    debug!(
                        "Continuity date {} is {:.0} s from anchor {}, re-anchoring",
                        date, drift, anchor_at
                    );
                    return self.date_from_anchor(&anchor, time);
                }
                if rolled {
                    self.stats.day_rollovers += 1;
                }
                Ok(date)
            }
            (Some(predecessor), None) => self.follow(&predecessor, time),
            (None, Some(anchor)) => self.date_from_anchor(&anchor, time),
            (None, None) => Err(Error::missing_anchor(
                "no anchor or previously dated fix to date from",
            )),
        }
    }

    fn date_from_anchor(&mut self, anchor: &AnchorDate, time: TimeOfDay) -> Result<CalendarDate> {
        match anchor.source {
            AnchorSource::DeviceSentence => {
                if time.nanos_of_day() >= anchor.time().nanos_of_day() {
                    Ok(anchor.date())
                } else {
                    self.stats.day_rollovers += 1;
                    anchor.date().next_day()
                }
            }
            AnchorSource::LoggerClock | AnchorSource::RecordDate => {
                let difference = time.seconds_since(&anchor.time());
                if difference > DAY_ROLLOVER_THRESHOLD_SECS {
                    anchor.date().previous_day()
                } else if difference < -DAY_ROLLOVER_THRESHOLD_SECS {
                    self.stats.day_rollovers += 1;
                    anchor.date().next_day()
                } else {
                    Ok(anchor.date())
                }
            }
        }
    }

    /// Date of a fix given the fix emitted just before it
    fn follow(&mut self, predecessor: &Timestamp, time: TimeOfDay) -> Result<CalendarDate> {
        let (date, rolled) = roll_forward(predecessor, time)?;
        if rolled {
            self.stats.day_rollovers += 1;
        }
        Ok(date)
    }

    /// Date the waiting fixes backward from the first anchor ever seen
    fn date_backward(&mut self, anchor: &AnchorDate) -> Result<Vec<CanonicalFix>> {
        if self.buffer.is_empty() {
            return Ok(Vec::new());
        }

        let fixes = self.buffer.flush();
        let mut dates = Vec::with_capacity(fixes.len());
        let mut successor: Option<Timestamp> = None;

        for fix in fixes.iter().rev() {
            let date = match successor {
                None if fix.time.nanos_of_day() <= anchor.time().nanos_of_day() => anchor.date(),
                None => anchor.date().previous_day()?,
                Some(later) if fix.time.seconds_since(&later.time) > DAY_ROLLOVER_THRESHOLD_SECS => {
                    later.date.previous_day()?
                }
                Some(later) => later.date,
            };
            successor = Some(Timestamp::new(date, fix.time));
            dates.push(date);
        }
        dates.reverse();

        let dated: Vec<CanonicalFix> = fixes
            .into_iter()
            .zip(dates)
            .map(|(fix, date)| fix.dated(date))
            .collect();

        self.continuity = dated.last().map(CanonicalFix::timestamp);
        self.stats.record_flush(FlushCause::Retroactive, dated.len());
        debug!("Dated {} early fixes backward from the first anchor", dated.len());
        Ok(dated)
    }
}

/// Predecessor's date, advanced a day on a backward jump over the threshold
fn roll_forward(predecessor: &Timestamp, time: TimeOfDay) -> Result<(CalendarDate, bool)> {
    if predecessor.time.seconds_since(&time) > DAY_ROLLOVER_THRESHOLD_SECS {
        Ok((predecessor.date.next_day()?, true))
    } else {
        Ok((predecessor.date, false))
    }
}
