//! Typed decoders for the supported sentence kinds
//!
//! Each decoder is stateless: it takes a framed [`RawSentence`] and returns
//! the typed field set, or a recoverable decode error.

use super::field_parsers::{
    RawCoordinate, parse_count, parse_day_month_year, parse_ddmmyy, parse_latitude,
    parse_longitude, parse_measure, parse_optional_time, parse_quality, parse_required_time,
};
use super::framing::{RawSentence, SentenceKind};
use crate::app::models::{CalendarDate, Measure, TimeOfDay};
use crate::{Error, Result};

/// Receiver status flag of RMC and GLL sentences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    /// `A`: data valid
    Active,
    /// `V`: navigation receiver warning
    Void,
}

impl FixStatus {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim() {
            "A" => Some(Self::Active),
            "V" => Some(Self::Void),
            _ => None,
        }
    }

    /// Quality code equivalent: active fixes count as GPS fixes
    pub fn quality_code(&self) -> u8 {
        match self {
            Self::Active => 1,
            Self::Void => 0,
        }
    }
}

/// Decoded GGA sentence
#[derive(Debug, Clone, PartialEq)]
pub struct PositionFix {
    pub time: TimeOfDay,
    pub latitude: RawCoordinate,
    pub longitude: RawCoordinate,
    pub quality: Option<u8>,
    pub satellites: Option<u32>,
    pub hdop: Option<Measure>,
    pub altitude: Option<Measure>,
    pub geoid_separation: Option<Measure>,
}

/// Decoded ZDA sentence
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeStamp {
    pub time: TimeOfDay,
    pub date: CalendarDate,
    pub zone_hours: Option<i32>,
    pub zone_minutes: Option<i32>,
}

/// Decoded RMC sentence
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendedMinimum {
    pub time: TimeOfDay,
    pub status: Option<FixStatus>,
    pub latitude: RawCoordinate,
    pub longitude: RawCoordinate,
    pub speed_knots: Option<Measure>,
    pub course_true: Option<Measure>,
    pub date: CalendarDate,
    pub magnetic_variation: Option<Measure>,
}

/// Decoded GLL sentence
#[derive(Debug, Clone, PartialEq)]
pub struct PartialPosition {
    pub latitude: RawCoordinate,
    pub longitude: RawCoordinate,
    pub time: Option<TimeOfDay>,
    pub status: Option<FixStatus>,
}

/// Decoded VTG sentence
#[derive(Debug, Clone, PartialEq)]
pub struct VelocityCourse {
    pub course_true: Option<Measure>,
    pub course_magnetic: Option<Measure>,
    pub speed_knots: Option<Measure>,
    pub speed_kmh: Option<Measure>,
}

/// Any sentence after decoding
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedSentence {
    PositionFix(PositionFix),
    DateTimeStamp(DateTimeStamp),
    RecommendedMinimum(RecommendedMinimum),
    PartialPosition(PartialPosition),
    VelocityCourse(VelocityCourse),
    /// A sentence kind no decoder handles, by formatter
    Unsupported(String),
}

/// Frame, verify, and decode one line
pub fn decode(line: &str) -> Result<DecodedSentence> {
    let sentence = RawSentence::parse(line)?.verify()?;
    decode_sentence(&sentence)
}

/// Decode an already framed and verified sentence
pub fn decode_sentence(sentence: &RawSentence) -> Result<DecodedSentence> {
    Ok(match &sentence.kind {
        SentenceKind::PositionFix => DecodedSentence::PositionFix(decode_gga(sentence)?),
        SentenceKind::DateTimeStamp => DecodedSentence::DateTimeStamp(decode_zda(sentence)?),
        SentenceKind::RecommendedMinimum => {
            DecodedSentence::RecommendedMinimum(decode_rmc(sentence)?)
        }
        SentenceKind::PartialPosition => DecodedSentence::PartialPosition(decode_gll(sentence)?),
        SentenceKind::VelocityCourse => DecodedSentence::VelocityCourse(decode_vtg(sentence)?),
        SentenceKind::Other(name) => DecodedSentence::Unsupported(name.clone()),
    })
}

fn require_fields(sentence: &RawSentence, minimum: usize) -> Result<()> {
    if sentence.field_count() < minimum {
        return Err(Error::sentence_decode(
            sentence.kind.to_string(),
            format!(
                "expected at least {} fields, found {}",
                minimum - 1,
                sentence.field_count() - 1
            ),
        ));
    }
    Ok(())
}

/// `$--GGA,hhmmss.ss,llll.ll,a,yyyyy.yy,a,x,xx,x.x,x.x,M,x.x,M,x.x,xxxx`
pub fn decode_gga(sentence: &RawSentence) -> Result<PositionFix> {
    require_fields(sentence, 7)?;

    Ok(PositionFix {
        time: parse_required_time(sentence.field(1))?,
        latitude: parse_latitude(sentence.field(2), sentence.field(3))?,
        longitude: parse_longitude(sentence.field(4), sentence.field(5))?,
        quality: parse_quality(sentence.field(6)),
        satellites: parse_count(sentence.field(7)),
        hdop: parse_measure(sentence.field(8)),
        altitude: parse_measure(sentence.field(9)),
        geoid_separation: parse_measure(sentence.field(11)),
    })
}

/// `$--ZDA,hhmmss.ss,dd,mm,yyyy,xx,xx`
pub fn decode_zda(sentence: &RawSentence) -> Result<DateTimeStamp> {
    require_fields(sentence, 5)?;

    Ok(DateTimeStamp {
        time: parse_required_time(sentence.field(1))?,
        date: parse_day_month_year(sentence.field(2), sentence.field(3), sentence.field(4))?,
        zone_hours: sentence.field(5).parse().ok(),
        zone_minutes: sentence.field(6).parse().ok(),
    })
}

/// `$--RMC,hhmmss.ss,A,llll.ll,a,yyyyy.yy,a,x.x,x.x,ddmmyy,x.x,a[,m]`
pub fn decode_rmc(sentence: &RawSentence) -> Result<RecommendedMinimum> {
    require_fields(sentence, 10)?;

    let magnetic_variation = parse_measure(sentence.field(10)).map(|m| {
        if sentence.field(11) == "W" {
            m.negated()
        } else {
            m
        }
    });

    Ok(RecommendedMinimum {
        time: parse_required_time(sentence.field(1))?,
        status: FixStatus::parse(sentence.field(2)),
        latitude: parse_latitude(sentence.field(3), sentence.field(4))?,
        longitude: parse_longitude(sentence.field(5), sentence.field(6))?,
        speed_knots: parse_measure(sentence.field(7)),
        course_true: parse_measure(sentence.field(8)),
        date: parse_ddmmyy(sentence.field(9))?,
        magnetic_variation,
    })
}

/// `$--GLL,llll.ll,a,yyyyy.yy,a[,hhmmss.ss,A[,m]]`
pub fn decode_gll(sentence: &RawSentence) -> Result<PartialPosition> {
    require_fields(sentence, 5)?;

    Ok(PartialPosition {
        latitude: parse_latitude(sentence.field(1), sentence.field(2))?,
        longitude: parse_longitude(sentence.field(3), sentence.field(4))?,
        time: parse_optional_time(sentence.field(5))?,
        status: FixStatus::parse(sentence.field(6)),
    })
}

/// `$--VTG,x.x,T,x.x,M,x.x,N,x.x,K[,m]`
pub fn decode_vtg(sentence: &RawSentence) -> Result<VelocityCourse> {
    require_fields(sentence, 8)?;

    Ok(VelocityCourse {
        course_true: parse_measure(sentence.field(1)),
        course_magnetic: parse_measure(sentence.field(3)),
        speed_knots: parse_measure(sentence.field(5)),
        speed_kmh: parse_measure(sentence.field(7)),
    })
}
