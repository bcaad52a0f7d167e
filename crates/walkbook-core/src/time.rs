use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Stored timestamps keep microseconds; anything finer is dropped at parse.
pub const WALK_TIME_SUBSEC_DIGITS: u16 = 6;

const WALK_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid {what} '{input}': expected {expected}")]
pub struct FormatError {
    pub what: &'static str,
    pub input: String,
    pub expected: &'static str,
}

/// Parses a calendar day in `YYYY-MM-DD` form.
pub fn parse_day(input: &str) -> Result<NaiveDate, FormatError> {
    NaiveDate::parse_from_str(input.trim(), DAY_FORMAT).map_err(|_| FormatError {
        what: "day",
        input: input.to_string(),
        expected: "YYYY-MM-DD",
    })
}

/// Parses a walk start time.
///
/// Offset-bearing RFC 3339 values keep their wall-clock time and drop the
/// offset, so `10:00+02:00` books a 10:00 walk. Sub-microsecond digits are
/// truncated.
pub fn parse_walk_time(input: &str) -> Result<NaiveDateTime, FormatError> {
    let s = input.trim();
    let parsed = match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.naive_local()),
        Err(_) => WALK_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok()),
    };
    parsed
        .map(|ts| ts.trunc_subsecs(WALK_TIME_SUBSEC_DIGITS))
        .ok_or_else(|| FormatError {
            what: "walk time",
            input: input.to_string(),
            expected: "YYYY-MM-DDTHH:MM[:SS]",
        })
}

pub fn deserialize_walk_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_walk_time(&raw).map_err(serde::de::Error::custom)
}

/// Inclusive span of one calendar day: `00:00:00` through `23:59:59`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DayRange {
    pub fn for_day(day: NaiveDate) -> Self {
        let end_of_day = NaiveTime::MIN + Duration::seconds(86_399);
        Self {
            start: day.and_time(NaiveTime::MIN),
            end: day.and_time(end_of_day),
        }
    }

    pub fn parse(input: &str) -> Result<Self, FormatError> {
        parse_day(input).map(Self::for_day)
    }

    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start <= *ts && *ts <= self.end
    }
}
