use chrono::{NaiveDateTime, Timelike};
use thiserror::Error;

/// First bookable hour of the day.
pub const OPENING_HOUR: u32 = 7;
/// Last bookable hour of the day. Walks may start at :00 or :30 within it.
pub const CLOSING_HOUR: u32 = 23;
/// Minutes past the hour a walk may start on.
pub const SLOT_MINUTES: [u32; 2] = [0, 30];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum WalkTimeError {
    #[error("Walk time must be between 7:00 and 23:00")]
    OutsideBusinessHours { hour: u32 },
    #[error("Walk can only start on the hour or half hour.")]
    OffSlot { minute: u32 },
}

/// Checks a proposed walk start against business hours, then slot granularity.
///
/// Seconds are not inspected. The upper bound is `hour > CLOSING_HOUR`, which a
/// 24-hour clock never reaches, so 23:30 is the latest bookable start.
pub fn validate_walk_time(walk_time: &NaiveDateTime) -> Result<(), WalkTimeError> {
    let hour = walk_time.hour();
    if hour < OPENING_HOUR || hour > CLOSING_HOUR {
        return Err(WalkTimeError::OutsideBusinessHours { hour });
    }

    let minute = walk_time.minute();
    if !SLOT_MINUTES.contains(&minute) {
        return Err(WalkTimeError::OffSlot { minute });
    }

    Ok(())
}
