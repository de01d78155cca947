//! Wall-clock types.
//!
//! The time source hands out UNIX seconds; everything downstream only cares
//! about the local hour/minute/second, so the conversion lives here.

use core::fmt;

use chrono::{DateTime, FixedOffset, Timelike};
use serde::{Deserialize, Serialize};

/// 2020-01-01T00:00:00Z. A clock reading earlier than this means the RTC
/// was never set by SNTP.
pub const EPOCH_2020: i64 = 1_577_836_800;

/// Largest offset chrono's `FixedOffset` accepts, exclusive.
const MAX_OFFSET_SECS: i32 = 86_400;

/// An hour/minute pair, the granularity the daily trigger works at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
}

impl TimeOfDay {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Local wall-clock time as read on one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClockTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallClockTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self { hour, minute, second }
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::new(self.hour, self.minute)
    }

    /// Convert UNIX seconds to local time at a fixed offset east of UTC.
    ///
    /// Returns `None` when the offset is out of range or the timestamp is
    /// not representable.
    pub fn from_unix(unix_secs: i64, offset_secs: i32) -> Option<Self> {
        let offset = FixedOffset::east_opt(offset_secs)?;
        let local = DateTime::from_timestamp(unix_secs, 0)?.with_timezone(&offset);
        Some(Self::new(
            local.hour() as u8,
            local.minute() as u8,
            local.second() as u8,
        ))
    }
}

impl fmt::Display for WallClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// `true` once the RTC holds a time SNTP could plausibly have set.
pub fn is_synchronized(unix_secs: i64) -> bool {
    unix_secs >= EPOCH_2020
}

/// `true` if `offset_secs` can be used as a fixed UTC offset.
pub fn is_valid_offset(offset_secs: i32) -> bool {
    (-MAX_OFFSET_SECS + 1..MAX_OFFSET_SECS).contains(&offset_secs)
}
