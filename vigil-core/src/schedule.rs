//! Once-a-day schedule parsing for the daily task loop.

use std::fmt;

use chrono::{NaiveDateTime, NaiveTime};

/// A wall-clock time at which a task runs every day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySchedule {
    at: NaiveTime,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleParseError {
    #[error("empty schedule")]
    Empty,
    #[error("expected HH:MM or HH:MM:SS, got '{0}'")]
    InvalidTime(String),
}

impl DailySchedule {
    pub fn new(at: NaiveTime) -> Self {
        Self { at }
    }

    /// Parse `"HH:MM"` or `"HH:MM:SS"` (24-hour clock).
    pub fn parse(raw: &str) -> Result<Self, ScheduleParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScheduleParseError::Empty);
        }

        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(Self::new)
            .map_err(|_| ScheduleParseError::InvalidTime(trimmed.to_string()))
    }

    pub fn time(&self) -> NaiveTime {
        self.at
    }

    /// Next occurrence strictly after `now`.
    pub fn next_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date().and_time(self.at);
        if today > now {
            today
        } else {
            today + chrono::Duration::days(1)
        }
    }
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap_or(NaiveTime::MIN))
    }
}

impl fmt::Display for DailySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.at.format("%H:%M:%S"))
    }
}
