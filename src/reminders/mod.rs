use crate::error::{ReminderError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub mod repository;

pub use repository::{ReminderRepository, SqliteReminderRepository};

pub const REMIND_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A wall-clock minute in the service's fixed zone, `YYYY-MM-DD HH:MM`.
///
/// Only the canonical, zero-padded form is accepted so that the stored text
/// always equals the formatted value and due-selection can compare strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RemindTime(NaiveDateTime);

impl RemindTime {
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = || {
            ReminderError::Validation(format!(
                "invalid remind_time `{input}`, expected YYYY-MM-DD HH:MM"
            ))
        };
        let parsed = NaiveDateTime::parse_from_str(input, REMIND_TIME_FORMAT).map_err(|_| invalid())?;
        let remind_time = RemindTime(parsed);
        if remind_time.to_string() != input {
            return Err(invalid());
        }
        Ok(remind_time)
    }

    /// Truncates `at` to its minute, read in `at`'s own zone.
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        let naive = at.naive_local();
        let minute = naive
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(naive);
        RemindTime(minute)
    }
}

impl fmt::Display for RemindTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(REMIND_TIME_FORMAT))
    }
}

impl FromStr for RemindTime {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self> {
        RemindTime::parse(s)
    }
}

impl Serialize for RemindTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub id: i64,
    pub message: String,
    pub remind_time: RemindTime,
    pub triggered: bool,
    pub created_at: String,
}

/// A validated insert request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReminder {
    pub message: String,
    pub remind_time: RemindTime,
}

impl NewReminder {
    pub fn validate(message: &str, remind_time: &str) -> Result<Self> {
        if message.trim().is_empty() {
            return Err(ReminderError::Validation("message must not be empty".into()));
        }
        Ok(NewReminder {
            message: message.to_string(),
            remind_time: RemindTime::parse(remind_time)?,
        })
    }
}
