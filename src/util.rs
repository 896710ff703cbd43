use crate::error::{ReminderError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `Z`, `UTC`, `+02:00`, `-0530`
static UTC_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(?i:z|utc)|([+-])(\d{2}):?(\d{2}))$").unwrap());

/// Source of the current wall-clock time in the service's fixed zone.
///
/// The scheduler never reads the system clock directly so that poll passes
/// can be driven at an arbitrary minute in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

pub fn parse_utc_offset(offset: &str) -> Result<FixedOffset> {
    let invalid = || ReminderError::Config(format!("invalid UTC offset `{offset}`"));
    let captures = UTC_OFFSET.captures(offset.trim()).ok_or_else(invalid)?;
    let (Some(sign), Some(hours), Some(minutes)) = (captures.get(1), captures.get(2), captures.get(3))
    else {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    };
    let hours: i32 = hours.as_str().parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.as_str().parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    let seconds = (hours * 60 + minutes) * 60;
    let seconds = if sign.as_str() == "-" { -seconds } else { seconds };
    FixedOffset::east_opt(seconds).ok_or_else(invalid)
}
