//! Approximate calendar arithmetic on Unix timestamps.
//!
//! Years are 365 days and months are 30 days. This is intended for expiry
//! windows and TTLs, not for calendar dates.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const MS_PER_YEAR: i64 = 31_536_000_000;
pub const MS_PER_MONTH: i64 = 2_592_000_000;
pub const MS_PER_DAY: i64 = 86_400_000;
pub const MS_PER_HOUR: i64 = 3_600_000;
pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_SECOND: i64 = 1_000;

/// Resolution of a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Seconds,
    Milliseconds,
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s" | "sec" | "seconds" => Ok(Unit::Seconds),
            "ms" | "millis" | "milliseconds" => Ok(Unit::Milliseconds),
            _ => Err(format!("unknown timestamp unit: {}", s)),
        }
    }
}

/// Current Unix time in `unit`.
pub fn current_timestamp(unit: Unit) -> i64 {
    let now = chrono::Utc::now();
    match unit {
        Unit::Seconds => now.timestamp(),
        Unit::Milliseconds => now.timestamp_millis(),
    }
}

/// Amount of time to add; negative fields subtract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOffset {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
}

impl TimeOffset {
    pub fn years(mut self, n: i64) -> Self {
        self.years = n;
        self
    }

    pub fn months(mut self, n: i64) -> Self {
        self.months = n;
        self
    }

    pub fn days(mut self, n: i64) -> Self {
        self.days = n;
        self
    }

    pub fn hours(mut self, n: i64) -> Self {
        self.hours = n;
        self
    }

    pub fn minutes(mut self, n: i64) -> Self {
        self.minutes = n;
        self
    }

    pub fn seconds(mut self, n: i64) -> Self {
        self.seconds = n;
        self
    }

    pub fn milliseconds(mut self, n: i64) -> Self {
        self.milliseconds = n;
        self
    }

    /// Total offset in milliseconds.
    pub fn as_millis(&self) -> Result<i64> {
        [
            (self.years, MS_PER_YEAR),
            (self.months, MS_PER_MONTH),
            (self.days, MS_PER_DAY),
            (self.hours, MS_PER_HOUR),
            (self.minutes, MS_PER_MINUTE),
            (self.seconds, MS_PER_SECOND),
            (self.milliseconds, 1),
        ]
        .iter()
        .try_fold(0i64, |acc, &(n, scale)| {
            n.checked_mul(scale).and_then(|ms| acc.checked_add(ms))
        })
        .ok_or_else(|| Error::Timestamp(format!("offset {:?} overflows", self)))
    }
}

/// Add `offset` to `src` (in `unit`). A `src` of zero means "now".
///
/// Arithmetic is done in milliseconds, so sub-second offsets on a seconds
/// timestamp are floored away.
pub fn extend_timestamp(src: i64, offset: &TimeOffset, unit: Unit) -> Result<i64> {
    let overflow = || Error::Timestamp(format!("timestamp {} overflows", src));

    let src_ms = match unit {
        Unit::Seconds => src.checked_mul(MS_PER_SECOND).ok_or_else(overflow)?,
        Unit::Milliseconds => src,
    };
    let src_ms = if src_ms == 0 {
        current_timestamp(Unit::Milliseconds)
    } else {
        src_ms
    };

    let result_ms = src_ms
        .checked_add(offset.as_millis()?)
        .ok_or_else(overflow)?;

    Ok(match unit {
        Unit::Seconds => result_ms.div_euclid(MS_PER_SECOND),
        Unit::Milliseconds => result_ms,
    })
}

/// Whether `deadline_ms` (Unix milliseconds) is at most `seconds_before`
/// seconds away.
pub fn is_almost_timeout(deadline_ms: i64, seconds_before: i64) -> Result<bool> {
    let almost = extend_timestamp(
        deadline_ms,
        &TimeOffset::default().seconds(-seconds_before),
        Unit::Milliseconds,
    )?;
    Ok(current_timestamp(Unit::Milliseconds) >= almost)
}
