//! Wall-clock time-of-day values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::period::{DAY_MS, HOUR_MS, MINUTE_MS, Period, SECOND_MS};

/// Validation errors for clock times.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeOfDayError {
    /// The hours field was outside [0, 24).
    #[error("hours must be in [0, 24), got {value}")]
    HoursOutOfRange { value: u32 },

    /// The minutes field was outside [0, 60).
    #[error("minutes must be in [0, 60), got {value}")]
    MinutesOutOfRange { value: u32 },

    /// The seconds field was outside [0, 60).
    #[error("seconds must be in [0, 60), got {value}")]
    SecondsOutOfRange { value: u32 },

    /// The milliseconds field was outside [0, 1000).
    #[error("milliseconds must be in [0, 1000), got {value}")]
    MillisOutOfRange { value: u32 },

    /// The text did not have the shape of a clock time.
    #[error("invalid clock time: {text}")]
    Malformed { text: String },
}

/// A point in the day: milliseconds since local midnight, wrapped into
/// [0, 24h).
///
/// Construction normalizes any millisecond count via Euclidean modulo, so
/// the stored value is never out of range and never negative. Ordering,
/// equality, and hashing are over the raw count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeOfDay {
    millis: i64,
}

impl TimeOfDay {
    /// Midnight, the zero point of the day.
    pub const MIDNIGHT: Self = Self { millis: 0 };

    /// Wraps an arbitrary millisecond count into [0, 24h). Negative inputs
    /// wrap to the equivalent non-negative offset.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self {
            millis: millis.rem_euclid(DAY_MS),
        }
    }

    /// Milliseconds since midnight, in [0, 86_400_000).
    #[must_use]
    pub const fn millis_since_midnight(&self) -> i64 {
        self.millis
    }

    /// Builds a clock time from individual fields, rejecting any field that
    /// exceeds its bound.
    pub fn from_hms_milli(
        hours: u32,
        minutes: u32,
        seconds: u32,
        millis: u32,
    ) -> Result<Self, TimeOfDayError> {
        if hours > 23 {
            return Err(TimeOfDayError::HoursOutOfRange { value: hours });
        }
        if minutes > 59 {
            return Err(TimeOfDayError::MinutesOutOfRange { value: minutes });
        }
        if seconds > 59 {
            return Err(TimeOfDayError::SecondsOutOfRange { value: seconds });
        }
        if millis > 999 {
            return Err(TimeOfDayError::MillisOutOfRange { value: millis });
        }

        Ok(Self::from_millis(
            i64::from(millis)
                + i64::from(seconds) * SECOND_MS
                + i64::from(minutes) * MINUTE_MS
                + i64::from(hours) * HOUR_MS,
        ))
    }

    /// Signed distance from `self` (the start instant) to `other` (the end
    /// instant).
    ///
    /// Not clamped across midnight: an end before the start yields a
    /// negative period even though both are time-of-day values.
    #[must_use]
    pub const fn diff(&self, other: &Self) -> Period {
        Period::from_millis(other.millis - self.millis)
    }
}

fn parse_field(part: Option<&str>, text: &str) -> Result<Option<u32>, TimeOfDayError> {
    part.map(|field| {
        field.parse::<u32>().map_err(|_| TimeOfDayError::Malformed {
            text: text.to_string(),
        })
    })
    .transpose()
}

impl FromStr for TimeOfDay {
    type Err = TimeOfDayError;

    /// Parses `"HH:MM"`, `"HH:MM:SS"`, or `"HH:MM:SS.mmm"`; fields are
    /// separated by `:` or `.`. Missing seconds and milliseconds default to
    /// zero. Fields over their bound are rejected, never normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TimeOfDayError::Malformed { text: s.to_string() };

        let mut parts = s.split([':', '.']);
        let hours = parse_field(parts.next(), s)?.ok_or_else(malformed)?;
        let minutes = parse_field(parts.next(), s)?.ok_or_else(malformed)?;
        let seconds = parse_field(parts.next(), s)?.unwrap_or(0);
        let millis = parse_field(parts.next(), s)?.unwrap_or(0);
        if parts.next().is_some() {
            return Err(malformed());
        }

        Self::from_hms_milli(hours, minutes, seconds, millis)
    }
}

impl fmt::Display for TimeOfDay {
    /// Zero-padded `"HH:MM:SS.mmm"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut r = self.millis;
        let hours = r / HOUR_MS;
        r -= hours * HOUR_MS;
        let minutes = r / MINUTE_MS;
        r -= minutes * MINUTE_MS;
        let seconds = r / SECOND_MS;
        let millis = r - seconds * SECOND_MS;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
