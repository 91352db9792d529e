//! Signed durations and the compound-literal grammar.
//!
//! A [`Period`] is a signed millisecond count parsed from literals like
//! `"1h30m"` or `"-3h"` and rendered back in a canonical compact form.
//! Unit conversion uses a fixed private table: a day is 24 hours, a month
//! 30 days, a year 12 such months. This is the grammar's own arithmetic,
//! not a calendar.

use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) const SECOND_MS: i64 = 1000;
pub(crate) const MINUTE_MS: i64 = 60 * SECOND_MS;
pub(crate) const HOUR_MS: i64 = 60 * MINUTE_MS;
pub(crate) const DAY_MS: i64 = 24 * HOUR_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 12 * MONTH_MS;

/// Largest-first decomposition order used by the canonical formatter.
const UNITS: [(u64, char); 6] = [
    (YEAR_MS.unsigned_abs(), 'y'),
    (MONTH_MS.unsigned_abs(), 'M'),
    (DAY_MS.unsigned_abs(), 'd'),
    (HOUR_MS.unsigned_abs(), 'h'),
    (MINUTE_MS.unsigned_abs(), 'm'),
    (SECOND_MS.unsigned_abs(), 's'),
];

/// Errors for compound duration literals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// A character that is not a digit, sign, space, or known unit.
    #[error("unknown unit: {unit}")]
    UnknownUnit { unit: char },

    /// A unit with no digits in front of it (e.g. `"h"` or `"1hm"`).
    #[error("missing magnitude before unit: {unit}")]
    MissingMagnitude { unit: char },

    /// Digits at the end of the literal with no unit to bind to.
    #[error("dangling magnitude with no unit: {value}")]
    DanglingMagnitude { value: i64 },

    /// The literal does not fit in a signed millisecond count.
    #[error("duration literal overflows: {text}")]
    Overflow { text: String },
}

/// A signed span of time in milliseconds.
///
/// The count is unrestricted: it may exceed a day or be negative. Ordering,
/// equality, and hashing are all over the raw count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period {
    millis: i64,
}

impl Period {
    /// The zero-length period. Renders as `"0m"`.
    pub const ZERO: Self = Self { millis: 0 };

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// The signed millisecond count.
    #[must_use]
    pub const fn millis(&self) -> i64 {
        self.millis
    }

    /// Sums two periods. `None` is the identity element: the result is
    /// `self` unchanged, not merely an equal value.
    #[must_use]
    pub fn plus(self, other: Option<Self>) -> Self {
        other.map_or(self, |other| self + other)
    }

    /// Signed distance between two instants, in whole milliseconds.
    #[must_use]
    pub fn between<A: TimeZone, B: TimeZone>(start: &DateTime<A>, end: &DateTime<B>) -> Self {
        Self::from_millis(end.timestamp_millis() - start.timestamp_millis())
    }

    /// Lossless conversion for interop with chrono arithmetic.
    #[must_use]
    pub fn as_duration(&self) -> Duration {
        Duration::milliseconds(self.millis)
    }
}

impl Add for Period {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::from_millis(self.millis + other.millis)
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    /// Parses a compound literal: an optional `-` applying to the whole
    /// literal, then `<digits><unit>` groups in any order, units drawn from
    /// `y M d h m s` (case-sensitive: `m` is minutes, `M` is months).
    /// Embedded spaces are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut total: i64 = 0;
        let mut negative = false;
        let mut magnitude: Option<i64> = None;

        let overflow = || PeriodError::Overflow { text: s.to_string() };

        for ch in s.chars() {
            match ch {
                ' ' => {}
                '-' => negative = true,
                '0'..='9' => {
                    let digit = i64::from(u32::from(ch) - u32::from('0'));
                    let grown = magnitude
                        .unwrap_or(0)
                        .checked_mul(10)
                        .and_then(|m| m.checked_add(digit))
                        .ok_or_else(overflow)?;
                    magnitude = Some(grown);
                }
                unit => {
                    let unit_ms = unit_millis(unit)?;
                    let value = magnitude
                        .take()
                        .ok_or(PeriodError::MissingMagnitude { unit })?;
                    total = value
                        .checked_mul(unit_ms)
                        .and_then(|ms| total.checked_add(ms))
                        .ok_or_else(overflow)?;
                }
            }
        }

        if let Some(value) = magnitude {
            return Err(PeriodError::DanglingMagnitude { value });
        }

        Ok(Self::from_millis(if negative { -total } else { total }))
    }
}

fn unit_millis(unit: char) -> Result<i64, PeriodError> {
    match unit {
        'y' => Ok(YEAR_MS),
        'M' => Ok(MONTH_MS),
        'd' => Ok(DAY_MS),
        'h' => Ok(HOUR_MS),
        'm' => Ok(MINUTE_MS),
        's' => Ok(SECOND_MS),
        _ => Err(PeriodError::UnknownUnit { unit }),
    }
}

impl fmt::Display for Period {
    /// Canonical compact form: zero is `"0m"`; anything else is the
    /// absolute magnitude greedily decomposed largest-first, non-zero
    /// components only, space-joined, with a leading `-` when negative.
    /// Sub-second residue is dropped: rendering is whole-second
    /// granularity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis == 0 {
            return f.write_str("0m");
        }

        let mut remainder = self.millis.unsigned_abs();
        let mut parts: Vec<String> = Vec::with_capacity(UNITS.len());
        for (unit_ms, tag) in UNITS {
            let count = remainder / unit_ms;
            if count > 0 {
                parts.push(format!("{count}{tag}"));
            }
            remainder -= count * unit_ms;
        }

        let rendered = parts.join(" ");
        if self.millis < 0 {
            write!(f, "-{rendered}")
        } else {
            f.write_str(&rendered)
        }
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
