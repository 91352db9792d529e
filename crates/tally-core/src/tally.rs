//! Line classification and accumulation.
//!
//! Input lines come in two grammars: a wall-clock span (`"18:35-19:40"`)
//! or a compound duration literal (`"1h30m"`, `"-3h"`). Each accepted line
//! folds into a single running [`Period`] total.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::period::{Period, PeriodError};
use crate::time_of_day::{TimeOfDay, TimeOfDayError};

static CLOCK_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}:\d{1,2})\s*-\s*(\d{1,2}:\d{1,2})$").unwrap());

static PERIOD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?(\d+[yMdhms]\w*){1,6}$").unwrap());

/// Errors raised while folding lines into a tally.
#[derive(Debug, Error)]
pub enum TallyError {
    /// The line matched neither grammar.
    #[error("unrecognized pattern: [{0}]")]
    Unrecognized(String),

    #[error(transparent)]
    ClockTime(#[from] TimeOfDayError),

    #[error(transparent)]
    Period(#[from] PeriodError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A single recognized line, already reduced to its signed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// A start/stop wall-clock span.
    ClockSpan(Period),
    /// A compound duration literal.
    Literal(Period),
}

impl Entry {
    /// Classifies a trimmed line against the two grammars, in fixed order:
    /// clock span first, then compound literal. A line matching neither is
    /// rejected; there is no silent skip.
    pub fn classify(line: &str) -> Result<Self, TallyError> {
        if let Some(captures) = CLOCK_SPAN_RE.captures(line) {
            let start: TimeOfDay = captures[1].parse()?;
            let stop: TimeOfDay = captures[2].parse()?;
            return Ok(Self::ClockSpan(start.diff(&stop)));
        }

        if PERIOD_RE.is_match(line) {
            return Ok(Self::Literal(line.parse()?));
        }

        Err(TallyError::Unrecognized(line.to_string()))
    }

    /// The signed length this entry contributes to a tally.
    #[must_use]
    pub const fn period(&self) -> Period {
        match self {
            Self::ClockSpan(period) | Self::Literal(period) => *period,
        }
    }
}

/// Folds recognized lines into a running signed total.
///
/// Not thread-safe by design: callers that want concurrent aggregation
/// partition their input and merge the partial totals with
/// [`Period::plus`].
#[derive(Debug, Default)]
pub struct Tally {
    total: Period,
}

impl Tally {
    /// Starts a tally at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::seeded(Period::ZERO)
    }

    /// Starts a tally from a prior total, resuming across input sources.
    #[must_use]
    pub const fn seeded(total: Period) -> Self {
        Self { total }
    }

    /// Trims and classifies one line, then folds it into the total.
    pub fn add_line(&mut self, line: &str) -> Result<(), TallyError> {
        let line = line.trim();
        let entry = Entry::classify(line)?;
        self.total = self.total.plus(Some(entry.period()));
        tracing::debug!(line, total = %self.total, "line accumulated");
        Ok(())
    }

    /// The running total. Before any line has been added this is the seed.
    #[must_use]
    pub const fn total(&self) -> Period {
        self.total
    }

    /// Consumes lines from `reader` until end-of-stream or the first empty
    /// line, returning the final total.
    ///
    /// A whitespace-only line does not stop collection: it trims to the
    /// empty string, matches neither grammar, and fails as unrecognized.
    pub fn collect<R: BufRead>(mut self, reader: R) -> Result<Period, TallyError> {
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                break;
            }
            self.add_line(&line)?;
        }
        Ok(self.total)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn period(literal: &str) -> Period {
        literal.parse().expect("literal should parse")
    }

    #[test]
    fn collect_accumulates_mixed_lines() {
        let input = Cursor::new(" 5m\n18:35- 19:40\n  1h\n30m\n-3h\n");
        let total = Tally::new().collect(input).expect("should collect");
        assert_eq!(total, period("-20m"));
    }

    #[test]
    fn clock_span_lines_use_the_signed_difference() {
        let mut tally = Tally::new();
        tally.add_line("18:35-19:40").expect("should accept");
        assert_eq!(tally.total(), period("1h 5m"));

        let mut tally = Tally::new();
        tally.add_line("19:40 - 18:35").expect("should accept");
        assert_eq!(tally.total(), period("-1h5m"));
    }

    #[test]
    fn classification_tries_clock_span_first() {
        assert!(matches!(
            Entry::classify("1:2-3:4"),
            Ok(Entry::ClockSpan(_))
        ));
        assert!(matches!(Entry::classify("1h30m"), Ok(Entry::Literal(_))));
    }

    #[test]
    fn unrecognized_lines_are_rejected_verbatim() {
        for line in ["abc", "18:35", "18:35-", "1h 30m"] {
            let err = Entry::classify(line).unwrap_err();
            match err {
                TallyError::Unrecognized(text) => assert_eq!(text, line),
                other => panic!("expected Unrecognized for {line:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn unrecognized_error_carries_the_line_in_its_message() {
        let err = Entry::classify("abc").unwrap_err();
        assert_eq!(err.to_string(), "unrecognized pattern: [abc]");
    }

    #[test]
    fn out_of_range_clock_fields_fail_as_clock_errors() {
        let err = Entry::classify("24:00-25:00").unwrap_err();
        assert!(matches!(
            err,
            TallyError::ClockTime(TimeOfDayError::HoursOutOfRange { value: 24 })
        ));
    }

    #[test]
    fn bad_unit_inside_a_literal_shaped_line_fails_as_period_error() {
        // The literal grammar tolerates trailing word characters per group,
        // so the unit parser is what rejects them.
        let err = Entry::classify("1hx").unwrap_err();
        assert!(matches!(
            err,
            TallyError::Period(PeriodError::UnknownUnit { unit: 'x' })
        ));
    }

    #[test]
    fn total_before_any_line_is_the_seed() {
        assert_eq!(Tally::new().total(), Period::ZERO);
        assert_eq!(Tally::seeded(period("1h")).total(), period("1h"));
    }

    #[test]
    fn seeded_tally_resumes_a_running_total() {
        let input = Cursor::new("30m\n");
        let total = Tally::seeded(period("1h"))
            .collect(input)
            .expect("should collect");
        assert_eq!(total, period("1h 30m"));
    }

    #[test]
    fn empty_line_stops_collection() {
        let input = Cursor::new("5m\n\n1h\n");
        let total = Tally::new().collect(input).expect("should collect");
        assert_eq!(total, period("5m"));
    }

    #[test]
    fn empty_input_yields_the_seed() {
        let total = Tally::new().collect(Cursor::new("")).expect("should collect");
        assert_eq!(total, Period::ZERO);
    }

    #[test]
    fn whitespace_only_line_is_unrecognized_not_a_stop() {
        let err = Tally::new().collect(Cursor::new("5m\n  \n1h\n")).unwrap_err();
        match err {
            TallyError::Unrecognized(text) => assert_eq!(text, ""),
            other => panic!("expected Unrecognized, got {other:?}"),
        }
    }

    #[test]
    fn first_fault_is_terminal() {
        let mut tally = Tally::new();
        tally.add_line("5m").expect("should accept");
        assert!(tally.add_line("nope").is_err());
        // The failed line must not have touched the total.
        assert_eq!(tally.total(), period("5m"));
    }
}
