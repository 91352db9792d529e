//! Core domain logic for the time tally.
//!
//! This crate contains the fundamental types and logic for:
//! - `TimeOfDay`: wall-clock points with wraparound and signed difference
//! - `Period`: signed durations with the compound-literal grammar
//! - `Tally`: the line classifier/accumulator

mod period;
mod tally;
mod time_of_day;

pub use period::{Period, PeriodError};
pub use tally::{Entry, Tally, TallyError};
pub use time_of_day::{TimeOfDay, TimeOfDayError};
