//! Time tally CLI library.
//!
//! This crate provides the command-line interface for the time tally.

mod cli;
mod config;

pub use cli::Cli;
pub use config::Config;
