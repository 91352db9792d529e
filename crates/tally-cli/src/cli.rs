//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

use tally_core::Period;

/// Tally time spans from a note file.
///
/// Reads lines that are either wall-clock spans ("18:35-19:40") or compound
/// duration literals ("1h30m", "-3h") and prints the accumulated total.
/// Reading stops at the first empty line or end of input.
#[derive(Debug, Parser)]
#[command(name = "tally", version, about, long_about = None)]
pub struct Cli {
    /// Input file; "-" reads stdin. Defaults to the configured notes file,
    /// or stdin if none is configured.
    pub file: Option<PathBuf>,

    /// Initial total to resume from, as a compound literal (e.g. "1h30m").
    #[arg(short, long)]
    pub seed: Option<Period>,

    /// Emit the total as JSON instead of the canonical rendering.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}
