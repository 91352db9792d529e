use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tally_cli::{Cli, Config};
use tally_core::{Period, Tally};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let seed = cli.seed.or(config.seed).unwrap_or(Period::ZERO);

    let total = match input_path(&cli, &config) {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            tally(BufReader::new(file), seed)?
        }
        None => tally(std::io::stdin().lock(), seed)?,
    };

    if cli.json {
        let rendered = serde_json::json!({ "total": total, "total_ms": total.millis() });
        println!("{rendered}");
    } else {
        println!("{total}");
    }

    Ok(())
}

/// Resolves the input source: an explicit file argument wins, then the
/// configured notes file. `-` and "nothing configured" both mean stdin.
fn input_path(cli: &Cli, config: &Config) -> Option<PathBuf> {
    match &cli.file {
        Some(path) if path.as_os_str() == "-" => None,
        Some(path) => Some(path.clone()),
        None => config.notes_path.clone(),
    }
}

fn tally<R: BufRead>(reader: R, seed: Period) -> Result<Period> {
    Tally::seeded(seed)
        .collect(reader)
        .context("failed to tally input")
}
