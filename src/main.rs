use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use linesnip::Driver;
use tracing_subscriber::EnvFilter;

/// Cut page images into line snippets with matching ground-truth files
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Region descriptor JSON files to process, in order
    #[arg(required = true, value_name = "REGION")]
    regions: Vec<PathBuf>,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    for path in &args.regions {
        Driver::process_descriptor(path)
            .with_context(|| format!("failed to segment {}", path.display()))?;
    }
    Ok(())
}
