//! spacehoggers: find the biggest (or smallest) files and directories.
//!
//! Scans the entries under a directory and prints them sorted by logical
//! size or disk usage, largest first unless reversed.

mod cli;
mod progress;

use anyhow::{Context, Result};
use cli::Args;
use progress::Progress;
use spacehoggers::{Report, Scanner, SizeAccessor, rank};
use std::io::IsTerminal;
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse_args();
    init_logging(&args);

    let root = args.root().to_path_buf();

    // Validate the path exists
    let metadata = std::fs::metadata(&root)
        .with_context(|| format!("Cannot access path '{}'", root.display()))?;

    if !metadata.is_dir() {
        anyhow::bail!("'{}' is not a directory", root.display());
    }

    // Configure and run the scanner
    let progress = Progress::start(&root);
    let scanner = Scanner::new()
        .with_sizes(SizeAccessor::new(args.block_size)?)
        .follow_links(args.follow_links)
        .with_policy(args.on_error)
        .with_observer(Box::new(progress.clone()));

    let result = scanner.scan(&root, args.mode());
    progress.finish();
    let listing = result.with_context(|| format!("Failed to scan '{}'", root.display()))?;

    for warning in listing.warnings() {
        warn!("{}", warning);
    }

    let total = listing.total();
    let count = listing.len();
    let (entries, _) = listing.into_parts();
    let ranked = rank(entries, args.sort, args.direction(), args.limit);

    // Display results
    let mut report = Report::new();
    if args.total {
        report = report.with_total(total, count);
    }
    report.print(&ranked).context("Failed to write report")?;

    Ok(())
}

/// Diagnostics go to stderr so they never mix with the report.
/// RUST_LOG, when set, takes precedence over the command line.
fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level().as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
