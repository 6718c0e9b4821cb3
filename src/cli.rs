//! Command-line argument parsing using clap derive macros.

use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};
use spacehoggers::{DEFAULT_BLOCK_SIZE, Direction, FailurePolicy, Mode, SortKey};
use std::path::{Path, PathBuf};

/// Find the biggest (or smallest) files and directories.
///
/// Summarizes each entry directly under PATH, or lists every file with
/// --all, sorted by logical size or by disk usage.
#[derive(Parser, Debug)]
#[command(name = "spacehoggers")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Directory to check (defaults to current directory)
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Directory to check; takes precedence over PATH
    #[arg(short = 'R', long = "root", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// List all files instead of summarizing directories
    #[arg(short, long)]
    pub all: bool,

    /// Sort by: size or usage
    #[arg(short, long, value_name = "OPTION", default_value = "size")]
    pub sort: SortKey,

    /// Reverse order (smallest to largest)
    #[arg(short, long)]
    pub reverse: bool,

    /// How many results to display (0 for all)
    #[arg(short = 'l', long = "limit", visible_alias = "count", default_value = "10")]
    pub limit: usize,

    /// Bytes per block when computing disk usage
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_BLOCK_SIZE,
          value_parser = clap::value_parser!(u64).range(1..))]
    pub block_size: u64,

    /// What to do with unreadable paths: skip or abort
    /// [default: skip when summarizing, abort with --all]
    #[arg(long = "on-error", value_name = "POLICY")]
    pub on_error: Option<FailurePolicy>,

    /// Follow symbolic links
    #[arg(short = 'L', long)]
    pub follow_links: bool,

    /// Print a total row after the listing
    #[arg(short, long)]
    pub total: bool,

    /// Log level [default: info]
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Run in debug mode
    #[arg(short, long, env = "DEBUG", value_parser = FalseyValueParser::new())]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    #[value(alias = "fatal", alias = "panic")]
    Error,
}

impl LogLevel {
    /// Directive understood by the tracing env filter
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Directory to scan, --root first
    pub fn root(&self) -> &Path {
        self.root.as_deref().unwrap_or(&self.path)
    }

    /// Listing mode selected by --all
    pub fn mode(&self) -> Mode {
        if self.all { Mode::AllFiles } else { Mode::Summarize }
    }

    /// Ascending when --reverse is set
    pub fn direction(&self) -> Direction {
        Direction::from_reverse(self.reverse)
    }

    /// An explicit --log-level wins over --debug
    pub fn log_level(&self) -> LogLevel {
        match self.log_level {
            Some(level) => level,
            None if self.debug => LogLevel::Debug,
            None => LogLevel::Info,
        }
    }
}
