//! Output formatting and display logic.

use crate::entry::Entry;
use crate::format::format_bytes;
use crate::size::Footprint;
use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

/// Width of the logical size column
pub const SIZE_WIDTH: usize = 10;
/// Width of the disk usage column
pub const USAGE_WIDTH: usize = 12;

const SEPARATOR_WIDTH: usize = 28;

/// Report configuration
#[derive(Debug, Default)]
pub struct Report {
    /// Sum over every listed entry, before truncation, and how many there were
    total: Option<(Footprint, usize)>,
}

impl Report {
    /// Create a new Report with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a total row
    pub fn with_total(mut self, total: Footprint, count: usize) -> Self {
        self.total = Some((total, count));
        self
    }

    /// Render the report as plain text lines
    pub fn lines(&self, entries: &[Entry]) -> Vec<String> {
        let mut lines = Vec::with_capacity(entries.len() + 4);
        lines.push(row("Size", "Usage", "Path"));
        lines.push(separator());
        lines.extend(entries.iter().map(render_entry));

        if let Some((total, count)) = self.total {
            lines.push(separator());
            lines.push(row(
                &format_bytes(total.size),
                &format_bytes(total.usage),
                &format!("total ({} entries)", count),
            ));
        }
        lines
    }

    /// Write the report to stdout, styling header rows on a terminal
    pub fn print(&self, entries: &[Entry]) -> io::Result<()> {
        let styled = io::stdout().is_terminal();
        let mut out = io::stdout().lock();

        for (idx, line) in self.lines(entries).iter().enumerate() {
            if !styled {
                writeln!(out, "{}", line)?;
            } else if idx == 0 {
                writeln!(out, "{}", line.bold())?;
            } else if line.starts_with('-') {
                writeln!(out, "{}", line.dimmed())?;
            } else {
                writeln!(out, "{}", line)?;
            }
        }
        out.flush()
    }
}

fn render_entry(entry: &Entry) -> String {
    row(
        &format_bytes(entry.size()),
        &format_bytes(entry.usage()),
        &entry.full_path().display().to_string(),
    )
}

/// Fixed-width columns; wider values overflow rather than being cut.
fn row(size: &str, usage: &str, path: &str) -> String {
    format!(
        "{:>sw$}{:>uw$}  {}",
        size,
        usage,
        path,
        sw = SIZE_WIDTH,
        uw = USAGE_WIDTH
    )
}

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}
