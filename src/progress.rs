//! Spinner on stderr while the scan runs.

use humansize::{BINARY, format_size};
use indicatif::{ProgressBar, ProgressStyle};
use spacehoggers::{Footprint, ScanObserver};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Minimum time between two message refreshes
const REFRESH: Duration = Duration::from_millis(50);

/// Scan progress shown as a spinner
#[derive(Clone)]
pub struct Progress {
    pb: ProgressBar,
    state: Rc<State>,
}

struct State {
    files: Cell<u64>,
    bytes: Cell<u64>,
    last_update: Cell<Instant>,
}

impl Progress {
    /// Start a spinner; it stays hidden when stderr is not a terminal
    pub fn start(root: &Path) -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Scanning {}...", root.display()));

        Self {
            pb,
            state: Rc::new(State {
                files: Cell::new(0),
                bytes: Cell::new(0),
                last_update: Cell::new(Instant::now()),
            }),
        }
    }

    /// Remove the spinner before the report is printed
    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl ScanObserver for Progress {
    fn file_counted(&self, path: &Path, footprint: Footprint) {
        let state = &self.state;
        state.files.set(state.files.get() + 1);
        state.bytes.set(state.bytes.get().saturating_add(footprint.size));

        // Throttled to avoid flickering
        if state.last_update.get().elapsed() < REFRESH {
            return;
        }
        state.last_update.set(Instant::now());

        let dir_name = path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.pb.set_message(format!(
            "Scanning: {} | {} files | {}",
            truncate_str(&dir_name, 20),
            format_number(state.files.get()),
            format_size(state.bytes.get(), BINARY)
        ));
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Truncate a string to max characters with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
