//! Ordering and truncation of entries.

use crate::entry::Entry;
use crate::error::ScanError;
use std::fmt;
use std::str::FromStr;

/// Metric entries are ranked by.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Logical size
    #[default]
    BySize,
    /// Disk usage
    ByUsage,
}

impl SortKey {
    fn value(self, entry: &Entry) -> u64 {
        match self {
            SortKey::BySize => entry.size(),
            SortKey::ByUsage => entry.usage(),
        }
    }
}

impl FromStr for SortKey {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "size" => Ok(SortKey::BySize),
            "usage" => Ok(SortKey::ByUsage),
            other => Err(ScanError::InvalidArgument(format!(
                "unknown sort key '{}' (expected 'size' or 'usage')",
                other
            ))),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::BySize => f.write_str("size"),
            SortKey::ByUsage => f.write_str("usage"),
        }
    }
}

/// Largest first unless reversed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Largest first
    #[default]
    Descending,
    /// Smallest first
    Ascending,
}

impl Direction {
    /// `Ascending` when `reverse` is set
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Direction::Ascending
        } else {
            Direction::Descending
        }
    }
}

/// Stable-sort `entries` by `key` and keep at most `limit` of them.
///
/// A `limit` of zero keeps everything.
pub fn rank(mut entries: Vec<Entry>, key: SortKey, direction: Direction, limit: usize) -> Vec<Entry> {
    entries.sort_by(|a, b| {
        let ord = key.value(a).cmp(&key.value(b));
        match direction {
            Direction::Descending => ord.reverse(),
            Direction::Ascending => ord,
        }
    });

    if limit > 0 {
        entries.truncate(limit);
    }
    entries
}
