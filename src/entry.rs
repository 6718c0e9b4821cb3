//! Reportable entries and the result of a listing.

use crate::error::ScanError;
use crate::size::Footprint;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// One row of the report: a single file, or a directory subtree summed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    name: OsString,
    dir: PathBuf,
    footprint: Footprint,
}

impl Entry {
    /// Create a new Entry
    pub fn new(name: impl Into<OsString>, dir: impl Into<PathBuf>, footprint: Footprint) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            footprint,
        }
    }

    /// Base name of the entry
    pub fn name(&self) -> &OsStr {
        &self.name
    }

    /// Directory containing the entry, as supplied by the traversal
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Logical size in bytes
    pub fn size(&self) -> u64 {
        self.footprint.size
    }

    /// Disk usage in bytes
    pub fn usage(&self) -> u64 {
        self.footprint.usage
    }

    /// Size and disk usage together
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// `dir` joined with `name`
    pub fn full_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// Entries produced by a lister, plus the failures it chose to skip.
#[derive(Debug, Default)]
pub struct Listing {
    entries: Vec<Entry>,
    warnings: Vec<ScanError>,
}

impl Listing {
    /// Create a new empty Listing
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Record a failure that was skipped
    pub fn warn(&mut self, err: ScanError) {
        self.warnings.push(err);
    }

    /// Entries in the order they were listed
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Failures that were skipped instead of aborting the listing
    pub fn warnings(&self) -> &[ScanError] {
        &self.warnings
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entry was listed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every entry
    pub fn total(&self) -> Footprint {
        self.entries.iter().map(Entry::footprint).sum()
    }

    /// Split into entries and skipped failures
    pub fn into_parts(self) -> (Vec<Entry>, Vec<ScanError>) {
        (self.entries, self.warnings)
    }
}
