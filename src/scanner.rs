//! Directory walking: subtree totals and the two listing modes.

use crate::entry::{Entry, Listing};
use crate::error::ScanError;
use crate::size::{Footprint, SizeAccessor};
use jwalk::WalkDir;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// What one row of the listing stands for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One row per immediate child of the root, directories summed up
    #[default]
    Summarize,
    /// One row per regular file anywhere under the root
    AllFiles,
}

/// What a lister does when part of the tree cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Record the failure as a warning and keep going
    SkipAndContinue,
    /// Stop and return the first failure
    AbortOnFirstError,
}

impl FromStr for FailurePolicy {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skip" => Ok(FailurePolicy::SkipAndContinue),
            "abort" => Ok(FailurePolicy::AbortOnFirstError),
            other => Err(ScanError::InvalidArgument(format!(
                "unknown failure policy '{}' (expected 'skip' or 'abort')",
                other
            ))),
        }
    }
}

/// Receives a callback for every regular file that is counted.
pub trait ScanObserver {
    /// Called once per regular file included in a result
    fn file_counted(&self, path: &Path, footprint: Footprint);
}

/// Scanner configuration
#[derive(Default)]
pub struct Scanner {
    sizes: SizeAccessor,
    follow_links: bool,
    /// Overrides the per-mode default when set
    policy: Option<FailurePolicy>,
    observer: Option<Box<dyn ScanObserver>>,
}

impl Scanner {
    /// Create a new Scanner with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how file sizes are measured
    pub fn with_sizes(mut self, sizes: SizeAccessor) -> Self {
        self.sizes = sizes;
        self
    }

    /// Follow symbolic links during traversal
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Use one failure policy for both modes
    pub fn with_policy(mut self, policy: Option<FailurePolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Report every counted file to `observer`
    pub fn with_observer(mut self, observer: Box<dyn ScanObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Run the lister selected by `mode`
    pub fn scan(&self, root: &Path, mode: Mode) -> Result<Listing, ScanError> {
        match mode {
            Mode::Summarize => self.list_dir(root),
            Mode::AllFiles => self.list_files(root),
        }
    }

    /// Sum size and disk usage of every regular file below `dir`.
    ///
    /// Directories add nothing themselves. Any unreadable descendant fails
    /// the whole aggregation.
    pub fn aggregate(&self, dir: &Path) -> Result<Footprint, ScanError> {
        let mut total = Footprint::default();
        for entry_result in self.walker(dir) {
            let mut entry = entry_result.map_err(|err| ScanError::from_walk(dir, err))?;
            let path = entry.path();

            if let Some(err) = entry.read_children_error.take() {
                return Err(ScanError::from_walk(&path, err));
            }

            if let Some(footprint) = self.file_footprint(&path, entry.file_type())? {
                total += footprint;
            }
        }
        Ok(total)
    }

    /// One entry per immediate child of `root`, directories aggregated.
    ///
    /// Failing to read `root` itself is always fatal. A child that fails is
    /// skipped with a warning unless the policy says to abort.
    pub fn list_dir(&self, root: &Path) -> Result<Listing, ScanError> {
        let policy = self.policy.unwrap_or(FailurePolicy::SkipAndContinue);

        let mut children = Vec::new();
        for dir_entry in fs::read_dir(root).map_err(|err| ScanError::from_io(root, err))? {
            let dir_entry = dir_entry.map_err(|err| ScanError::from_io(root, err))?;
            children.push(dir_entry.file_name());
        }
        // read_dir order is filesystem-defined
        children.sort();

        let mut listing = Listing::new();
        for name in children {
            let path = root.join(&name);
            match self.child_footprint(&path) {
                Ok(footprint) => listing.push(Entry::new(name, root, footprint)),
                Err(err) => match policy {
                    FailurePolicy::AbortOnFirstError => return Err(err),
                    FailurePolicy::SkipAndContinue => {
                        debug!("skipping {}: {}", path.display(), err);
                        listing.warn(err);
                    }
                },
            }
        }
        Ok(listing)
    }

    /// One entry per regular file anywhere under `root`.
    ///
    /// Aborts on the first unreadable path unless the policy says to skip.
    pub fn list_files(&self, root: &Path) -> Result<Listing, ScanError> {
        let policy = self.policy.unwrap_or(FailurePolicy::AbortOnFirstError);
        fs::metadata(root).map_err(|err| ScanError::from_io(root, err))?;

        let mut listing = Listing::new();
        let handle = |listing: &mut Listing, err: ScanError| match policy {
            FailurePolicy::AbortOnFirstError => Err(err),
            FailurePolicy::SkipAndContinue => {
                debug!("skipping: {}", err);
                listing.warn(err);
                Ok(())
            }
        };

        for entry_result in self.walker(root) {
            let mut entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    handle(&mut listing, ScanError::from_walk(root, err))?;
                    continue;
                }
            };
            let path = entry.path();

            if let Some(err) = entry.read_children_error.take() {
                handle(&mut listing, ScanError::from_walk(&path, err))?;
            }

            match self.file_footprint(&path, entry.file_type()) {
                Ok(Some(footprint)) => {
                    let (dir, name) = split_path(&path);
                    listing.push(Entry::new(name, dir, footprint));
                }
                Ok(None) => {}
                Err(err) => handle(&mut listing, err)?,
            }
        }
        Ok(listing)
    }

    fn walker(&self, root: &Path) -> WalkDir {
        WalkDir::new(root)
            .parallelism(jwalk::Parallelism::Serial)
            .skip_hidden(false)
            .follow_links(self.follow_links)
            .sort(true)
    }

    /// Footprint of a direct child of the listing root: a file on its own,
    /// a directory summed up, anything else counts as zero.
    fn child_footprint(&self, path: &Path) -> Result<Footprint, ScanError> {
        let metadata = self.metadata(path)?;
        if metadata.is_dir() {
            if path.is_symlink() {
                let target = fs::canonicalize(path).map_err(|err| ScanError::from_io(path, err))?;
                return self.aggregate(&target);
            }
            self.aggregate(path)
        } else if metadata.is_file() {
            let footprint = self.sizes.footprint(&metadata);
            self.notify(path, footprint);
            Ok(footprint)
        } else {
            Ok(Footprint::default())
        }
    }

    /// `Some` for regular files, `None` for everything else.
    fn file_footprint(
        &self,
        path: &Path,
        file_type: fs::FileType,
    ) -> Result<Option<Footprint>, ScanError> {
        // A link the walker reports as a link while following links has no
        // reachable target; stat it so the failure surfaces.
        let dangling = self.follow_links && file_type.is_symlink();
        if !file_type.is_file() && !dangling {
            return Ok(None);
        }

        let metadata = self.metadata(path)?;
        if !metadata.is_file() {
            return Ok(None);
        }
        let footprint = self.sizes.footprint(&metadata);
        self.notify(path, footprint);
        Ok(Some(footprint))
    }

    fn metadata(&self, path: &Path) -> Result<Metadata, ScanError> {
        let result = if self.follow_links {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };
        result.map_err(|err| ScanError::from_io(path, err))
    }

    fn notify(&self, path: &Path, footprint: Footprint) {
        if let Some(observer) = &self.observer {
            observer.file_counted(path, footprint);
        }
    }
}

/// Split into (containing directory, base name).
fn split_path(path: &Path) -> (PathBuf, std::ffi::OsString) {
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| path.as_os_str().to_os_string());
    (dir, name)
}
