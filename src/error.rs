//! Typed errors raised by the scanning core.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors surfaced by the listers, the aggregator and the pure helpers.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    #[error("failed to traverse '{}': {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ScanError {
    /// Classify an I/O failure on `path` by its error kind.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::PathNotFound {
                path: path.to_path_buf(),
            },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => Self::Traversal {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// Convert a walker error, falling back to `fallback` when the walker
    /// could not attribute the failure to a path.
    pub fn from_walk(fallback: &Path, err: jwalk::Error) -> Self {
        let path = err.path().unwrap_or(fallback).to_path_buf();
        let message = err.to_string();
        match err.into_io_error() {
            Some(source) => Self::from_io(&path, source),
            // symlink loops carry no I/O error
            None => Self::Traversal {
                path,
                source: io::Error::other(message),
            },
        }
    }

    /// The filesystem path this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::PathNotFound { path }
            | Self::PermissionDenied { path }
            | Self::Traversal { path, .. } => Some(path),
            Self::InvalidArgument(_) => None,
        }
    }
}
