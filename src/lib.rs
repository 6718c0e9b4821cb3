//! spacehoggers: find the biggest (or smallest) files and directories.
//!
//! The scanner walks a tree and produces [`Entry`] rows carrying both the
//! logical size and the block-based disk usage. Rows are ranked with
//! [`rank`] and rendered as fixed-width text by [`Report`].

pub mod entry;
pub mod error;
pub mod format;
pub mod rank;
pub mod report;
pub mod scanner;
pub mod size;

pub use entry::{Entry, Listing};
pub use error::ScanError;
pub use format::{format_bytes, format_signed};
pub use rank::{Direction, SortKey, rank};
pub use report::Report;
pub use scanner::{FailurePolicy, Mode, ScanObserver, Scanner};
pub use size::{DEFAULT_BLOCK_SIZE, Footprint, SizeAccessor};
