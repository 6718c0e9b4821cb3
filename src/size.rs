//! Logical size and block-based disk usage of a single file.

use crate::error::ScanError;
use std::fs::Metadata;
use std::ops::{Add, AddAssign};

/// Unit the block count is multiplied by. Matches the accounting unit of
/// `du`, not the `st_blksize` reported by the filesystem.
pub const DEFAULT_BLOCK_SIZE: u64 = 512;

/// Apparent size and physical disk usage, in bytes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    /// Apparent length of the content
    pub size: u64,
    /// Storage consumed on disk
    pub usage: u64,
}

impl Footprint {
    /// Create a new Footprint
    pub fn new(size: u64, usage: u64) -> Self {
        Self { size, usage }
    }
}

impl Add for Footprint {
    type Output = Footprint;

    fn add(self, rhs: Self) -> Self::Output {
        Footprint {
            size: self.size.saturating_add(rhs.size),
            usage: self.usage.saturating_add(rhs.usage),
        }
    }
}

impl AddAssign for Footprint {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for Footprint {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Footprint::default(), Add::add)
    }
}

/// Derives a [`Footprint`] from file metadata.
///
/// Disk usage is `blocks * block_size`. On platforms whose metadata carries
/// no block count, disk usage falls back to the logical size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeAccessor {
    block_size: u64,
}

impl Default for SizeAccessor {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl SizeAccessor {
    /// Create an accessor with a custom block unit. Zero is rejected.
    pub fn new(block_size: u64) -> Result<Self, ScanError> {
        if block_size == 0 {
            return Err(ScanError::InvalidArgument(
                "block size must be greater than zero".into(),
            ));
        }
        Ok(Self { block_size })
    }

    /// Bytes per block
    pub fn block_size(&self) -> u64 {
        self.block_size
    }

    /// Footprint of a regular file.
    pub fn footprint(&self, metadata: &Metadata) -> Footprint {
        self.footprint_from(metadata.len(), block_count(metadata))
    }

    /// Footprint from a raw length and an optional block count.
    pub fn footprint_from(&self, len: u64, blocks: Option<u64>) -> Footprint {
        let usage = match blocks {
            Some(blocks) => blocks.saturating_mul(self.block_size),
            None => len,
        };
        Footprint::new(len, usage)
    }
}

#[cfg(unix)]
fn block_count(metadata: &Metadata) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    Some(metadata.blocks())
}

#[cfg(not(unix))]
fn block_count(_metadata: &Metadata) -> Option<u64> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_zero_block_size_rejected() {
        assert!(matches!(
            SizeAccessor::new(0),
            Err(ScanError::InvalidArgument(_))
        ));
        assert_eq!(SizeAccessor::new(4096).unwrap().block_size(), 4096);
    }

    #[test]
    fn test_footprint_from() {
        let sizes = SizeAccessor::default();
        assert_eq!(sizes.footprint_from(0, Some(0)), Footprint::new(0, 0));
        assert_eq!(sizes.footprint_from(100, Some(8)), Footprint::new(100, 4096));
        // sparse file: fewer blocks than the apparent length needs
        assert_eq!(
            sizes.footprint_from(1 << 30, Some(0)),
            Footprint::new(1 << 30, 0)
        );
        assert_eq!(sizes.footprint_from(1234, None), Footprint::new(1234, 1234));
    }

    #[test]
    fn test_custom_block_size() {
        let sizes = SizeAccessor::new(1024).unwrap();
        assert_eq!(sizes.footprint_from(10, Some(3)).usage, 3072);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty");
        fs::write(&path, "").unwrap();

        let meta = fs::metadata(&path).unwrap();
        assert_eq!(SizeAccessor::default().footprint(&meta), Footprint::new(0, 0));
    }

    #[cfg(unix)]
    #[test]
    fn test_usage_is_blocks_times_512() {
        use std::os::unix::fs::MetadataExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("data.bin");
        fs::write(&path, vec![7u8; 10_000]).unwrap();

        let meta = fs::metadata(&path).unwrap();
        let fp = SizeAccessor::default().footprint(&meta);
        assert_eq!(fp.size, 10_000);
        assert_eq!(fp.usage, meta.blocks() * 512);
    }

    #[test]
    fn test_footprint_sum() {
        let total: Footprint = [Footprint::new(10, 512), Footprint::new(20, 0)]
            .into_iter()
            .sum();
        assert_eq!(total, Footprint::new(30, 512));
    }
}
