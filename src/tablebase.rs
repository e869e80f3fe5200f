//! A persistent, memory-mapped bitmap indexed by position index
//!
//! The solver needs two of these: one recording the game value (`value`) and
//! one recording whether that value is decided yet (`known`). Both are plain
//! 2 MiB bit arrays with no header, matching the index space of `2^24`
//! positions one-for-one.

use std::fs::{File, OpenOptions};
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::{MmapMut, MmapOptions};

/// The number of addressable indices: `2^24`
pub const INDEX_COUNT: usize = 1 << 24;

/// The size in bytes of a tablebase file: one bit per index
pub const FILE_SIZE: u64 = (INDEX_COUNT / 8) as u64;

/// A memory-mapped bitmap of `2^24` bits, backed by a file on disk
///
/// Bit *i* lives in byte `i / 8`, position `i % 8`, least-significant bit
/// first. [`TableBase::set_bit`] is a monotone-set operation: it can only
/// ever turn a bit on, never off, matching the solver's write pattern of
/// permanent, one-way classification.
pub struct TableBase {
    mmap: MmapMut,
}

impl TableBase {
    /// Creates a fresh, zero-filled tablebase file at `path`, truncating any
    /// existing contents
    ///
    /// Always zero-filling on creation avoids a solver run silently
    /// observing stale `1` bits left over from an aborted earlier pass (see
    /// the crate's design notes on this); callers that want to resume a
    /// prior run must use [`TableBase::open_existing`] explicitly.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to create tablebase file at {}", path.display()))?;

        file.set_len(FILE_SIZE)
            .with_context(|| format!("failed to size tablebase file at {}", path.display()))?;

        Self::map(file, path)
    }

    /// Opens an existing tablebase file at `path`, preserving its contents
    ///
    /// The file must already exist and be exactly [`FILE_SIZE`] bytes, it is
    /// not created or resized.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .with_context(|| format!("failed to open tablebase file at {}", path.display()))?;

        let len = file
            .metadata()
            .with_context(|| format!("failed to stat tablebase file at {}", path.display()))?
            .len();
        anyhow::ensure!(
            len == FILE_SIZE,
            "tablebase file {} has size {} bytes, expected {}",
            path.display(),
            len,
            FILE_SIZE
        );

        Self::map(file, path)
    }

    fn map(file: File, path: &Path) -> Result<Self> {
        // SAFETY: the file is exclusively ours for the duration of the mapping;
        // this process does not coordinate with any other mutator of the file.
        let mmap = unsafe {
            MmapOptions::new()
                .map_mut(&file)
                .with_context(|| format!("failed to mmap tablebase file at {}", path.display()))?
        };
        Ok(Self { mmap })
    }

    /// Reads bit `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= `[`INDEX_COUNT`].
    pub fn read_bit(&self, i: u32) -> bool {
        let i = i as usize;
        debug_assert!(i < INDEX_COUNT);
        (self.mmap[i / 8] >> (i % 8)) & 1 != 0
    }

    /// Sets bit `i` if `v` is true
    ///
    /// If `v` is false, this is a no-op: the tablebase never clears a bit
    /// once set, since solver classifications are permanent.
    ///
    /// # Panics
    ///
    /// Panics if `i >= `[`INDEX_COUNT`].
    pub fn set_bit(&mut self, i: u32, v: bool) {
        let i = i as usize;
        debug_assert!(i < INDEX_COUNT);
        if v {
            self.mmap[i / 8] |= 1 << (i % 8);
        }
    }

    /// Flushes pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.mmap.flush().context("failed to flush tablebase mmap")
    }
}
