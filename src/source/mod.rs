//! Acquiring byte sources for the tokenizer.
//!
//! The tokenizer accepts any [`std::io::Read`]. This module covers the one
//! case that needs more than that: files on disk, which may be compressed.

pub mod compression;

pub use compression::{auto_detect_reader, Codec};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Open `path` for tokenizing, decompressing transparently.
///
/// # Errors
/// Returns an error if the file cannot be opened or its decoder cannot start.
pub fn open_path(path: impl AsRef<Path>) -> Result<Box<dyn Read>> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    auto_detect_reader(f, path)
        .with_context(|| format!("setup decompression for {}", path.display()))
}
