//! Utility functions for file parsing.

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open `path` for line-oriented reading, decompressing `.gz` files on the fly.
///
/// The error names the path that could not be opened.
pub fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// True if the path carries a `.gz` suffix.
pub fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().ends_with(".gz")
}

/// True for blank lines and `#` header/comment lines.
pub fn is_skippable(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}
