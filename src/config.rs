//! Configuration and defaults for varmatch.
//!
//! This module contains the run configuration shared by the variant
//! aggregator, the feature resolver and the reporter. It is built once at
//! startup and passed around by reference.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use crate::types::SourceKind;

/// Default annotation feature type to match.
pub const DEFAULT_FEATURE_TYPE: &str = "gene";

/// Default amount the search window grows by per retry, in bp.
pub const DEFAULT_WINDOW_STEP: i64 = 10;

/// Default upper bound on the search window radius, in bp.
pub const DEFAULT_MAX_WINDOW: i64 = 100_000;

/// Configuration for a single run.
#[derive(Debug, Clone)]
pub struct Config {
    /// DNA variant file or directory of VCF files.
    pub dna_path: PathBuf,
    /// RNA variant file or directory of VCF files.
    pub rna_path: PathBuf,
    /// Feature annotation file (GFF, optionally gzipped).
    pub annotation_path: PathBuf,
    /// Annotation feature type to match (exact, case-sensitive).
    pub feature_type: String,
    /// Radius increment applied after an empty scan.
    pub window_step: i64,
    /// Largest radius tried before reporting a feature as not found.
    pub max_window: i64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dna_path: PathBuf::new(),
            rna_path: PathBuf::new(),
            annotation_path: PathBuf::new(),
            feature_type: DEFAULT_FEATURE_TYPE.to_string(),
            window_step: DEFAULT_WINDOW_STEP,
            max_window: DEFAULT_MAX_WINDOW,
        }
    }
}

impl Config {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Variant sources in the order they are aggregated.
    pub fn sources(&self) -> [(SourceKind, &Path); 2] {
        [
            (SourceKind::Dna, self.dna_path.as_path()),
            (SourceKind::Rna, self.rna_path.as_path()),
        ]
    }

    /// Check the numeric and string settings.
    pub fn validate(&self) -> Result<()> {
        if self.window_step <= 0 {
            bail!("The window step must be greater than 0 bps.");
        }
        if self.max_window < 0 {
            bail!("The maximum window cannot be lower than 0 bps.");
        }
        if self.feature_type.is_empty() {
            bail!("The feature type cannot be empty.");
        }
        Ok(())
    }
}
