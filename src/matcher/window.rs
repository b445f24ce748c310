//! Expanding-window feature lookup.
//!
//! A lookup scans the whole annotation file for features of one type that
//! contain a position. When a scan comes back empty the window is widened
//! symmetrically and the file is scanned again from the start. Nothing is
//! indexed or cached between scans.

use anyhow::{Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::config::Config;
use crate::parser::gff::split_feature_line;
use crate::parser::util::{is_skippable, open_reader};
use crate::types::{AnnotationLine, FeatureLookup};

/// Result of a single pass over the annotation file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowScan {
    /// Lines of the requested type on the chromosome that contain the position.
    pub lines: Vec<AnnotationLine>,
    /// Whether any line of the requested type exists on the chromosome at all.
    pub candidates_seen: bool,
}

/// Scan `path` once with a fixed window radius.
pub fn scan_window(
    path: &Path,
    chrom: &str,
    position: i64,
    radius: i64,
    feature_type: &str,
) -> Result<WindowScan> {
    let reader = open_reader(path)?;
    scan_reader(reader, chrom, position, radius, feature_type)
        .with_context(|| format!("Failed to scan annotation file {}", path.display()))
}

/// Scan annotation data from a reader with a fixed window radius.
fn scan_reader<R: BufRead>(
    reader: R,
    chrom: &str,
    position: i64,
    radius: i64,
    feature_type: &str,
) -> Result<WindowScan> {
    let mut scan = WindowScan::default();

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.context("Failed to read annotation line")?;
        let line = line.trim();
        if is_skippable(line) {
            continue;
        }

        let Some(cols) = split_feature_line(line) else {
            continue;
        };
        if cols.feature_type != feature_type || cols.chrom != chrom {
            continue;
        }
        scan.candidates_seen = true;

        let feature = cols
            .to_annotation(line)
            .with_context(|| format!("line {}", idx + 1))?;
        if feature.contains(position, radius) {
            scan.lines.push(feature);
        }
    }

    Ok(scan)
}

/// Find all `feature_type` lines overlapping `chrom:position`.
///
/// Starts with radius 0 and widens by `config.window_step` after every empty
/// scan. Gives up with [`FeatureLookup::NotFound`] once the radius would
/// exceed `config.max_window`, or straight away if the chromosome carries no
/// feature of that type.
pub fn find_overlapping_features(
    path: &Path,
    chrom: &str,
    position: i64,
    feature_type: &str,
    config: &Config,
) -> Result<FeatureLookup> {
    let mut radius = 0;

    loop {
        let scan = scan_window(path, chrom, position, radius, feature_type)?;

        if !scan.lines.is_empty() {
            log::info!("Result found at extension {}", radius);
            return Ok(FeatureLookup::Found {
                radius,
                lines: scan.lines,
            });
        }

        if !scan.candidates_seen {
            log::warn!(
                "No {} features on {} in {}",
                feature_type,
                chrom,
                path.display()
            );
            return Ok(FeatureLookup::NotFound {
                max_radius_tried: radius,
            });
        }

        let next = match radius.checked_add(config.window_step) {
            Some(next) if next <= config.max_window => next,
            _ => {
                log::warn!(
                    "No {} feature within {} of {}:{}",
                    feature_type,
                    radius,
                    chrom,
                    position
                );
                return Ok(FeatureLookup::NotFound {
                    max_radius_tried: radius,
                });
            }
        };

        log::debug!(
            "Nothing at {}:{} within {}, widening to {}",
            chrom,
            position,
            radius,
            next
        );
        radius = next;
    }
}
