//! GFF feature line parsing.
//!
//! Annotation files are never loaded wholesale; the feature resolver streams
//! them line by line and uses the helpers here to split each line into its
//! fixed columns and pull values out of the attributes column.

use anyhow::{Context, Result};

use crate::types::AnnotationLine;

/// Number of fixed leading columns every feature line must carry.
pub const MIN_FEATURE_COLUMNS: usize = 5;

/// A feature line split into columns, with coordinates still unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureColumns<'a> {
    pub chrom: &'a str,
    pub source: &'a str,
    pub feature_type: &'a str,
    start: &'a str,
    end: &'a str,
    rest: Vec<&'a str>,
}

/// Split a trimmed feature line on tabs.
///
/// Returns `None` for lines with fewer than five columns.
pub fn split_feature_line(line: &str) -> Option<FeatureColumns<'_>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_FEATURE_COLUMNS {
        return None;
    }

    Some(FeatureColumns {
        chrom: fields[0],
        source: fields[1],
        feature_type: fields[2],
        start: fields[3],
        end: fields[4],
        rest: fields[MIN_FEATURE_COLUMNS..].to_vec(),
    })
}

impl FeatureColumns<'_> {
    /// Parse the start coordinate.
    pub fn start(&self) -> Result<i64> {
        self.start
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse start coordinate '{}'", self.start))
    }

    /// Parse the end coordinate.
    pub fn end(&self) -> Result<i64> {
        self.end
            .trim()
            .parse()
            .with_context(|| format!("Failed to parse end coordinate '{}'", self.end))
    }

    /// Build an owned annotation line, parsing both coordinates.
    pub fn to_annotation(&self, raw: &str) -> Result<AnnotationLine> {
        Ok(AnnotationLine {
            chrom: self.chrom.to_string(),
            source: self.source.to_string(),
            feature_type: self.feature_type.to_string(),
            start: self.start()?,
            end: self.end()?,
            rest: self.rest.iter().map(|s| s.to_string()).collect(),
            raw: raw.to_string(),
        })
    }
}

/// Extract a value from a GFF attributes column.
///
/// Attributes look like `ID=gene1;Name=BRCA1;Note=x`. The value of the first
/// `;`-separated token starting with `key_prefix` (e.g. `"Name="`) is
/// returned.
pub fn extract_attribute<'a>(attributes: &'a str, key_prefix: &str) -> Option<&'a str> {
    attributes
        .split(';')
        .map(str::trim)
        .find_map(|token| token.strip_prefix(key_prefix))
}
