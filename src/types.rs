//! Core data structures for varmatch.
//!
//! This module contains the variant table produced by the aggregator, the
//! parsed annotation lines handed out by the feature resolver, and the small
//! error types shared between them.

use ahash::RandomState;
use indexmap::IndexMap;
use std::fmt;

/// Sequencing source a variant call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Dna,
    Rna,
}

impl SourceKind {
    /// Convert source kind to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Dna => "dna",
            SourceKind::Rna => "rna",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a variant: the locus DNA and RNA calls are joined on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub chrom: String,
    pub position: i64,
}

impl VariantKey {
    pub fn new(chrom: impl Into<String>, position: i64) -> Self {
        VariantKey {
            chrom: chrom.into(),
            position,
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chrom, self.position)
    }
}

/// Per-locus alleles observed across the DNA and RNA sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    pub chromosome: String,
    pub ref_allele: String,
    /// ALT allele(s) from the DNA source, comma-joined when multi-allelic.
    pub dna: Option<String>,
    /// ALT allele(s) from the RNA source.
    pub rna: Option<String>,
    /// Source files the variant was seen in, in order of encounter.
    pub hits: Vec<String>,
}

impl VariantRecord {
    /// Create an empty record for a chromosome and reference allele.
    pub fn new(chromosome: String, ref_allele: String) -> Self {
        VariantRecord {
            chromosome,
            ref_allele,
            dna: None,
            rna: None,
            hits: Vec::new(),
        }
    }

    /// Record an observation of this variant from one source file.
    ///
    /// A later observation from the same source replaces the stored allele;
    /// every observation is appended to `hits`.
    pub fn observe(&mut self, source: SourceKind, alt: String, file: String) {
        match source {
            SourceKind::Dna => self.dna = Some(alt),
            SourceKind::Rna => self.rna = Some(alt),
        }
        self.hits.push(file);
    }

    /// True when both a DNA and an RNA allele were observed.
    pub fn is_dual_source(&self) -> bool {
        self.dna.is_some() && self.rna.is_some()
    }
}

/// Insertion-ordered variant table.
pub type VariantTable = IndexMap<VariantKey, VariantRecord, RandomState>;

/// A single feature line from an annotation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLine {
    pub chrom: String,
    pub source: String,
    pub feature_type: String,
    pub start: i64,
    pub end: i64,
    /// Columns after `end` (score, strand, phase, attributes, ...).
    pub rest: Vec<String>,
    /// The original line with surrounding whitespace removed.
    pub raw: String,
}

impl AnnotationLine {
    /// The attributes column (column 9), if the line has one.
    pub fn attributes(&self) -> Option<&str> {
        self.rest.get(3).map(|s| s.as_str())
    }

    /// Check whether `position` lies inside the feature widened by `radius` on both sides.
    pub fn contains(&self, position: i64, radius: i64) -> bool {
        self.start.saturating_sub(radius) <= position
            && position <= self.end.saturating_add(radius)
    }
}

/// Outcome of a widening feature lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureLookup {
    /// Lines overlapping the position at the first radius that produced any.
    Found {
        radius: i64,
        lines: Vec<AnnotationLine>,
    },
    /// No line was found before giving up.
    NotFound { max_radius_tried: i64 },
}

impl FeatureLookup {
    /// Matched lines, empty when nothing was found.
    pub fn lines(&self) -> &[AnnotationLine] {
        match self {
            FeatureLookup::Found { lines, .. } => lines,
            FeatureLookup::NotFound { .. } => &[],
        }
    }
}

/// Errors raised while building the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// The variant table held no records, so no match rate can be computed.
    EmptyTable,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::EmptyTable => write!(f, "no variants to report"),
        }
    }
}

impl std::error::Error for ReportError {}
