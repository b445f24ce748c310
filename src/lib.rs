//! varmatch - DNA/RNA variant cross-referencing library.
//!
//! This library collects variant calls from DNA and RNA VCF sources, finds
//! the loci called in both, and resolves the annotation features (from a GFF
//! file) overlapping each of them.
//!
//! # Features
//!
//! - Read VCF files or directories of VCF files (with gzip support)
//! - Join DNA and RNA calls by chromosome and position
//! - Look up overlapping features with a widening search window
//! - Print a per-variant report and an overall match rate
//!
//! # Example
//!
//! ```ignore
//! use varmatch::config::Config;
//! use varmatch::parser::aggregate_variants;
//! use varmatch::output::generate_report;
//!
//! let mut config = Config::default();
//! config.dna_path = "dna/".into();
//! config.rna_path = "rna/".into();
//! config.annotation_path = "ref_genome.gff".into();
//!
//! let table = aggregate_variants(&config)?;
//! let summary = generate_report(&mut std::io::stdout(), &table, &config)?;
//! ```

pub mod config;
pub mod matcher;
pub mod output;
pub mod parser;
pub mod types;

pub use config::Config;
pub use types::{
    AnnotationLine, FeatureLookup, ReportError, SourceKind, VariantKey, VariantRecord, VariantTable,
};
