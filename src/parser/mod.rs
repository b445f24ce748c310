//! Parsers for genomic file formats.

pub mod gff;
pub mod util;
pub mod vcf;

pub use gff::{extract_attribute, split_feature_line};
pub use vcf::{aggregate_variants, read_vcf_file};
