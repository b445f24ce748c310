//! Report generation for varmatch results.
//!
//! This module walks the variant table, resolves annotation features for
//! every variant seen in both DNA and RNA, and writes the human-readable
//! summary.

use anyhow::Result;

use std::io::Write;

use crate::config::Config;
use crate::matcher::find_overlapping_features;
use crate::parser::gff::extract_attribute;
use crate::types::{
    AnnotationLine, FeatureLookup, ReportError, VariantKey, VariantRecord, VariantTable,
};

/// Counts gathered while writing a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSummary {
    /// Variants present in both the DNA and the RNA source.
    pub matches: usize,
    /// Variants examined.
    pub total: usize,
}

impl ReportSummary {
    /// Fraction of variants that are dual-source matches.
    ///
    /// Not scaled to a percentage, even though the summary line labels it `%`.
    pub fn ratio(&self) -> f64 {
        self.matches as f64 / self.total as f64
    }
}

/// Write the report header.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "Variants appearing at the same position in DNA and RNA\n")?;
    Ok(())
}

/// Format the identity and alleles line of a dual-source variant.
pub fn format_variant_line(key: &VariantKey, record: &VariantRecord) -> String {
    format!(
        "{} REF: {} ALT DNA: {} ALT RNA: {}",
        key,
        record.ref_allele,
        record.dna.as_deref().unwrap_or(""),
        record.rna.as_deref().unwrap_or("")
    )
}

/// Format one overlapping feature.
pub fn format_feature_line(feature: &AnnotationLine) -> String {
    let attributes = feature.attributes().unwrap_or("");
    format!(
        "Found Variant at gene: {}, ID:{}, Start:{}, End:{}",
        extract_attribute(attributes, "Name=").unwrap_or(""),
        extract_attribute(attributes, "ID=").unwrap_or(""),
        feature.start,
        feature.end
    )
}

/// Format the match ratio rounded to two decimals, without trailing zeros.
///
/// `0.5`, `1.0`, `0.67` and `0.0` are typical outputs.
pub fn format_ratio(ratio: f64) -> String {
    let mut s = format!("{:.2}", ratio);
    while s.ends_with('0') && !s.ends_with(".0") {
        s.pop();
    }
    s
}

/// Format the closing summary line.
pub fn format_summary(summary: &ReportSummary) -> String {
    format!(
        "Counted {} dna/rna variant matches, {} variants in total ({}%).",
        summary.matches,
        summary.total,
        format_ratio(summary.ratio())
    )
}

/// Write the block for one dual-source variant.
fn write_variant_block<W: Write>(
    writer: &mut W,
    idx: usize,
    key: &VariantKey,
    record: &VariantRecord,
    config: &Config,
) -> Result<()> {
    writeln!(writer, "\nVariant {}", idx)?;
    writeln!(writer, "{}", format_variant_line(key, record))?;

    let lookup = find_overlapping_features(
        &config.annotation_path,
        &record.chromosome,
        key.position,
        &config.feature_type,
        config,
    )?;
    match &lookup {
        FeatureLookup::Found { lines, .. } => {
            for feature in lines {
                writeln!(writer, "{}", format_feature_line(feature))?;
            }
        }
        FeatureLookup::NotFound { max_radius_tried } => {
            writeln!(
                writer,
                "No {} feature found within {} of {}",
                config.feature_type, max_radius_tried, key
            )?;
        }
    }

    writeln!(writer, "Variants appearing in files:")?;
    for hit in &record.hits {
        writeln!(writer, "{}", hit)?;
    }

    Ok(())
}

/// Write the full report for `table` and return the match counts.
///
/// Variants are numbered from 1 in table order, whether or not they match.
/// An empty table is rejected with [`ReportError::EmptyTable`] before
/// anything is written.
pub fn generate_report<W: Write>(
    writer: &mut W,
    table: &VariantTable,
    config: &Config,
) -> Result<ReportSummary> {
    if table.is_empty() {
        return Err(ReportError::EmptyTable.into());
    }

    write_header(writer)?;

    let mut summary = ReportSummary {
        matches: 0,
        total: 0,
    };

    for (idx, (key, record)) in table.iter().enumerate() {
        if record.is_dual_source() {
            write_variant_block(writer, idx + 1, key, record, config)?;
            summary.matches += 1;
        }
        summary.total += 1;
    }

    writeln!(writer, "\n\n{}", format_summary(&summary))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceKind;

    fn record(dna: Option<&str>, rna: Option<&str>) -> VariantRecord {
        let mut rec = VariantRecord::new("chr1".to_string(), "A".to_string());
        if let Some(alt) = dna {
            rec.observe(SourceKind::Dna, alt.to_string(), "d.vcf".to_string());
        }
        if let Some(alt) = rna {
            rec.observe(SourceKind::Rna, alt.to_string(), "r.vcf".to_string());
        }
        rec
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(0.5), "0.5");
        assert_eq!(format_ratio(1.0), "1.0");
        assert_eq!(format_ratio(0.0), "0.0");
        assert_eq!(format_ratio(2.0 / 3.0), "0.67");
        assert_eq!(format_ratio(0.25), "0.25");
    }

    #[test]
    fn test_format_summary_is_unscaled() {
        let summary = ReportSummary {
            matches: 2,
            total: 4,
        };
        assert_eq!(
            format_summary(&summary),
            "Counted 2 dna/rna variant matches, 4 variants in total (0.5%)."
        );
    }

    #[test]
    fn test_format_variant_line() {
        let key = VariantKey::new("chr1", 1500);
        let line = format_variant_line(&key, &record(Some("G"), Some("T")));
        assert_eq!(line, "chr1:1500 REF: A ALT DNA: G ALT RNA: T");
    }

    #[test]
    fn test_format_feature_line() {
        let raw = "chr1\tRefSeq\tgene\t100\t200\t.\t+\t.\tID=gene1;Name=BRCA1";
        let feature = crate::parser::gff::split_feature_line(raw)
            .unwrap()
            .to_annotation(raw)
            .unwrap();
        assert_eq!(
            format_feature_line(&feature),
            "Found Variant at gene: BRCA1, ID:gene1, Start:100, End:200"
        );
    }

    #[test]
    fn test_format_feature_line_missing_attributes() {
        let raw = "chr1\tRefSeq\tgene\t100\t200";
        let feature = crate::parser::gff::split_feature_line(raw)
            .unwrap()
            .to_annotation(raw)
            .unwrap();
        assert_eq!(
            format_feature_line(&feature),
            "Found Variant at gene: , ID:, Start:100, End:200"
        );
    }

    #[test]
    fn test_empty_table_is_error() {
        let mut output = Vec::new();
        let err = generate_report(&mut output, &VariantTable::default(), &Config::default())
            .unwrap_err();
        assert_eq!(err.downcast_ref::<ReportError>(), Some(&ReportError::EmptyTable));
        assert!(output.is_empty());
    }

    #[test]
    fn test_no_matches_skips_annotation() {
        // Annotation path is never opened when nothing is dual-source.
        let mut table = VariantTable::default();
        table.insert(VariantKey::new("chr1", 1), record(Some("G"), None));
        table.insert(VariantKey::new("chr1", 2), record(None, Some("G")));

        let mut output = Vec::new();
        let summary = generate_report(&mut output, &table, &Config::default()).unwrap();
        assert_eq!(summary, ReportSummary { matches: 0, total: 2 });

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("Variants appearing at the same position in DNA and RNA\n"));
        assert!(!text.contains("Variant 1"));
        assert!(text.contains("Counted 0 dna/rna variant matches, 2 variants in total (0.0%)."));
    }
}
