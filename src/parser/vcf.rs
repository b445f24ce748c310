//! VCF reader and DNA/RNA variant aggregation.
//!
//! Each source is either a single VCF file or a directory of VCF files
//! (plain or gzip). Calls from every file are folded into one
//! [`VariantTable`] keyed by chromosome and position.

use anyhow::{Context, Result};
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::parser::util::{is_skippable, open_reader};
use crate::types::{SourceKind, VariantKey, VariantRecord, VariantTable};

/// Fixed VCF columns needed to build a call: CHROM, POS, ID, REF, ALT.
const MIN_VCF_COLUMNS: usize = 5;

/// One variant call parsed from a VCF data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfCall {
    pub chrom: String,
    pub position: i64,
    pub ref_allele: String,
    pub alt: String,
}

/// Parse a single VCF data line.
///
/// Lines with fewer than five columns, and reference-only calls (`ALT` of
/// `.`), yield `Ok(None)`. A non-numeric position is an error.
pub fn parse_vcf_line(line: &str) -> Result<Option<VcfCall>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < MIN_VCF_COLUMNS {
        return Ok(None);
    }

    let alt = fields[4];
    if alt == "." {
        return Ok(None);
    }

    let position: i64 = fields[1]
        .parse()
        .with_context(|| format!("Failed to parse position '{}'", fields[1]))?;

    Ok(Some(VcfCall {
        chrom: fields[0].to_string(),
        position,
        ref_allele: fields[3].to_string(),
        alt: alt.to_string(),
    }))
}

/// List the VCF files making up a source.
///
/// A file path is returned as-is. A directory yields its `*.vcf` and
/// `*.vcf.gz` entries in sorted order.
pub fn vcf_files(path: &Path) -> Result<Vec<PathBuf>> {
    let meta = fs::metadata(path)
        .with_context(|| format!("Failed to access variant source {}", path.display()))?;

    if !meta.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(path)
        .with_context(|| format!("Failed to list variant directory {}", path.display()))?
    {
        let entry = entry.context("Failed to read directory entry")?;
        let file_path = entry.path();
        let name = file_path.to_string_lossy();
        if file_path.is_file() && (name.ends_with(".vcf") || name.ends_with(".vcf.gz")) {
            files.push(file_path);
        }
    }
    files.sort();

    Ok(files)
}

/// Read one VCF file into `table`, returning the number of calls added.
pub fn read_vcf_file(path: &Path, source: SourceKind, table: &mut VariantTable) -> Result<usize> {
    let reader = open_reader(path)?;
    read_vcf_reader(reader, &path.display().to_string(), source, table)
        .with_context(|| format!("Failed to read VCF file {}", path.display()))
}

/// Read VCF data from a reader, tagging every hit with `label`.
fn read_vcf_reader<R: BufRead>(
    reader: R,
    label: &str,
    source: SourceKind,
    table: &mut VariantTable,
) -> Result<usize> {
    let mut calls = 0;

    for (idx, line_result) in reader.lines().enumerate() {
        let line = line_result.context("Failed to read VCF line")?;
        let line = line.trim_end();
        if is_skippable(line) {
            continue;
        }

        let Some(call) = parse_vcf_line(line).with_context(|| format!("line {}", idx + 1))?
        else {
            continue;
        };

        table
            .entry(VariantKey::new(call.chrom.clone(), call.position))
            .or_insert_with(|| VariantRecord::new(call.chrom, call.ref_allele))
            .observe(source, call.alt, label.to_string());
        calls += 1;
    }

    Ok(calls)
}

/// Build the variant table from the DNA and RNA sources named in `config`.
///
/// DNA files are read before RNA files, so table order follows DNA first.
pub fn aggregate_variants(config: &Config) -> Result<VariantTable> {
    let mut table = VariantTable::default();

    for (source, path) in config.sources() {
        let files = vcf_files(path)?;
        if files.is_empty() {
            log::warn!("No VCF files found in {} source {}", source, path.display());
        }

        for file in files {
            let calls = read_vcf_file(&file, source, &mut table)?;
            log::debug!("Read {} {} calls from {}", calls, source, file.display());
        }
    }

    log::info!("Aggregated {} variants", table.len());
    Ok(table)
}
