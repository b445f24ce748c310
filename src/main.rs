//! CLI entry point for varmatch.

use anyhow::{bail, Result};
use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use varmatch::config::{Config, DEFAULT_MAX_WINDOW, DEFAULT_WINDOW_STEP};
use varmatch::output::generate_report;
use varmatch::parser::aggregate_variants;

/// DNA/RNA variant cross-referencing tool.
///
/// Reports variants called at the same position in DNA and RNA, together
/// with the annotation features overlapping each one.
#[derive(Parser, Debug)]
#[command(name = "varmatch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// DNA VCF file or directory of VCF files (required)
    #[arg(short = 'd', long = "dna")]
    dna: PathBuf,

    /// RNA VCF file or directory of VCF files (required)
    #[arg(short = 'r', long = "rna")]
    rna: PathBuf,

    /// GFF annotation file (required)
    #[arg(short = 'a', long = "annotation")]
    annotation: PathBuf,

    /// Annotation feature type to match
    #[arg(short = 'f', long = "feature", default_value = "gene")]
    feature: String,

    /// Search window growth per retry in bp
    #[arg(long = "window-step", default_value_t = DEFAULT_WINDOW_STEP)]
    window_step: i64,

    /// Maximum search window radius in bp
    #[arg(long = "max-window", default_value_t = DEFAULT_MAX_WINDOW)]
    max_window: i64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Validate inputs
    if !args.dna.exists() {
        bail!("DNA variant source not found: {}", args.dna.display());
    }
    if !args.rna.exists() {
        bail!("RNA variant source not found: {}", args.rna.display());
    }
    if !args.annotation.exists() {
        bail!("Annotation file not found: {}", args.annotation.display());
    }

    // Build configuration
    let mut config = Config::new();
    config.dna_path = args.dna;
    config.rna_path = args.rna;
    config.annotation_path = args.annotation;
    config.feature_type = args.feature;
    config.window_step = args.window_step;
    config.max_window = args.max_window;
    config.validate()?;

    log::info!(
        "Reading variants from {} and {}",
        config.dna_path.display(),
        config.rna_path.display()
    );
    let table = aggregate_variants(&config)?;

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let summary = generate_report(&mut writer, &table, &config)?;
    writer.flush()?;

    log::info!("Done: {} of {} variants matched", summary.matches, summary.total);
    Ok(())
}
