use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn data_dir() -> PathBuf {
    let cargo_manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(cargo_manifest_dir).join("tests").join("data")
}

fn varmatch() -> Command {
    Command::new(env!("CARGO_BIN_EXE_varmatch"))
}

#[test]
fn test_report_on_fixture_directories() -> Result<(), Box<dyn std::error::Error>> {
    let data = data_dir();

    let output = varmatch()
        .arg("-d")
        .arg(data.join("dna"))
        .arg("-r")
        .arg(data.join("rna"))
        .arg("-a")
        .arg(data.join("annotation.gff"))
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.starts_with("Variants appearing at the same position in DNA and RNA\n"));

    // chr1:1500 and chr2:800 are the dual-source calls, at table positions 1 and 3
    assert!(stdout.contains("\nVariant 1\nchr1:1500 REF: A ALT DNA: G ALT RNA: G\n"));
    assert!(stdout.contains("\nVariant 3\nchr2:800 REF: G ALT DNA: A ALT RNA: A\n"));
    assert!(!stdout.contains("Variant 2"));
    assert!(!stdout.contains("Variant 4"));

    assert!(stdout.contains("Found Variant at gene: ALPHA, ID:gene1, Start:1000, End:2000"));
    assert!(stdout.contains("Found Variant at gene: BETA, ID:gene2, Start:500, End:1000"));
    assert_eq!(stdout.matches("Found Variant at gene:").count(), 2);

    let dna_hit = data.join("dna").join("sample1.vcf").display().to_string();
    let rna_hit = data.join("rna").join("sample1.vcf").display().to_string();
    let hits = format!("Variants appearing in files:\n{}\n{}\n", dna_hit, rna_hit);
    assert!(stdout.contains(&hits));

    let summary = "Counted 2 dna/rna variant matches, 4 variants in total (0.5%).";
    assert!(stdout.ends_with(&format!("\n\n{}\n", summary)));

    Ok(())
}

#[test]
fn test_default_run_traces_extension() {
    let data = data_dir();

    varmatch()
        .env_remove("RUST_LOG")
        .arg("-d")
        .arg(data.join("dna"))
        .arg("-r")
        .arg(data.join("rna"))
        .arg("-a")
        .arg(data.join("annotation.gff"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Result found at extension 0"));
}

#[test]
fn test_feature_type_option() {
    let data = data_dir();

    // Only chr1:1500 sits in an exon; chr2 has no exons at all
    varmatch()
        .arg("-d")
        .arg(data.join("dna"))
        .arg("-r")
        .arg(data.join("rna"))
        .arg("-a")
        .arg(data.join("annotation.gff"))
        .arg("-f")
        .arg("exon")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found Variant at gene: , ID:exon1, Start:1400, End:1600",
        ))
        .stdout(predicate::str::contains(
            "No exon feature found within 0 of chr2:800",
        ));
}

#[test]
fn test_missing_annotation_is_fatal() {
    let data = data_dir();

    varmatch()
        .arg("-d")
        .arg(data.join("dna"))
        .arg("-r")
        .arg(data.join("rna"))
        .arg("-a")
        .arg(data.join("missing.gff"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.gff"));
}

#[test]
fn test_empty_sources_report_error() -> Result<(), Box<dyn std::error::Error>> {
    let data = data_dir();
    let empty = TempDir::new()?;

    varmatch()
        .arg("-d")
        .arg(empty.path())
        .arg("-r")
        .arg(empty.path())
        .arg("-a")
        .arg(data.join("annotation.gff"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no variants to report"))
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn test_invalid_window_step() {
    let data = data_dir();

    varmatch()
        .arg("-d")
        .arg(data.join("dna"))
        .arg("-r")
        .arg(data.join("rna"))
        .arg("-a")
        .arg(data.join("annotation.gff"))
        .arg("--window-step")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("window step"));
}
