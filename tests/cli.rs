/// Command-line integration tests
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a two-sequence reference list
fn create_ref_list(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("ref.fa.fai");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "chr1\t1000\t6\t60\t61").unwrap();
    writeln!(file, "chr2 unplaced\t500\t1030\t60\t61").unwrap();
    path
}

#[test]
fn test_prints_full_header() {
    let tmpdir = TempDir::new().unwrap();
    let ref_list = create_ref_list(&tmpdir);

    Command::cargo_bin("samtags")
        .unwrap()
        .arg("--refList")
        .arg(&ref_list)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("@HD\tVN:1.0\tSO:unsorted\n"))
        .stdout(predicate::str::contains(
            "@SQ\tSN:chr1\tLN:1000\n@SQ\tSN:chr2\tLN:500\n",
        ))
        .stdout(predicate::str::contains("@PG\tID:samtags\tPN:samtags\tVN:"));
}

#[test]
fn test_header_toggles_and_read_group() {
    let tmpdir = TempDir::new().unwrap();
    let ref_list = create_ref_list(&tmpdir);

    let output = Command::cargo_bin("samtags")
        .unwrap()
        .arg("--refList")
        .arg(&ref_list)
        .arg("--outSAMnoHD")
        .arg("--outSAMnoPG")
        .arg("--outSAMreadGroupID")
        .arg("lane1")
        .arg("--outSAMreadGroup")
        .arg("SM:sample1")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "@SQ\tSN:chr1\tLN:1000\n@SQ\tSN:chr2\tLN:500\n@RG\tID:lane1\tSM:sample1\n"
    );
}

#[test]
fn test_missing_ref_list_file() {
    let tmpdir = TempDir::new().unwrap();

    Command::cargo_bin("samtags")
        .unwrap()
        .arg("--refList")
        .arg(tmpdir.path().join("missing.fai"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.fai"));
}

#[test]
fn test_malformed_ref_list() {
    let tmpdir = TempDir::new().unwrap();
    let path = tmpdir.path().join("bad.fai");
    fs::write(&path, "chr1\tlots\n").unwrap();

    Command::cargo_bin("samtags")
        .unwrap()
        .arg("--refList")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid length 'lots'"));
}

#[test]
fn test_unknown_attribute_rejected() {
    let tmpdir = TempDir::new().unwrap();
    let ref_list = create_ref_list(&tmpdir);

    Command::cargo_bin("samtags")
        .unwrap()
        .arg("--refList")
        .arg(&ref_list)
        .arg("--outSAMattributes")
        .arg("AS")
        .arg("QQ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown SAM attribute 'QQ'"));
}
