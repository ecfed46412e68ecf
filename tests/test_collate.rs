use cftools::collate::{CollateError, LengthTable};
use cftools::commands::collate::collate_lengths;
use cftools::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new("tests").join("fixtures").join(name)
}

fn write_summary(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_two_samples() {
    let dir = TempDir::new().unwrap();
    let files = vec![
        write_summary(&dir, "s1.txt", "X locusA locusB\nignored\nsample1 10 20\n"),
        write_summary(&dir, "s2.txt", "X locusA locusB\nignored\nsample2 30 40\n"),
    ];
    let out = dir.path().join("combined_lengths.tsv");

    collate_lengths(&files, &out).unwrap();

    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Sample\tlocusA\tlocusB\nsample1\t10\t20\nsample2\t30\t40\n"
    );
}

#[test]
fn test_fixture_files_are_sorted_by_locus() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("lengths.tsv");
    let files = [fixture("sample1_lengths.tsv"), fixture("sample2_lengths.tsv")];

    let table = collate_lengths(&files, &out).unwrap();

    assert_eq!(table.num_samples(), 2);
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Sample\tlocusA\tlocusB\tlocusC\nsample1\t290\t500\t1001\nsample2\t310\t520\t0\n"
    );
}

#[test]
fn test_input_order_is_kept() {
    let files = [fixture("sample2_lengths.tsv"), fixture("sample1_lengths.tsv")];
    let table = LengthTable::collate_files(&files).unwrap();

    let samples: Vec<_> = table.records().iter().map(|r| r.sample()).collect();
    assert_eq!(samples, vec!["sample2", "sample1"]);
}

#[test]
fn test_short_file_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("combined_lengths.tsv");
    let files = [fixture("sample1_lengths.tsv"), fixture("short_lengths.tsv")];

    let err = collate_lengths(&files, &out).unwrap_err();

    assert!(matches!(
        &err,
        Error::Collate(CollateError::MalformedSummary { path, line_count: 2 })
            if path.ends_with("short_lengths.tsv")
    ));
    assert!(!out.exists());
}

#[test]
fn test_missing_file() {
    let err = LengthTable::collate_files(&[fixture("missing_lengths.tsv")]).unwrap_err();
    assert!(matches!(err, CollateError::Io { .. }));
    assert!(err.to_string().contains("missing_lengths.tsv"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("combined_lengths.tsv");
    let files = [fixture("sample1_lengths.tsv"), fixture("sample2_lengths.tsv")];

    collate_lengths(&files, &out).unwrap();
    let first = fs::read(&out).unwrap();
    collate_lengths(&files, &out).unwrap();

    assert_eq!(first, fs::read(&out).unwrap());
}
