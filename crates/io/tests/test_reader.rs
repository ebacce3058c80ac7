//! Integration tests for reading observation tables from disk.

use std::fs;
use std::path::Path;

use sojourn_io::{IoError, ReaderConfig, read_table};
use sojourn_tpm::{EstimatorConfig, estimate_tpm};
use tempfile::tempdir;

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("fixture written");
    path
}

#[test]
fn missing_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let err = read_table(&path, &ReaderConfig::default()).unwrap_err();
    match err {
        IoError::FileNotFound { path: p } => assert_eq!(p, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn bad_delimiter_rejected_before_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let cfg = ReaderConfig::default().with_delimiter(b'"');
    let err = read_table(&path, &cfg).unwrap_err();
    assert!(matches!(err, IoError::Validation { .. }));
}

#[test]
fn reads_table_with_trailing_total() {
    let dir = tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "shares.csv",
        "Year,Forest,Crop,Urban,Total\n\
         2001,0.7,0.2,0.1,1.0\n\
         2002,0.3,0.6,0.1,1.0\n\
         2003,0.2,0.7,0.1,1.0\n",
    );

    let table = read_table(&path, &ReaderConfig::default()).unwrap();
    assert_eq!(table.n_periods(), 3);
    assert_eq!(table.columns().len(), 5);

    let cfg = EstimatorConfig::new().with_trailing_total(true);
    let tpm = estimate_tpm(&table, &cfg).unwrap();
    assert_eq!(tpm.labels(), &["Forest", "Crop", "Urban"]);
    // Forest -> Crop, Crop -> Crop
    assert_eq!(tpm.prob_by_label("Forest", "Crop"), Some(1.0));
    assert_eq!(tpm.prob_by_label("Crop", "Crop"), Some(1.0));
    assert_eq!(tpm.degenerate_labels(), vec!["Urban"]);
}

#[test]
fn tab_delimited_file() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "shares.tsv", "t\tA\tB\n1\t1\t0\n2\t0\t1\n");
    let cfg = ReaderConfig::default().with_delimiter(b'\t');
    let table = read_table(&path, &cfg).unwrap();
    assert_eq!(table.periods(), &["1", "2"]);
    assert_eq!(table.values(), &[vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[test]
fn non_numeric_cells_are_collected() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "bad.csv", "Year,A,B\n2001,n/a,0.5\n2002,0.5,?\n");
    let err = read_table(&path, &ReaderConfig::default()).unwrap_err();
    match err {
        IoError::Validation { count, details } => {
            assert_eq!(count, 2);
            assert!(details.contains("\"n/a\""));
            assert!(details.contains("\"?\""));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn header_only_file_estimates_as_empty() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "empty.csv", "Year,A,B\n");
    let table = read_table(&path, &ReaderConfig::default()).unwrap();
    let err = estimate_tpm(&table, &EstimatorConfig::new()).unwrap_err();
    assert_eq!(err, sojourn_tpm::TpmError::EmptyData);
}
