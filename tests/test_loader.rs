//! Tests for CSV loading

use oncolens::pipeline::*;
use oncolens::OncoError;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_csv_roundtrip() {
    let mut df = create_diagnosis_dataframe(12, 8, 3);
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let loaded = load_dataset(&csv_path, DEFAULT_INFER_SCHEMA_LENGTH).unwrap();

    assert_eq!(loaded.shape(), (20, 6));
    assert_has_columns(&loaded, &["id", "diagnosis", "radius_mean", "smoothness_mean"]);
    assert_eq!(loaded.column("radius_mean").unwrap().dtype(), &DataType::Float64);
}

#[test]
fn test_load_full_scan_schema() {
    let mut df = create_diagnosis_dataframe(5, 5, 1);
    let (_temp_dir, csv_path) = create_temp_csv(&mut df);

    let loaded = load_dataset(&csv_path, 0).unwrap();
    assert_eq!(loaded.height(), 10);
}

#[test]
fn test_load_keeps_artifact_columns_for_cleaning() {
    let (_temp_dir, path) = write_csv_text("raw.csv", &raw_breast_cancer_csv());

    let loaded = load_dataset(&path, DEFAULT_INFER_SCHEMA_LENGTH).unwrap();

    assert_eq!(loaded.height(), 11);
    assert_has_columns(&loaded, &["Unnamed: 32", "id"]);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_dataset(
        std::path::Path::new("/definitely/not/here.csv"),
        DEFAULT_INFER_SCHEMA_LENGTH,
    )
    .unwrap_err();

    assert!(err.is_io(), "expected I/O error, got {:?}", err);
    assert!(matches!(err, OncoError::Io { .. }));
}

#[test]
fn test_unsupported_extension_rejected() {
    let (_temp_dir, path) = write_csv_text("data.parquet", "a,b\n1,2\n");

    let err = load_dataset(&path, DEFAULT_INFER_SCHEMA_LENGTH).unwrap_err();
    assert!(err.is_io());
    assert!(err.to_string().contains("Unsupported file format"));
}

#[test]
fn test_dataset_stats() {
    let df = create_diagnosis_dataframe(4, 6, 9);
    let (rows, cols, memory_mb) = dataset_stats(&df);

    assert_eq!(rows, 10);
    assert_eq!(cols, 6);
    assert!(memory_mb > 0.0);
}

#[test]
fn test_load_comma_separated_text_with_other_extension() {
    let (_temp_dir, path) = write_csv_text("data.txt", "diagnosis,radius_mean\nM,17.99\nB,13.54\n");

    let loaded = load_dataset(&path, DEFAULT_INFER_SCHEMA_LENGTH).unwrap();
    assert_eq!(loaded.shape(), (2, 2));
}
