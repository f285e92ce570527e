//! Shared test utilities and fixture generators

#![allow(dead_code)]

use polars::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Feature columns of the generated diagnosis fixtures
pub const FEATURES: [&str; 4] = ["radius_mean", "texture_mean", "area_mean", "smoothness_mean"];

/// Create a diagnosis-like DataFrame with `benign` B rows followed by `malignant` M rows.
///
/// Columns: `id`, `diagnosis`, the four [`FEATURES`]. Values are drawn from a
/// seeded generator, malignant rows shifted upward.
pub fn create_diagnosis_dataframe(benign: usize, malignant: usize, seed: u64) -> DataFrame {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = benign + malignant;

    let ids: Vec<i64> = (0..n as i64).map(|i| 842_300 + i).collect();
    let diagnosis: Vec<&str> = (0..n).map(|i| if i < benign { "B" } else { "M" }).collect();

    let mut columns = vec![
        Column::new("id".into(), ids),
        Column::new("diagnosis".into(), diagnosis),
    ];

    let bases = [(12.0, 4.0), (18.0, 5.0), (550.0, 300.0), (0.09, 0.02)];
    for (name, (base, spread)) in FEATURES.iter().zip(bases) {
        let values: Vec<f64> = (0..n)
            .map(|i| {
                let shift = if i < benign { 0.0 } else { spread };
                base + shift + rng.gen::<f64>() * spread
            })
            .collect();
        columns.push(Column::new((*name).into(), values));
    }

    DataFrame::new(columns).unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Write raw CSV text into a temporary file
pub fn write_csv_text(file_name: &str, text: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(file_name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(text.as_bytes()).unwrap();
    (temp_dir, path)
}

/// Raw CSV shaped like the classic breast-cancer export: an `id` column, a
/// trailing all-empty `Unnamed: 32` column and one row with a missing value.
pub fn raw_breast_cancer_csv() -> String {
    let mut text = String::from("id,diagnosis,radius_mean,texture_mean,area_mean,Unnamed: 32\n");
    let rows = [
        ("842302", "M", "17.99", "10.38", "1001.0"),
        ("842517", "M", "20.57", "17.77", "1326.0"),
        ("84300903", "M", "19.69", "21.25", "1203.0"),
        ("84348301", "M", "11.42", "20.38", "386.1"),
        ("84358402", "M", "20.29", "14.34", "1297.0"),
        ("8510426", "B", "13.54", "14.36", "566.3"),
        ("8510653", "B", "13.08", "15.71", "520.0"),
        ("8510824", "B", "9.504", "12.44", "273.9"),
        ("854941", "B", "13.03", "18.42", "523.8"),
        ("85713702", "B", "8.196", "16.84", "201.9"),
        ("857155", "B", "", "18.61", "458.7"),
    ];
    for (id, diagnosis, radius, texture, area) in rows {
        text.push_str(&format!("{},{},{},{},{},\n", id, diagnosis, radius, texture, area));
    }
    text
}

/// Assert that two floats are within `tol`
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {} ± {}, got {}",
        expected,
        tol,
        actual
    );
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}

/// Assert that a DataFrame does NOT contain specific columns
pub fn assert_missing_columns(df: &DataFrame, unexpected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in unexpected_cols {
        assert!(
            !actual_cols.contains(&col.to_string()),
            "Unexpected column still present: '{}'",
            col
        );
    }
}
