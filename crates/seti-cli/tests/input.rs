//! Tests for input loading.

use std::fs;

use serde_json::json;
use tempfile::TempDir;

use seti_cli::input::{load_rows, rows_from_csv};

#[test]
fn test_csv_cells_become_strings_and_blanks_null() {
    let csv = "periodo,codigo_ipress,consultorios_fisicos,camas_hospitalarias\n\
               202310,00004567,10,\n";
    let rows = rows_from_csv(csv.as_bytes()).unwrap();
    insta::assert_json_snapshot!(rows, @r#"
    [
      {
        "camas_hospitalarias": null,
        "codigo_ipress": "00004567",
        "consultorios_fisicos": "10",
        "periodo": "202310"
      }
    ]
    "#);
}

#[test]
fn test_load_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rows.json");
    let rows = json!([
        {"period": "202310", "ipress_code": "00004567"},
        {"period": "202310", "ipress_code": "00004568"}
    ]);
    fs::write(&path, serde_json::to_vec(&rows).unwrap()).unwrap();

    let loaded = load_rows(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1]["ipress_code"], "00004568");
}

#[test]
fn test_load_csv_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rows.csv");
    fs::write(&path, "period,ipress_code\n202310,00004567\n202311,00004567\n").unwrap();

    let loaded = load_rows(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1]["period"], "202311");
}

#[test]
fn test_missing_file_is_reported_with_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let err = load_rows(&path).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn test_malformed_json_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rows.json");
    fs::write(&path, "{not json").unwrap();
    assert!(load_rows(&path).is_err());
}
