//! Raw row loading from JSON and CSV files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use tracing::debug;

/// Supported input file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
}

impl InputFormat {
    /// Detect the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => bail!(
                "unsupported input file {}: expected a .json or .csv extension",
                path.display()
            ),
        }
    }
}

/// Load raw rows from a JSON or CSV file.
pub fn load_rows(path: &Path) -> Result<Vec<Value>> {
    let format = InputFormat::from_path(path)?;
    let file =
        File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    let reader = BufReader::new(file);
    let rows = match format {
        InputFormat::Json => rows_from_json(reader),
        InputFormat::Csv => rows_from_csv(reader),
    }
    .with_context(|| format!("failed to read rows from {}", path.display()))?;
    debug!(path = %path.display(), rows = rows.len(), "input loaded");
    Ok(rows)
}

/// Parse a JSON array of rows, or an object with a `rows` array.
pub fn rows_from_json<R: Read>(reader: R) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_reader(reader).context("invalid JSON")?;
    match value {
        Value::Array(rows) => Ok(rows),
        Value::Object(mut object) => match object.remove("rows") {
            Some(Value::Array(rows)) => Ok(rows),
            _ => bail!("expected a JSON array of rows or an object with a \"rows\" array"),
        },
        _ => bail!("expected a JSON array of rows"),
    }
}

/// Parse CSV rows keyed by the header row. Blank cells become null.
pub fn rows_from_csv<R: Read>(reader: R) -> Result<Vec<Value>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers: Vec<String> = csv_reader
        .headers()
        .context("missing CSV header row")?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("invalid CSV record {}", index + 1))?;
        let mut row = Map::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            let value = if cell.trim().is_empty() {
                Value::Null
            } else {
                Value::String(cell.to_string())
            };
            row.insert(header.clone(), value);
        }
        rows.push(Value::Object(row));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            InputFormat::from_path(Path::new("rows.JSON")).unwrap(),
            InputFormat::Json
        );
        assert_eq!(
            InputFormat::from_path(Path::new("dir/rows.csv")).unwrap(),
            InputFormat::Csv
        );
        assert!(InputFormat::from_path(Path::new("rows.xlsx")).is_err());
        assert!(InputFormat::from_path(Path::new("rows")).is_err());
    }

    #[test]
    fn test_json_wrapped_rows() {
        let rows = rows_from_json(&br#"{"rows": [{"period": "202310"}]}"#[..]).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["period"], "202310");
    }

    #[test]
    fn test_json_scalar_is_rejected() {
        assert!(rows_from_json(&b"42"[..]).is_err());
    }
}
