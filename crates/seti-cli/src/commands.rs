use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use seti_cli::input::load_rows;
use seti_cli::logging::{EventLogger, redact_message};
use seti_core::{BatchDispatcher, EventKind, EventLog, default_catalog};
use seti_model::TableType;
use seti_txt::{TxtWriter, WriterOptions, read_txt};

use crate::cli::{GenerateArgs, InspectArgs};
use crate::summary::styled_table;
use crate::types::GenerateOutcome;

pub fn run_tables() -> Result<()> {
    let mut table = styled_table(["Tabla", "Sufijo", "Campos", "Descripción"]);
    for schema in default_catalog().iter() {
        table.add_row(vec![
            schema.table().code().to_string(),
            schema.suffix_token().to_string(),
            schema.field_count().to_string(),
            schema.table().description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_generate(args: &GenerateArgs, log_data: bool) -> Result<GenerateOutcome> {
    let span = info_span!("generate_command", table = %args.table);
    let _guard = span.enter();

    let rows = load_rows(&args.input)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&args.input));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;
    info!(input = %args.input.display(), rows = rows.len(), "input ready");

    let writer = TxtWriter::with_options(WriterOptions::new().with_strict_header(args.strict_header));
    let mut dispatcher = BatchDispatcher::with_writer(writer);
    let log = EventLog::new();
    dispatcher.subscribe(EventLogger::new(log_data));
    dispatcher.subscribe(log.clone());

    let result = dispatcher.generate_with_report(&args.table, &rows, &output_dir);
    let row_errors = log
        .events()
        .into_iter()
        .filter(|event| event.kind == EventKind::Error)
        .map(|event| redact_message(&event.message, log_data).into_owned())
        .collect();

    let (report, failure) = match result {
        Ok(report) => (Some(report), None),
        Err(error) => (None, Some(error.to_string())),
    };
    Ok(GenerateOutcome {
        table_id: args.table.trim().to_uppercase(),
        input: args.input.clone(),
        output_dir,
        total_rows: rows.len(),
        row_errors,
        report,
        failure,
    })
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let lines = read_txt(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let table_type = table_from_filename(&args.file);
    let width = lines.iter().map(Vec::len).max().unwrap_or(0);

    let names = table_type
        .and_then(|table| default_catalog().get(table))
        .map(|schema| schema.field_names())
        .filter(|names| names.len() == width);
    let mut header = vec!["#".to_string()];
    match names {
        Some(names) => header.extend(names.iter().copied().map(String::from)),
        None => header.extend((1..=width).map(|i| i.to_string())),
    }
    let mut table = styled_table(header);
    for (index, fields) in lines.iter().enumerate() {
        let mut row = vec![(index + 1).to_string()];
        row.extend(fields.iter().cloned());
        table.add_row(row);
    }

    match table_type {
        Some(table_type) => println!(
            "Tabla {table_type} ({}) - {} registros",
            table_type.description(),
            lines.len()
        ),
        None => println!("{} registros", lines.len()),
    }
    println!("{table}");
    Ok(())
}

/// Table type encoded in a `{ipress}_{YYYY}_{MM}_{SUFFIX}.TXT` filename.
pub fn table_from_filename(path: &Path) -> Option<TableType> {
    let stem = path.file_stem()?.to_str()?;
    let suffix = stem.rsplit('_').next()?;
    TableType::ALL
        .into_iter()
        .find(|table| table.suffix().eq_ignore_ascii_case(suffix))
}

fn default_output_dir(input: &Path) -> PathBuf {
    input
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("output"), |parent| parent.join("output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_from_filename() {
        assert_eq!(
            table_from_filename(Path::new("out/00004567_2023_10_TAA0.TXT")),
            Some(TableType::A)
        );
        assert_eq!(
            table_from_filename(Path::new("12345678_2026_02_tdd2.txt")),
            Some(TableType::D2)
        );
        assert_eq!(table_from_filename(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("data/rows.json")),
            PathBuf::from("data/output")
        );
        assert_eq!(default_output_dir(Path::new("rows.json")), PathBuf::from("output"));
    }
}
