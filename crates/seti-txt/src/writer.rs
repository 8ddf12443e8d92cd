//! Report file writer.
//!
//! Serializes a homogeneous batch of records into the pipe-delimited,
//! Windows-1252 encoded file mandated by the SETI-IPRESS protocol.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use seti_model::Record;

use crate::encoding::encode_windows_1252;
use crate::error::{Result, TxtError};

/// Column delimiter.
pub const DELIMITER: char = '|';

/// Line terminator. A single LF, the final line included.
pub const LINE_TERMINATOR: u8 = b'\n';

/// Extension of generated report files.
pub const FILE_EXTENSION: &str = "TXT";

/// Extension of the sibling file a report is staged in before the rename.
const TEMP_EXTENSION: &str = "TXT.tmp";

/// Options for report file writing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    /// Reject batches whose records disagree on period or facility code.
    ///
    /// When false, a divergent record is logged and written anyway; the
    /// filename always comes from the first record.
    pub strict_header: bool,
}

impl WriterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strict_header(mut self, strict: bool) -> Self {
        self.strict_header = strict;
        self
    }
}

/// Report file writer.
#[derive(Debug, Clone, Default)]
pub struct TxtWriter {
    options: WriterOptions,
}

impl TxtWriter {
    /// Create a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with options.
    pub fn with_options(options: WriterOptions) -> Self {
        Self { options }
    }

    /// Write `records` into `output_dir` and return the created file path.
    ///
    /// The payload is checked and encoded in memory before any file is
    /// created, so a rejected batch never leaves a file behind. Bytes go to
    /// a sibling temporary file that is renamed over the target, so a failed
    /// rewrite keeps the previous report intact.
    pub fn write(&self, records: &[Record], output_dir: &Path) -> Result<PathBuf> {
        let first = records.first().ok_or(TxtError::EmptyInput)?;
        self.check_batch(records)?;

        let payload = encode_records(records)?;
        let file_name = output_filename(first);
        if file_name.contains(['/', '\\']) || file_name.starts_with('.') {
            return Err(TxtError::InvalidFileName { name: file_name });
        }

        let path = output_dir.join(&file_name);
        persist(&path, &payload)?;

        info!(
            table = %first.table(),
            path = %path.display(),
            records = records.len(),
            bytes = payload.len(),
            "report file written"
        );
        Ok(path)
    }

    /// Write `records` to an arbitrary sink, with the same checks as [`write`](Self::write).
    pub fn write_to<W: Write>(&self, records: &[Record], sink: W) -> Result<usize> {
        if records.is_empty() {
            return Err(TxtError::EmptyInput);
        }
        self.check_batch(records)?;
        let payload = encode_records(records)?;
        let mut writer = BufWriter::new(sink);
        writer
            .write_all(&payload)
            .and_then(|()| writer.flush())
            .map_err(|source| TxtError::io("<sink>", source))?;
        Ok(payload.len())
    }

    /// Table homogeneity is always enforced; header homogeneity depends on options.
    fn check_batch(&self, records: &[Record]) -> Result<()> {
        let Some(first) = records.first() else {
            return Ok(());
        };
        let expected_table = first.table();
        let expected = first.header();

        for (index, record) in records.iter().enumerate().skip(1) {
            let line = index + 1;
            if record.table() != expected_table {
                return Err(TxtError::MixedTables {
                    line,
                    expected: expected_table,
                    found: record.table(),
                });
            }

            let header = record.header();
            let divergent = [
                ("periodo", &expected.period, &header.period),
                ("código IPRESS", &expected.ipress_code, &header.ipress_code),
            ];
            for (field, want, got) in divergent {
                if want == got {
                    continue;
                }
                if self.options.strict_header {
                    return Err(TxtError::HeaderMismatch {
                        line,
                        field,
                        expected: want.clone(),
                        found: got.clone(),
                    });
                }
                warn!(
                    line,
                    field,
                    expected = %want,
                    found = %got,
                    "record header differs from the first record"
                );
            }
        }
        Ok(())
    }
}

/// Name of the report file for a batch whose first record is `first`.
///
/// `{ipress}_{YYYY}_{MM}_{SUFFIX}.TXT`
pub fn output_filename(first: &Record) -> String {
    let header = first.header();
    format!(
        "{}_{}_{}_{}.{}",
        header.ipress_code,
        header.year(),
        header.month(),
        first.table().suffix(),
        FILE_EXTENSION
    )
}

/// Render one record as a delimited line, without terminator.
pub fn render_line(record: &Record) -> String {
    record.fields().join(&DELIMITER.to_string())
}

/// Render and encode every record. Each line, the last included, ends in LF.
///
/// A value holding the delimiter or a line break is refused rather than
/// written as a broken line.
pub fn encode_records(records: &[Record]) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let fields = record.fields();
        if let Some(column) = fields
            .iter()
            .position(|field| field.contains([DELIMITER, '\r', '\n']))
        {
            return Err(TxtError::LineBreakingValue {
                line: index + 1,
                column: column + 1,
            });
        }
        let line = fields.join(&DELIMITER.to_string());
        let bytes = encode_windows_1252(&line)
            .map_err(|character| TxtError::encoding(index + 1, character))?;
        payload.extend_from_slice(&bytes);
        payload.push(LINE_TERMINATOR);
    }
    debug!(lines = records.len(), bytes = payload.len(), "records encoded");
    Ok(payload)
}

/// Write `payload` next to `path`, then rename it into place.
fn persist(path: &Path, payload: &[u8]) -> Result<()> {
    let temp_path = path.with_extension(TEMP_EXTENSION);
    if let Err(err) = write_synced(&temp_path, payload) {
        discard(&temp_path);
        return Err(err);
    }
    fs::rename(&temp_path, path).map_err(|source| {
        discard(&temp_path);
        TxtError::io(path, source)
    })
}

fn write_synced(path: &Path, payload: &[u8]) -> Result<()> {
    let file = File::create(path).map_err(|source| TxtError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(payload)
        .and_then(|()| writer.flush())
        .and_then(|()| writer.get_ref().sync_all())
        .map_err(|source| TxtError::io(path, source))
}

fn discard(temp_path: &Path) {
    if let Err(err) = fs::remove_file(temp_path)
        && err.kind() != ErrorKind::NotFound
    {
        warn!(path = %temp_path.display(), error = %err, "failed to remove temporary report file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seti_model::{Childbirth, RecordHeader};

    fn childbirth(period: &str, ipress: &str) -> Record {
        Childbirth {
            header: RecordHeader::new(period, ipress, "12345678"),
            total_deliveries: 3,
            complicated_deliveries: 1,
            live_births: 3,
            still_births: 0,
        }
        .into()
    }

    #[test]
    fn test_output_filename() {
        let record = childbirth("202602", "12345678");
        assert_eq!(output_filename(&record), "12345678_2026_02_TEE0.TXT");
    }

    #[test]
    fn test_encode_terminates_every_line() {
        let records = vec![childbirth("202602", "12345678"), childbirth("202602", "12345678")];
        let payload = encode_records(&records).unwrap();
        let text = String::from_utf8(payload).unwrap();
        assert_eq!(
            text,
            "202602|12345678|12345678|3|1|3|0\n202602|12345678|12345678|3|1|3|0\n"
        );
    }

    #[test]
    fn test_write_to_sink() {
        let mut sink = Vec::new();
        let written = TxtWriter::new()
            .write_to(&[childbirth("202602", "12345678")], &mut sink)
            .unwrap();
        assert_eq!(written, sink.len());
        assert!(sink.ends_with(b"\n"));
    }

    #[test]
    fn test_strict_header_rejects_other_period() {
        let writer = TxtWriter::with_options(WriterOptions::new().with_strict_header(true));
        let records = vec![childbirth("202602", "12345678"), childbirth("202603", "12345678")];
        let err = writer.write_to(&records, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            TxtError::HeaderMismatch { line: 2, field: "periodo", .. }
        ));
    }

    #[test]
    fn test_permissive_header_accepts_other_facility() {
        let records = vec![childbirth("202602", "12345678"), childbirth("202602", "87654321")];
        assert!(TxtWriter::new().write_to(&records, Vec::new()).is_ok());
    }
}
