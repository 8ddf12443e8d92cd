//! Report file reader.
//!
//! Decodes a Windows-1252 report file back into its delimited fields.
//! Used to inspect generated files; no table-level validation is applied.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::encoding::decode_windows_1252;
use crate::error::{Result, TxtError};
use crate::writer::DELIMITER;

/// Reader over the raw bytes of a report file.
pub struct TxtReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> TxtReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }

    /// Read every line, split into fields.
    pub fn read_lines(mut self) -> Result<Vec<Vec<String>>> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(|source| TxtError::io("<reader>", source))?;
        Ok(parse_lines(&bytes))
    }
}

impl TxtReader<File> {
    /// Open a report file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TxtError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                TxtError::io(path, e)
            }
        })?;
        Ok(Self::new(file))
    }
}

/// Read a report file into its lines of fields.
pub fn read_txt(path: &Path) -> Result<Vec<Vec<String>>> {
    TxtReader::open(path)?.read_lines().map_err(|err| match err {
        TxtError::Io { source, .. } => TxtError::io(path, source),
        other => other,
    })
}

/// Decode and split a report payload. Empty lines are skipped.
pub fn parse_lines(bytes: &[u8]) -> Vec<Vec<String>> {
    decode_windows_1252(bytes)
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| line.split(DELIMITER).map(str::to_string).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lines_decodes_windows_1252() {
        let bytes = b"202602|A\xD1O|3\n202602|B|4\n";
        let lines = parse_lines(bytes);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec!["202602", "AÑO", "3"]);
    }

    #[test]
    fn test_reader_over_slice() {
        let lines = TxtReader::new(&b"1|2\n"[..]).read_lines().unwrap();
        assert_eq!(lines, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_txt(Path::new("/nonexistent/dir/X.TXT")).unwrap_err();
        assert!(matches!(err, TxtError::FileNotFound { .. }));
    }
}
