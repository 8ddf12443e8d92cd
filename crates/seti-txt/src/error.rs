//! Error types for report file operations.

use std::path::PathBuf;
use thiserror::Error;

use seti_model::TableType;

/// Errors that can occur when writing or reading SETI-IPRESS report files.
#[derive(Debug, Error)]
pub enum TxtError {
    /// The writer was called without records.
    #[error("No hay datos para generar el archivo.")]
    EmptyInput,

    /// A record belongs to a different table than the first one.
    #[error("el registro {line} pertenece a la Tabla {found}; el archivo es de la Tabla {expected}")]
    MixedTables {
        line: usize,
        expected: TableType,
        found: TableType,
    },

    /// A record's period or facility differs from the first record (strict mode).
    #[error("el registro {line} tiene {field} '{found}', distinto de '{expected}' del primer registro")]
    HeaderMismatch {
        line: usize,
        field: &'static str,
        expected: String,
        found: String,
    },

    /// A character has no Windows-1252 representation.
    #[error(
        "Error de codificación: el carácter '{character}' (U+{code:04X}) de la línea {line} no existe en Windows-1252"
    )]
    Encoding {
        line: usize,
        character: char,
        code: u32,
    },

    /// A value contains the delimiter or a line break and would split its line.
    #[error("el valor de la columna {column} de la línea {line} contiene '|' o un salto de línea")]
    LineBreakingValue { line: usize, column: usize },

    /// The derived filename would escape the output directory.
    #[error("nombre de archivo inválido: {name}")]
    InvalidFileName { name: String },

    /// File not found when reading.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O failure while creating, writing or reading a report file.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for report file operations.
pub type Result<T> = std::result::Result<T, TxtError>;

impl TxtError {
    /// Create an Encoding error for the given 1-based line.
    pub fn encoding(line: usize, character: char) -> Self {
        Self::Encoding {
            line,
            character,
            code: u32::from(character),
        }
    }

    /// Create an Io error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the failure comes from the data rather than the filesystem.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::MixedTables { .. }
                | Self::HeaderMismatch { .. }
                | Self::Encoding { .. }
                | Self::LineBreakingValue { .. }
                | Self::InvalidFileName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_display() {
        let err = TxtError::encoding(2, '😊');
        let message = err.to_string();
        assert!(message.starts_with("Error de codificación"));
        assert!(message.contains("U+1F60A"));
        assert!(message.contains("línea 2"));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_io_error_keeps_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TxtError::io("/tmp/out/X.TXT", io_err);
        assert!(err.to_string().contains("/tmp/out/X.TXT"));
        assert!(!err.is_data_error());
    }
}
