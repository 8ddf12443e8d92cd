//! Error types for row mapping and batch generation.

use thiserror::Error;

use seti_model::{InvariantViolation, TableType};
use seti_txt::TxtError;

/// A raw value could not be coerced into the type its field requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("La fila no es un objeto JSON: {raw}")]
    NotAnObject { raw: String },

    #[error("El campo '{field}' no es un entero válido: {raw}")]
    NotAnInteger { field: &'static str, raw: String },

    #[error("El campo '{field}' tiene un tipo no soportado: {raw}")]
    UnsupportedType { field: &'static str, raw: String },

    #[error("El campo '{field}' no es un monto válido: {raw}")]
    InvalidAmount { field: &'static str, raw: String },

    /// The value would split the output line.
    #[error("El campo '{field}' contiene '|' o un salto de línea: {raw}")]
    LineBreakingCharacter { field: &'static str, raw: String },
}

impl CoercionError {
    /// Name of the offending field; `None` when the whole row is malformed.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotAnObject { .. } => None,
            Self::NotAnInteger { field, .. }
            | Self::UnsupportedType { field, .. }
            | Self::InvalidAmount { field, .. }
            | Self::LineBreakingCharacter { field, .. } => Some(*field),
        }
    }
}

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingCause {
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
}

/// A row failed coercion or invariant checks for a table.
///
/// Recoverable at batch level: the row is skipped and reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error en mapeo Tabla{table}: {cause}")]
pub struct MappingError {
    pub table: TableType,
    pub cause: MappingCause,
}

impl MappingError {
    pub fn new(table: TableType, cause: impl Into<MappingCause>) -> Self {
        Self {
            table,
            cause: cause.into(),
        }
    }

    /// Name of the offending field, when the cause names one.
    pub fn field(&self) -> Option<&'static str> {
        match &self.cause {
            MappingCause::Coercion(error) => error.field(),
            MappingCause::Invariant(violation) => Some(violation.field()),
        }
    }
}

/// Fatal errors of a generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The table identifier is not registered in the catalog.
    #[error("La tabla '{table_id}' no está soportada.")]
    UnsupportedSchema { table_id: String },

    /// Every row of the batch was rejected.
    #[error("No se encontraron registros válidos para generar la trama.")]
    EmptyBatch { table: TableType, rejected: usize },

    /// The writer could not persist the batch.
    #[error("Error escribiendo archivo: {0}")]
    Write(#[from] TxtError),
}

/// Result type alias for generation calls.
pub type Result<T> = std::result::Result<T, GenerateError>;

impl GenerateError {
    pub fn unsupported(table_id: impl Into<String>) -> Self {
        Self::UnsupportedSchema {
            table_id: table_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_message() {
        let err = MappingError::new(
            TableType::A,
            InvariantViolation::InvalidFacilityCode {
                code: "123".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Error en mapeo TablaA: El código IPRESS '123' debe tener 8 caracteres."
        );
        assert_eq!(err.field(), Some("ipress_code"));
    }

    #[test]
    fn test_coercion_cause_names_field() {
        let err = MappingError::new(
            TableType::B1,
            CoercionError::NotAnInteger {
                field: "total_patients",
                raw: "\"abc\"".to_string(),
            },
        );
        assert!(err.to_string().starts_with("Error en mapeo TablaB1: El campo 'total_patients'"));
        assert_eq!(err.field(), Some("total_patients"));
    }

    #[test]
    fn test_unsupported_message() {
        let err = GenerateError::unsupported("Z9");
        assert!(err.to_string().contains("no está soportada"));
    }
}
