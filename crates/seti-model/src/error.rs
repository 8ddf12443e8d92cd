use thiserror::Error;

/// A record that violates one of the protocol's domain invariants.
///
/// Messages are user-facing and follow the protocol's locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("El periodo '{period}' es inválido. Formato requerido: AAAAMM")]
    InvalidPeriod { period: String },

    #[error("El código IPRESS '{code}' debe tener 8 caracteres.")]
    InvalidFacilityCode { code: String },

    #[error("El campo '{field}' no puede ser negativo: {value}")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("El campo '{field}' no puede ser negativo: {amount}")]
    NegativeAmount { field: &'static str, amount: String },
}

impl InvariantViolation {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidPeriod { .. } => "period",
            Self::InvalidFacilityCode { .. } => "ipress_code",
            Self::NegativeValue { field, .. } | Self::NegativeAmount { field, .. } => *field,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvariantViolation>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = InvariantViolation::InvalidPeriod {
            period: "2023".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "El periodo '2023' es inválido. Formato requerido: AAAAMM"
        );
        assert_eq!(err.field(), "period");

        let err = InvariantViolation::NegativeValue {
            field: "hospital_beds",
            value: -3,
        };
        assert_eq!(
            err.to_string(),
            "El campo 'hospital_beds' no puede ser negativo: -3"
        );
        assert_eq!(err.field(), "hospital_beds");
    }
}
