//! Table J (executed expenditure).

use seti_model::{Expenditure, Record, TableType};

use super::{DEFAULT_FUNDING_SOURCE, RowMapper, RowReader, header};
use crate::error::CoercionError;

pub struct ExpenditureMapper;

impl RowMapper for ExpenditureMapper {
    fn table(&self) -> TableType {
        TableType::J
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "period",
            "ipress_code",
            "ugipress_code",
            "funding_source",
            "budget_category",
            "executed_amount",
        ]
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(Expenditure {
            header: header(row)?,
            funding_source: row.code("funding_source", DEFAULT_FUNDING_SOURCE)?,
            budget_category: row.text("budget_category")?,
            executed_amount: row.amount("executed_amount")?,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::error::MappingCause;

    #[test]
    fn test_spanish_row_with_decimal_amount() {
        let raw = json!({
            "periodo": "202602",
            "codigo_ipress": "12345678",
            "codigo_ugipress": "12345678",
            "fuente_financiamiento": "1",
            "clasificador_gasto": "2.3.1",
            "monto_ejecutado": 5000.00
        });
        let record = ExpenditureMapper.map(&raw).unwrap();
        assert_eq!(
            record.fields().join("|"),
            "202602|12345678|12345678|1|2.3.1|5000.00"
        );
    }

    #[test]
    fn test_negative_amount_is_an_invariant_violation() {
        let raw = json!({"period": "202602", "ipress_code": "12345678", "executed_amount": "-10.5"});
        let err = ExpenditureMapper.map(&raw).unwrap_err();
        assert!(matches!(err.cause, MappingCause::Invariant(_)));
        assert_eq!(err.field(), Some("executed_amount"));
        assert_eq!(
            err.to_string(),
            "Error en mapeo TablaJ: El campo 'executed_amount' no puede ser negativo: -10.50"
        );
    }

    #[test]
    fn test_malformed_amount_is_a_coercion_error() {
        let raw = json!({"period": "202602", "ipress_code": "12345678", "executed_amount": "5,000"});
        let err = ExpenditureMapper.map(&raw).unwrap_err();
        assert_eq!(err.field(), Some("executed_amount"));
        assert!(matches!(err.cause, MappingCause::Coercion(CoercionError::InvalidAmount { .. })));
    }
}
