//! Row mappers: untyped rows to validated records.
//!
//! Each table type has one [`RowMapper`]. Mapping happens in two phases:
//! every field is coerced first (see [`RowReader`]), then the entity
//! invariants are checked on the built record. Both failure kinds are
//! reported as a [`MappingError`] tagged with the table.

mod aliases;
mod expenditure;
mod production;
mod public_health;
mod resources;
mod row;

use serde_json::Value;
use tracing::trace;

use seti_model::{Coverage, Record, RecordHeader, ServiceStratum, TableType};

use crate::error::{CoercionError, MappingError};

pub use aliases::aliases;
pub use expenditure::ExpenditureMapper;
pub use production::{
    EmergencyCareMapper, EmergencyMorbidityMapper, EmergencyProductionMapper,
    HospitalDischargeMapper, HospitalStayMapper, OutpatientCareMapper, ProceduresMapper,
    ReferralsMapper, SurgeryMapper,
};
pub use public_health::{ChildbirthMapper, SurveillanceMapper};
pub use resources::HealthResourcesMapper;
pub use row::{AGE_GROUP_WIDTH, RowReader};

/// Gender when absent.
pub const DEFAULT_GENDER: &str = "1";
/// Age group when absent.
pub const DEFAULT_AGE_GROUP: &str = "01";
/// Poverty level when absent.
pub const DEFAULT_POVERTY_LEVEL: &str = "3";
/// Funding source when absent.
pub const DEFAULT_FUNDING_SOURCE: &str = "4";
/// Emergency triage priority when absent.
pub const DEFAULT_PRIORITY: &str = "3";
/// Emergency destination when absent.
pub const DEFAULT_DESTINATION: &str = "1";
/// Hospital exit type when absent.
pub const DEFAULT_EXIT_TYPE: &str = "1";
/// Diagnosis type when absent (definitive).
pub const DEFAULT_DIAGNOSIS_TYPE: &str = "D";

/// Mapping logic for one table type.
pub trait RowMapper: Send + Sync {
    fn table(&self) -> TableType;

    /// Output column names, in line order.
    fn field_names(&self) -> &'static [&'static str];

    /// Coerce a row into a record. Invariants are not checked here.
    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError>;

    /// Coerce and validate a raw row.
    fn map(&self, raw: &Value) -> Result<Record, MappingError> {
        let table = self.table();
        let row = RowReader::new(raw).map_err(|e| MappingError::new(table, e))?;
        let record = self
            .coerce(&row)
            .map_err(|e| MappingError::new(table, e))?;
        trace!(table = %table, "row coerced");
        record.validated().map_err(|e| MappingError::new(table, e))
    }
}

/// One mapper per supported table type, in table order.
pub fn default_mappers() -> Vec<Box<dyn RowMapper>> {
    vec![
        Box::new(HealthResourcesMapper),
        Box::new(OutpatientCareMapper),
        Box::new(EmergencyCareMapper),
        Box::new(HospitalDischargeMapper),
        Box::new(HospitalStayMapper),
        Box::new(EmergencyProductionMapper),
        Box::new(EmergencyMorbidityMapper),
        Box::new(ChildbirthMapper),
        Box::new(SurveillanceMapper),
        Box::new(ProceduresMapper),
        Box::new(SurgeryMapper),
        Box::new(ReferralsMapper),
        Box::new(ExpenditureMapper),
    ]
}

pub(crate) fn header(row: &RowReader<'_>) -> Result<RecordHeader, CoercionError> {
    Ok(RecordHeader::new(
        row.text("period")?,
        row.text("ipress_code")?,
        row.text("ugipress_code")?,
    ))
}

pub(crate) fn stratum(row: &RowReader<'_>) -> Result<ServiceStratum, CoercionError> {
    Ok(ServiceStratum {
        ups_code: row.text("ups_code")?,
        age_group: row.padded_code("age_group", DEFAULT_AGE_GROUP, AGE_GROUP_WIDTH)?,
        gender: row.code("gender", DEFAULT_GENDER)?,
    })
}

pub(crate) fn coverage(row: &RowReader<'_>) -> Result<Coverage, CoercionError> {
    Ok(Coverage {
        poverty_level: row.code("poverty_level", DEFAULT_POVERTY_LEVEL)?,
        funding_source: row.code("funding_source", DEFAULT_FUNDING_SOURCE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::error::MappingCause;

    #[test]
    fn test_every_table_has_one_mapper() {
        let mappers = default_mappers();
        let tables: Vec<TableType> = mappers.iter().map(|m| m.table()).collect();
        assert_eq!(tables, TableType::ALL.to_vec());
    }

    #[test]
    fn test_field_names_match_field_counts() {
        for mapper in default_mappers() {
            let names = mapper.field_names();
            assert_eq!(names.len(), mapper.table().field_count(), "{}", mapper.table());
            assert_eq!(&names[..3], &["period", "ipress_code", "ugipress_code"]);
        }
    }

    #[test]
    fn test_coercion_runs_before_invariants() {
        let raw = json!({"period": "bad", "ipress_code": "1", "total_patients": "x"});
        let err = OutpatientCareMapper.map(&raw).unwrap_err();
        assert!(matches!(err.cause, MappingCause::Coercion(_)));
    }

    #[test]
    fn test_empty_object_fails_on_period() {
        for mapper in default_mappers() {
            let err = mapper.map(&json!({})).unwrap_err();
            assert_eq!(err.table, mapper.table());
            assert_eq!(err.field(), Some("period"));
        }
    }
}
