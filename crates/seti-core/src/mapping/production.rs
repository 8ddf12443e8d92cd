//! Production tables: rows stratified by production unit, age group and
//! gender, closed by poverty level and funding source.

use seti_model::{
    EmergencyCare, EmergencyMorbidity, EmergencyProduction, HospitalDischarge, HospitalStay,
    OutpatientCare, Procedures, Record, Referrals, Surgery, TableType,
};

use super::{
    DEFAULT_DESTINATION, DEFAULT_DIAGNOSIS_TYPE, DEFAULT_EXIT_TYPE, DEFAULT_PRIORITY, RowMapper,
    RowReader, coverage, header, stratum,
};
use crate::error::CoercionError;

/// Implements [`RowMapper`] for a production table whose only table-specific
/// columns are two counts between the stratum and the coverage.
macro_rules! two_count_mapper {
    ($mapper:ident, $table:ident, $entity:ident, $first:ident, $second:ident) => {
        pub struct $mapper;

        impl RowMapper for $mapper {
            fn table(&self) -> TableType {
                TableType::$table
            }

            fn field_names(&self) -> &'static [&'static str] {
                &[
                    "period",
                    "ipress_code",
                    "ugipress_code",
                    "ups_code",
                    "age_group",
                    "gender",
                    stringify!($first),
                    stringify!($second),
                    "poverty_level",
                    "funding_source",
                ]
            }

            fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
                Ok($entity {
                    header: header(row)?,
                    stratum: stratum(row)?,
                    $first: row.count(stringify!($first))?,
                    $second: row.count(stringify!($second))?,
                    coverage: coverage(row)?,
                }
                .into())
            }
        }
    };
}

two_count_mapper!(OutpatientCareMapper, B1, OutpatientCare, total_patients, total_appointments);
two_count_mapper!(EmergencyProductionMapper, D1, EmergencyProduction, total_patients, total_appointments);
two_count_mapper!(ProceduresMapper, G, Procedures, total_patients, total_procedures);
two_count_mapper!(SurgeryMapper, H, Surgery, total_patients, total_interventions);
two_count_mapper!(ReferralsMapper, I, Referrals, total_patients, total_referrals);

pub struct EmergencyCareMapper;

impl RowMapper for EmergencyCareMapper {
    fn table(&self) -> TableType {
        TableType::B2
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "period",
            "ipress_code",
            "ugipress_code",
            "ups_code",
            "age_group",
            "gender",
            "total_patients",
            "total_appointments",
            "priority",
            "destination",
            "poverty_level",
            "funding_source",
        ]
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(EmergencyCare {
            header: header(row)?,
            stratum: stratum(row)?,
            total_patients: row.count("total_patients")?,
            total_appointments: row.count("total_appointments")?,
            priority: row.code("priority", DEFAULT_PRIORITY)?,
            destination: row.code("destination", DEFAULT_DESTINATION)?,
            coverage: coverage(row)?,
        }
        .into())
    }
}

pub struct HospitalDischargeMapper;

impl RowMapper for HospitalDischargeMapper {
    fn table(&self) -> TableType {
        TableType::C1
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "period",
            "ipress_code",
            "ugipress_code",
            "ups_code",
            "age_group",
            "gender",
            "total_patients",
            "total_appointments",
            "exit_type",
            "poverty_level",
            "funding_source",
        ]
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(HospitalDischarge {
            header: header(row)?,
            stratum: stratum(row)?,
            total_patients: row.count("total_patients")?,
            total_appointments: row.count("total_appointments")?,
            exit_type: row.code("exit_type", DEFAULT_EXIT_TYPE)?,
            coverage: coverage(row)?,
        }
        .into())
    }
}

pub struct HospitalStayMapper;

impl RowMapper for HospitalStayMapper {
    fn table(&self) -> TableType {
        TableType::C2
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "period",
            "ipress_code",
            "ugipress_code",
            "ups_code",
            "age_group",
            "gender",
            "total_patients",
            "total_appointments",
            "stay_days",
            "poverty_level",
            "funding_source",
        ]
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(HospitalStay {
            header: header(row)?,
            stratum: stratum(row)?,
            total_patients: row.count("total_patients")?,
            total_appointments: row.count("total_appointments")?,
            stay_days: row.count("stay_days")?,
            coverage: coverage(row)?,
        }
        .into())
    }
}

pub struct EmergencyMorbidityMapper;

impl RowMapper for EmergencyMorbidityMapper {
    fn table(&self) -> TableType {
        TableType::D2
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "period",
            "ipress_code",
            "ugipress_code",
            "ups_code",
            "age_group",
            "gender",
            "icd10_code",
            "diagnosis_type",
            "total_cases",
            "poverty_level",
            "funding_source",
        ]
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(EmergencyMorbidity {
            header: header(row)?,
            stratum: stratum(row)?,
            icd10_code: row.text("icd10_code")?.to_uppercase(),
            diagnosis_type: row.upper_code("diagnosis_type", DEFAULT_DIAGNOSIS_TYPE)?,
            total_cases: row.count("total_cases")?,
            coverage: coverage(row)?,
        }
        .into())
    }
}
