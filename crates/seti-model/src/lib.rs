//! SETI-IPRESS data model.
//!
//! Table types, validated record entities and the invariants every record
//! must satisfy before it can be written to a report file.

pub mod error;
pub mod record;
pub mod table;

pub use error::{InvariantViolation, Result};
pub use record::{
    Amount, Childbirth, Coverage, EmergencyCare, EmergencyMorbidity, EmergencyProduction, Entity,
    Expenditure, FACILITY_CODE_LEN, HealthResources, HospitalDischarge, HospitalStay,
    OutpatientCare, PERIOD_LEN, Procedures, Record, RecordHeader, Referrals, ServiceStratum,
    Surgery, Surveillance,
};
pub use table::TableType;
