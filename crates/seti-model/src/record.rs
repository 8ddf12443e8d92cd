//! Validated record entities, one shape per table type.
//!
//! Every entity embeds a [`RecordHeader`] by value. Production tables also
//! embed a [`ServiceStratum`] and a [`Coverage`]. Numeric attributes are
//! exposed through [`Entity::numeric_fields`], an explicit list in line
//! order, so invariant checks run in a reproducible sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InvariantViolation, Result};
use crate::table::TableType;

/// Length of a reporting period (AAAAMM).
pub const PERIOD_LEN: usize = 6;

/// Length of an IPRESS facility code.
pub const FACILITY_CODE_LEN: usize = 8;

/// Fields shared by every table: period, facility and administering unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    /// Reporting month, AAAAMM.
    pub period: String,
    /// IPRESS facility code.
    pub ipress_code: String,
    /// UGIPRESS administering-unit code.
    pub ugipress_code: String,
}

impl RecordHeader {
    pub fn new(
        period: impl Into<String>,
        ipress_code: impl Into<String>,
        ugipress_code: impl Into<String>,
    ) -> Self {
        Self {
            period: period.into(),
            ipress_code: ipress_code.into(),
            ugipress_code: ugipress_code.into(),
        }
    }

    /// Year part of the period (first four characters).
    pub fn year(&self) -> &str {
        self.period.get(..4).unwrap_or(&self.period)
    }

    /// Month part of the period (characters after the year).
    pub fn month(&self) -> &str {
        self.period.get(4..).unwrap_or_default()
    }

    /// Check the period format, then the facility code length.
    pub fn validate(&self) -> Result<()> {
        if self.period.len() != PERIOD_LEN || !self.period.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvariantViolation::InvalidPeriod {
                period: self.period.clone(),
            });
        }
        if self.ipress_code.chars().count() != FACILITY_CODE_LEN {
            return Err(InvariantViolation::InvalidFacilityCode {
                code: self.ipress_code.clone(),
            });
        }
        Ok(())
    }

    fn push_fields(&self, out: &mut Vec<String>) {
        out.push(self.period.clone());
        out.push(self.ipress_code.clone());
        out.push(self.ugipress_code.clone());
    }
}

/// Production unit and demographic stratum of a production row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStratum {
    /// UPS production-unit code.
    pub ups_code: String,
    /// Two-digit age group code.
    pub age_group: String,
    pub gender: String,
}

impl ServiceStratum {
    fn push_fields(&self, out: &mut Vec<String>) {
        out.push(self.ups_code.clone());
        out.push(self.age_group.clone());
        out.push(self.gender.clone());
    }
}

/// Poverty classification and funding source of a production row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub poverty_level: String,
    pub funding_source: String,
}

impl Coverage {
    fn push_fields(&self, out: &mut Vec<String>) {
        out.push(self.poverty_level.clone());
        out.push(self.funding_source.clone());
    }
}

/// Common contract of every table entity.
pub trait Entity {
    /// Table type this entity belongs to.
    const TABLE: TableType;

    fn header(&self) -> &RecordHeader;

    /// Numeric attributes as `(field, value)` pairs, in line order.
    fn numeric_fields(&self) -> Vec<(&'static str, i64)>;

    /// Textual rendering of every output column, in line order.
    fn fields(&self) -> Vec<String>;

    /// Check header invariants, then non-negativity of every numeric field.
    fn validate(&self) -> Result<()> {
        self.header().validate()?;
        for (field, value) in self.numeric_fields() {
            if value < 0 {
                return Err(InvariantViolation::NegativeValue { field, value });
            }
        }
        Ok(())
    }
}

/// Table A: health resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResources {
    pub header: RecordHeader,
    pub physical_consulting_rooms: i64,
    pub functional_consulting_rooms: i64,
    pub hospital_beds: i64,
    pub total_physicians: i64,
    pub serums_physicians: i64,
    pub resident_physicians: i64,
    pub nurses: i64,
    pub dentists: i64,
    pub psychologists: i64,
    pub nutritionists: i64,
    pub medical_technologists: i64,
    pub midwives: i64,
    pub pharmacists: i64,
    pub support_staff: i64,
    pub other_professionals: i64,
    pub operative_ambulances: i64,
}

impl Entity for HealthResources {
    const TABLE: TableType = TableType::A;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("physical_consulting_rooms", self.physical_consulting_rooms),
            ("functional_consulting_rooms", self.functional_consulting_rooms),
            ("hospital_beds", self.hospital_beds),
            ("total_physicians", self.total_physicians),
            ("serums_physicians", self.serums_physicians),
            ("resident_physicians", self.resident_physicians),
            ("nurses", self.nurses),
            ("dentists", self.dentists),
            ("psychologists", self.psychologists),
            ("nutritionists", self.nutritionists),
            ("medical_technologists", self.medical_technologists),
            ("midwives", self.midwives),
            ("pharmacists", self.pharmacists),
            ("support_staff", self.support_staff),
            ("other_professionals", self.other_professionals),
            ("operative_ambulances", self.operative_ambulances),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        out.extend(
            self.numeric_fields()
                .into_iter()
                .map(|(_, value)| value.to_string()),
        );
        out
    }
}

/// Table B1: outpatient production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutpatientCare {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_appointments: i64,
    pub coverage: Coverage,
}

impl Entity for OutpatientCare {
    const TABLE: TableType = TableType::B1;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_appointments", self.total_appointments),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_appointments.to_string());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table B2: emergency care, with triage priority and destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyCare {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_appointments: i64,
    pub priority: String,
    pub destination: String,
    pub coverage: Coverage,
}

impl Entity for EmergencyCare {
    const TABLE: TableType = TableType::B2;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_appointments", self.total_appointments),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_appointments.to_string());
        out.push(self.priority.clone());
        out.push(self.destination.clone());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table C1: hospital discharges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalDischarge {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_appointments: i64,
    pub exit_type: String,
    pub coverage: Coverage,
}

impl Entity for HospitalDischarge {
    const TABLE: TableType = TableType::C1;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_appointments", self.total_appointments),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_appointments.to_string());
        out.push(self.exit_type.clone());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table C2: hospital stays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HospitalStay {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_appointments: i64,
    pub stay_days: i64,
    pub coverage: Coverage,
}

impl Entity for HospitalStay {
    const TABLE: TableType = TableType::C2;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_appointments", self.total_appointments),
            ("stay_days", self.stay_days),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_appointments.to_string());
        out.push(self.stay_days.to_string());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table D1: emergency production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyProduction {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_appointments: i64,
    pub coverage: Coverage,
}

impl Entity for EmergencyProduction {
    const TABLE: TableType = TableType::D1;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_appointments", self.total_appointments),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_appointments.to_string());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table D2: emergency morbidity by ICD-10 diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyMorbidity {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub icd10_code: String,
    /// Diagnosis type: presumptive, definitive or repeated.
    pub diagnosis_type: String,
    pub total_cases: i64,
    pub coverage: Coverage,
}

impl Entity for EmergencyMorbidity {
    const TABLE: TableType = TableType::D2;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![("total_cases", self.total_cases)]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.icd10_code.clone());
        out.push(self.diagnosis_type.clone());
        out.push(self.total_cases.to_string());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table E: childbirth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Childbirth {
    pub header: RecordHeader,
    pub total_deliveries: i64,
    pub complicated_deliveries: i64,
    pub live_births: i64,
    pub still_births: i64,
}

impl Entity for Childbirth {
    const TABLE: TableType = TableType::E;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_deliveries", self.total_deliveries),
            ("complicated_deliveries", self.complicated_deliveries),
            ("live_births", self.live_births),
            ("still_births", self.still_births),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        out.extend(
            self.numeric_fields()
                .into_iter()
                .map(|(_, value)| value.to_string()),
        );
        out
    }
}

/// Table F: epidemiological surveillance events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surveillance {
    pub header: RecordHeader,
    pub ups_code: String,
    pub surveillance_code: String,
    pub event_count: i64,
}

impl Entity for Surveillance {
    const TABLE: TableType = TableType::F;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![("event_count", self.event_count)]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        out.push(self.ups_code.clone());
        out.push(self.surveillance_code.clone());
        out.push(self.event_count.to_string());
        out
    }
}

/// Table G: procedures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedures {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_procedures: i64,
    pub coverage: Coverage,
}

impl Entity for Procedures {
    const TABLE: TableType = TableType::G;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_procedures", self.total_procedures),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_procedures.to_string());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table H: surgical interventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surgery {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_interventions: i64,
    pub coverage: Coverage,
}

impl Entity for Surgery {
    const TABLE: TableType = TableType::H;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_interventions", self.total_interventions),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_interventions.to_string());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Table I: referrals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Referrals {
    pub header: RecordHeader,
    pub stratum: ServiceStratum,
    pub total_patients: i64,
    pub total_referrals: i64,
    pub coverage: Coverage,
}

impl Entity for Referrals {
    const TABLE: TableType = TableType::I;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        vec![
            ("total_patients", self.total_patients),
            ("total_referrals", self.total_referrals),
        ]
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        self.stratum.push_fields(&mut out);
        out.push(self.total_patients.to_string());
        out.push(self.total_referrals.to_string());
        self.coverage.push_fields(&mut out);
        out
    }
}

/// Monetary amount held as a whole number of cents.
///
/// Rendered with exactly two decimals, `.` as separator and no grouping:
/// `5000.00`, `0.05`, `-1.50`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount {
    cents: i64,
}

impl Amount {
    pub const ZERO: Amount = Amount { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Table J: executed expenditure per funding source and budget category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expenditure {
    pub header: RecordHeader,
    pub funding_source: String,
    /// Budget classifier, e.g. `2.3.1`.
    pub budget_category: String,
    pub executed_amount: Amount,
}

impl Entity for Expenditure {
    const TABLE: TableType = TableType::J;

    fn header(&self) -> &RecordHeader {
        &self.header
    }

    fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        Vec::new()
    }

    fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(Self::TABLE.field_count());
        self.header.push_fields(&mut out);
        out.push(self.funding_source.clone());
        out.push(self.budget_category.clone());
        out.push(self.executed_amount.to_string());
        out
    }

    fn validate(&self) -> Result<()> {
        self.header.validate()?;
        if self.executed_amount.is_negative() {
            return Err(InvariantViolation::NegativeAmount {
                field: "executed_amount",
                amount: self.executed_amount.to_string(),
            });
        }
        Ok(())
    }
}

/// A validated row of any table type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "table", content = "record")]
pub enum Record {
    A(HealthResources),
    B1(OutpatientCare),
    B2(EmergencyCare),
    C1(HospitalDischarge),
    C2(HospitalStay),
    D1(EmergencyProduction),
    D2(EmergencyMorbidity),
    E(Childbirth),
    F(Surveillance),
    G(Procedures),
    H(Surgery),
    I(Referrals),
    J(Expenditure),
}

macro_rules! with_entity {
    ($record:expr, $entity:ident => $body:expr) => {
        match $record {
            Record::A($entity) => $body,
            Record::B1($entity) => $body,
            Record::B2($entity) => $body,
            Record::C1($entity) => $body,
            Record::C2($entity) => $body,
            Record::D1($entity) => $body,
            Record::D2($entity) => $body,
            Record::E($entity) => $body,
            Record::F($entity) => $body,
            Record::G($entity) => $body,
            Record::H($entity) => $body,
            Record::I($entity) => $body,
            Record::J($entity) => $body,
        }
    };
}

impl Record {
    pub fn table(&self) -> TableType {
        match self {
            Record::A(_) => TableType::A,
            Record::B1(_) => TableType::B1,
            Record::B2(_) => TableType::B2,
            Record::C1(_) => TableType::C1,
            Record::C2(_) => TableType::C2,
            Record::D1(_) => TableType::D1,
            Record::D2(_) => TableType::D2,
            Record::E(_) => TableType::E,
            Record::F(_) => TableType::F,
            Record::G(_) => TableType::G,
            Record::H(_) => TableType::H,
            Record::I(_) => TableType::I,
            Record::J(_) => TableType::J,
        }
    }

    pub fn header(&self) -> &RecordHeader {
        with_entity!(self, entity => entity.header())
    }

    pub fn numeric_fields(&self) -> Vec<(&'static str, i64)> {
        with_entity!(self, entity => entity.numeric_fields())
    }

    /// Output columns in the table's mandated order.
    pub fn fields(&self) -> Vec<String> {
        with_entity!(self, entity => entity.fields())
    }

    pub fn validate(&self) -> Result<()> {
        with_entity!(self, entity => entity.validate())
    }

    /// Validate and return the record, or the first violated invariant.
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

macro_rules! impl_from_entity {
    ($($variant:ident => $entity:ty),* $(,)?) => {
        $(
            impl From<$entity> for Record {
                fn from(entity: $entity) -> Self {
                    Record::$variant(entity)
                }
            }
        )*
    };
}

impl_from_entity! {
    A => HealthResources,
    B1 => OutpatientCare,
    B2 => EmergencyCare,
    C1 => HospitalDischarge,
    C2 => HospitalStay,
    D1 => EmergencyProduction,
    D2 => EmergencyMorbidity,
    E => Childbirth,
    F => Surveillance,
    G => Procedures,
    H => Surgery,
    I => Referrals,
    J => Expenditure,
}
