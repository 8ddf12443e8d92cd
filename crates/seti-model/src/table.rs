//! Table types defined by the SETI-IPRESS reporting protocol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regulator-defined record schema.
///
/// Each table type has its own entity shape, line layout and filename
/// suffix token. The set is closed: external identifiers are parsed with
/// [`FromStr`] and anything outside this list is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableType {
    /// Health resources: consulting rooms, beds, staff, ambulances.
    A,
    /// Outpatient production.
    B1,
    /// Emergency care.
    B2,
    /// Hospital discharges.
    C1,
    /// Hospital stays.
    C2,
    /// Emergency production.
    D1,
    /// Emergency morbidity.
    D2,
    /// Childbirth.
    E,
    /// Epidemiological surveillance.
    F,
    /// Procedures.
    G,
    /// Surgical interventions.
    H,
    /// Referrals.
    I,
    /// Executed expenditure.
    J,
}

impl TableType {
    /// Every table type in protocol order.
    pub const ALL: [TableType; 13] = [
        TableType::A,
        TableType::B1,
        TableType::B2,
        TableType::C1,
        TableType::C2,
        TableType::D1,
        TableType::D2,
        TableType::E,
        TableType::F,
        TableType::G,
        TableType::H,
        TableType::I,
        TableType::J,
    ];

    /// Short protocol code (e.g. "A", "B1").
    pub fn code(&self) -> &'static str {
        match self {
            TableType::A => "A",
            TableType::B1 => "B1",
            TableType::B2 => "B2",
            TableType::C1 => "C1",
            TableType::C2 => "C2",
            TableType::D1 => "D1",
            TableType::D2 => "D2",
            TableType::E => "E",
            TableType::F => "F",
            TableType::G => "G",
            TableType::H => "H",
            TableType::I => "I",
            TableType::J => "J",
        }
    }

    /// Four-character token embedded in output filenames.
    pub fn suffix(&self) -> &'static str {
        match self {
            TableType::A => "TAA0",
            TableType::B1 => "TBB1",
            TableType::B2 => "TBB2",
            TableType::C1 => "TCC1",
            TableType::C2 => "TCC2",
            TableType::D1 => "TDD1",
            TableType::D2 => "TDD2",
            TableType::E => "TEE0",
            TableType::F => "TFF0",
            TableType::G => "TGG0",
            TableType::H => "THH0",
            TableType::I => "TII0",
            TableType::J => "TJJ0",
        }
    }

    /// Number of `|`-separated fields in one output line.
    pub fn field_count(&self) -> usize {
        match self {
            TableType::A => 19,
            TableType::B1 | TableType::D1 | TableType::G | TableType::H | TableType::I => 10,
            TableType::B2 => 12,
            TableType::C1 | TableType::C2 | TableType::D2 => 11,
            TableType::E => 7,
            TableType::F | TableType::J => 6,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TableType::A => "Recursos de salud",
            TableType::B1 => "Producción asistencial en consulta externa",
            TableType::B2 => "Atenciones en emergencia",
            TableType::C1 => "Egresos hospitalarios",
            TableType::C2 => "Estancias hospitalarias",
            TableType::D1 => "Producción asistencial en emergencia",
            TableType::D2 => "Morbilidad en emergencia",
            TableType::E => "Partos",
            TableType::F => "Vigilancia epidemiológica",
            TableType::G => "Procedimientos",
            TableType::H => "Intervenciones quirúrgicas",
            TableType::I => "Referencias",
            TableType::J => "Gasto ejecutado",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TableType {
    type Err = String;

    /// Parse a table identifier (trimmed, case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        TableType::ALL
            .into_iter()
            .find(|table| table.code() == normalized)
            .ok_or_else(|| format!("Unknown table type: {s}"))
    }
}
