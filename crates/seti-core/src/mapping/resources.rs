//! Table A: health resources inventory.

use seti_model::{HealthResources, Record, TableType};

use super::{RowMapper, RowReader, header};
use crate::error::CoercionError;

const FIELD_NAMES: &[&str] = &[
    "period",
    "ipress_code",
    "ugipress_code",
    "physical_consulting_rooms",
    "functional_consulting_rooms",
    "hospital_beds",
    "total_physicians",
    "serums_physicians",
    "resident_physicians",
    "nurses",
    "dentists",
    "psychologists",
    "nutritionists",
    "medical_technologists",
    "midwives",
    "pharmacists",
    "support_staff",
    "other_professionals",
    "operative_ambulances",
];

pub struct HealthResourcesMapper;

impl RowMapper for HealthResourcesMapper {
    fn table(&self) -> TableType {
        TableType::A
    }

    fn field_names(&self) -> &'static [&'static str] {
        FIELD_NAMES
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(HealthResources {
            header: header(row)?,
            physical_consulting_rooms: row.count("physical_consulting_rooms")?,
            functional_consulting_rooms: row.count("functional_consulting_rooms")?,
            hospital_beds: row.count("hospital_beds")?,
            total_physicians: row.count("total_physicians")?,
            serums_physicians: row.count("serums_physicians")?,
            resident_physicians: row.count("resident_physicians")?,
            nurses: row.count("nurses")?,
            dentists: row.count("dentists")?,
            psychologists: row.count("psychologists")?,
            nutritionists: row.count("nutritionists")?,
            medical_technologists: row.count("medical_technologists")?,
            midwives: row.count("midwives")?,
            pharmacists: row.count("pharmacists")?,
            support_staff: row.count("support_staff")?,
            other_professionals: row.count("other_professionals")?,
            operative_ambulances: row.count("operative_ambulances")?,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_spanish_keys_map_to_counts() {
        let raw = json!({
            "periodo": "202310",
            "codigo_ipress": "00004567",
            "codigo_ugipress": "10004567",
            "consultorios_fisicos": 10,
            "camas_hospitalarias": "5",
            "medicos_total": 20,
            "ambulancias_operativas": 2
        });
        let Record::A(record) = HealthResourcesMapper.map(&raw).unwrap() else {
            panic!("expected table A record");
        };
        assert_eq!(record.header.period, "202310");
        assert_eq!(record.physical_consulting_rooms, 10);
        assert_eq!(record.hospital_beds, 5);
        assert_eq!(record.total_physicians, 20);
        assert_eq!(record.operative_ambulances, 2);
        assert_eq!(record.nurses, 0);
    }

    #[test]
    fn test_negative_count_is_invariant_failure() {
        let raw = json!({
            "period": "202310",
            "ipress_code": "00004567",
            "hospital_beds": -1
        });
        let err = HealthResourcesMapper.map(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error en mapeo TablaA: El campo 'hospital_beds' no puede ser negativo: -1"
        );
    }
}
