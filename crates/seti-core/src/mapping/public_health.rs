//! Tables E (childbirth) and F (epidemiological surveillance).

use seti_model::{Childbirth, Record, Surveillance, TableType};

use super::{RowMapper, RowReader, header};
use crate::error::CoercionError;

pub struct ChildbirthMapper;

impl RowMapper for ChildbirthMapper {
    fn table(&self) -> TableType {
        TableType::E
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "period",
            "ipress_code",
            "ugipress_code",
            "total_deliveries",
            "complicated_deliveries",
            "live_births",
            "still_births",
        ]
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(Childbirth {
            header: header(row)?,
            total_deliveries: row.count("total_deliveries")?,
            complicated_deliveries: row.count("complicated_deliveries")?,
            live_births: row.count("live_births")?,
            still_births: row.count("still_births")?,
        }
        .into())
    }
}

pub struct SurveillanceMapper;

impl RowMapper for SurveillanceMapper {
    fn table(&self) -> TableType {
        TableType::F
    }

    fn field_names(&self) -> &'static [&'static str] {
        &[
            "period",
            "ipress_code",
            "ugipress_code",
            "ups_code",
            "surveillance_code",
            "event_count",
        ]
    }

    fn coerce(&self, row: &RowReader<'_>) -> Result<Record, CoercionError> {
        Ok(Surveillance {
            header: header(row)?,
            ups_code: row.text("ups_code")?,
            surveillance_code: row.text("surveillance_code")?.to_uppercase(),
            event_count: row.count("event_count")?,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_childbirth_line() {
        let raw = json!({
            "period": "202602",
            "ipress_code": "12345678",
            "ugipress_code": "12345678",
            "total_deliveries": 50,
            "complicated_deliveries": "10",
            "live_births": 49,
            "still_births": 1
        });
        let record = ChildbirthMapper.map(&raw).unwrap();
        assert_eq!(record.fields().join("|"), "202602|12345678|12345678|50|10|49|1");
    }

    #[test]
    fn test_surveillance_code_is_upper_cased() {
        let raw = json!({
            "period": "202602",
            "ipress_code": "12345678",
            "surveillance_code": " i02 ",
            "event_count": null
        });
        let Record::F(record) = SurveillanceMapper.map(&raw).unwrap() else {
            panic!("expected table F record");
        };
        assert_eq!(record.surveillance_code, "I02");
        assert_eq!(record.event_count, 0);
    }
}
