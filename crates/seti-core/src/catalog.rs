//! Schema catalog.
//!
//! Static registry from table identifier to [`Schema`]: field layout,
//! filename suffix and the mapper that validates rows for the table.
//!
//! # Example
//!
//! ```
//! use seti_core::catalog::default_catalog;
//!
//! let schema = default_catalog().resolve("b1").unwrap();
//! assert_eq!(schema.suffix_token(), "TBB1");
//! assert!(default_catalog().resolve("Z9").is_err());
//! ```

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde_json::Value;

use seti_model::{Record, TableType};

use crate::error::{GenerateError, MappingError, Result};
use crate::mapping::{RowMapper, default_mappers};

/// Layout and validation rules of one table type.
pub struct Schema {
    mapper: Box<dyn RowMapper>,
}

impl Schema {
    pub fn new(mapper: Box<dyn RowMapper>) -> Self {
        Self { mapper }
    }

    pub fn table(&self) -> TableType {
        self.mapper.table()
    }

    /// Four-character token embedded in output filenames.
    pub fn suffix_token(&self) -> &'static str {
        self.table().suffix()
    }

    /// Output column names, in line order.
    pub fn field_names(&self) -> &'static [&'static str] {
        self.mapper.field_names()
    }

    pub fn field_count(&self) -> usize {
        self.field_names().len()
    }

    /// Coerce a raw row and check its invariants.
    pub fn validate_and_map(&self, raw: &Value) -> std::result::Result<Record, MappingError> {
        self.mapper.map(raw)
    }

    /// Column rendering of a record for the fixed-format line.
    pub fn fields(&self, record: &Record) -> Vec<String> {
        record.fields()
    }
}

impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("table", &self.table())
            .field("suffix", &self.suffix_token())
            .field("fields", &self.field_count())
            .finish()
    }
}

/// Registry of schemas indexed by table type.
#[derive(Debug, Default)]
pub struct SchemaCatalog {
    schemas: BTreeMap<TableType, Schema>,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema for its table. An existing schema is replaced.
    pub fn register(&mut self, schema: Schema) {
        self.schemas.insert(schema.table(), schema);
    }

    pub fn get(&self, table: TableType) -> Option<&Schema> {
        self.schemas.get(&table)
    }

    /// Resolve an external table identifier, case-insensitively.
    pub fn resolve(&self, table_id: &str) -> Result<&Schema> {
        table_id
            .parse::<TableType>()
            .ok()
            .and_then(|table| self.get(table))
            .ok_or_else(|| GenerateError::unsupported(table_id.trim()))
    }

    /// Schemas in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Catalog with every supported table type, built once.
pub fn default_catalog() -> &'static SchemaCatalog {
    static CATALOG: OnceLock<SchemaCatalog> = OnceLock::new();
    CATALOG.get_or_init(|| {
        let mut catalog = SchemaCatalog::new();
        for mapper in default_mappers() {
            catalog.register(Schema::new(mapper));
        }
        catalog
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_catalog_has_all_tables() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), TableType::ALL.len());
        let tables: Vec<TableType> = catalog.iter().map(Schema::table).collect();
        assert_eq!(tables, TableType::ALL.to_vec());
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let schema = default_catalog().resolve(" d2 ").unwrap();
        assert_eq!(schema.table(), TableType::D2);
        assert_eq!(schema.suffix_token(), "TDD2");
        assert_eq!(schema.field_count(), 11);
    }

    #[test]
    fn test_unknown_table() {
        let err = default_catalog().resolve("Z9").unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnsupportedSchema { ref table_id } if table_id == "Z9"
        ));
    }

    #[test]
    fn test_empty_catalog_resolves_nothing() {
        let catalog = SchemaCatalog::new();
        assert!(catalog.is_empty());
        assert!(catalog.resolve("A").is_err());
    }

    #[test]
    fn test_schema_fields_render_record() {
        let schema = default_catalog().resolve("E").unwrap();
        let record = schema
            .validate_and_map(&json!({
                "period": "202602",
                "ipress_code": "12345678",
                "total_deliveries": 1
            }))
            .unwrap();
        let fields = schema.fields(&record);
        assert_eq!(fields.len(), schema.field_count());
        assert_eq!(fields[3], "1");
    }
}
