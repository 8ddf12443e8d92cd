//! Batch dispatcher.
//!
//! Runs one batch end to end: resolves the schema, validates every row in
//! order, reports rejected rows, and hands the accepted records to a
//! [`BatchWriter`]. Row failures are never fatal; an empty result or a
//! writer failure aborts the call after a CRITICAL event.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, info_span, warn};

use seti_model::{Record, TableType};
use seti_txt::TxtWriter;

use crate::catalog::{SchemaCatalog, default_catalog};
use crate::error::{GenerateError, Result};
use crate::events::{EventKind, EventPayload, NotificationBus, Observer, SubscriptionId};

/// Persistence strategy for an accepted batch.
pub trait BatchWriter {
    /// Persist `records` under `output_dir` and return the file path.
    fn write(&self, records: &[Record], output_dir: &Path) -> seti_txt::Result<PathBuf>;
}

impl BatchWriter for TxtWriter {
    fn write(&self, records: &[Record], output_dir: &Path) -> seti_txt::Result<PathBuf> {
        TxtWriter::write(self, records, output_dir)
    }
}

/// A row that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    /// 1-based position in the input.
    pub index: usize,
    pub field: Option<&'static str>,
    pub message: String,
}

/// Outcome of a successful generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub table: TableType,
    pub path: PathBuf,
    pub accepted: usize,
    pub rejected: Vec<RowRejection>,
}

impl BatchReport {
    pub fn total_rows(&self) -> usize {
        self.accepted + self.rejected.len()
    }
}

/// Orchestrates validation and writing of one batch at a time.
///
/// Each dispatcher owns its observers; run concurrent batches on separate
/// dispatchers.
#[derive(Debug)]
pub struct BatchDispatcher<W: BatchWriter = TxtWriter> {
    catalog: &'static SchemaCatalog,
    writer: W,
    bus: NotificationBus,
}

impl BatchDispatcher<TxtWriter> {
    /// Dispatcher writing report files with default options.
    pub fn new() -> Self {
        Self::with_writer(TxtWriter::new())
    }
}

impl Default for BatchDispatcher<TxtWriter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: BatchWriter> BatchDispatcher<W> {
    pub fn with_writer(writer: W) -> Self {
        Self {
            catalog: default_catalog(),
            writer,
            bus: NotificationBus::new(),
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.bus.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// Validate `rows` as table `table_id` and write the accepted ones.
    pub fn generate(&self, table_id: &str, rows: &[Value], output_dir: &Path) -> Result<PathBuf> {
        self.generate_with_report(table_id, rows, output_dir)
            .map(|report| report.path)
    }

    /// Like [`generate`](Self::generate), also returning row counts and rejections.
    pub fn generate_with_report(
        &self,
        table_id: &str,
        rows: &[Value],
        output_dir: &Path,
    ) -> Result<BatchReport> {
        let schema = self.catalog.resolve(table_id)?;
        let table = schema.table();
        let span = info_span!("generate", table = %table);
        let _guard = span.enter();

        info!(rows = rows.len(), output_dir = %output_dir.display(), "batch started");
        self.bus.publish(
            EventKind::Start,
            format!("Iniciando proceso de generación para Tabla {table}."),
            Some(EventPayload::Table { table }),
        );

        let mut records = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();
        for (offset, raw) in rows.iter().enumerate() {
            let index = offset + 1;
            match schema.validate_and_map(raw) {
                Ok(record) => {
                    debug!(row = index, "row accepted");
                    records.push(record);
                }
                Err(err) => {
                    let field = err.field();
                    warn!(row = index, field = field.unwrap_or("-"), "row rejected");
                    let message = format!("Fila {index}: {err}");
                    self.bus.publish(
                        EventKind::Error,
                        message.clone(),
                        Some(EventPayload::Row {
                            table,
                            index,
                            field,
                        }),
                    );
                    rejected.push(RowRejection {
                        index,
                        field,
                        message,
                    });
                }
            }
        }

        if records.is_empty() {
            let err = GenerateError::EmptyBatch {
                table,
                rejected: rejected.len(),
            };
            error!(rejected = rejected.len(), "no valid rows in batch");
            self.bus.publish(
                EventKind::Critical,
                err.to_string(),
                Some(EventPayload::Rejected {
                    table,
                    rejected: rejected.len(),
                }),
            );
            return Err(err);
        }

        let accepted = records.len();
        match self.writer.write(&records, output_dir) {
            Ok(path) => {
                info!(
                    accepted,
                    rejected = rejected.len(),
                    path = %path.display(),
                    "batch written"
                );
                self.bus.publish(
                    EventKind::Success,
                    format!("Archivo generado exitosamente en: {}", path.display()),
                    Some(EventPayload::File {
                        table,
                        path: path.clone(),
                        records: accepted,
                    }),
                );
                Ok(BatchReport {
                    table,
                    path,
                    accepted,
                    rejected,
                })
            }
            Err(source) => {
                let err = GenerateError::Write(source);
                error!(error = %err, "batch write failed");
                self.bus.publish(EventKind::Critical, err.to_string(), None);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;

    use crate::events::EventLog;

    /// Records what it was asked to write without touching the filesystem.
    #[derive(Default)]
    struct MemoryWriter {
        written: RefCell<Vec<Record>>,
    }

    impl BatchWriter for MemoryWriter {
        fn write(&self, records: &[Record], output_dir: &Path) -> seti_txt::Result<PathBuf> {
            self.written.borrow_mut().extend_from_slice(records);
            Ok(output_dir.join(seti_txt::output_filename(&records[0])))
        }
    }

    fn row(period: &str) -> Value {
        json!({"period": period, "ipress_code": "12345678", "total_deliveries": 1})
    }

    #[test]
    fn test_rejected_rows_are_skipped_in_order() {
        let log = EventLog::new();
        let mut dispatcher = BatchDispatcher::with_writer(MemoryWriter::default());
        dispatcher.subscribe(log.clone());

        let rows = vec![row("202601"), row("20260"), row("202603")];
        let report = dispatcher
            .generate_with_report("E", &rows, Path::new("out"))
            .unwrap();

        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 2);
        assert_eq!(report.total_rows(), 3);
        assert_eq!(report.path, Path::new("out/12345678_2026_01_TEE0.TXT"));

        let written = dispatcher.writer().written.borrow();
        let periods: Vec<&str> = written.iter().map(|r| r.header().period.as_str()).collect();
        assert_eq!(periods, vec!["202601", "202603"]);
        assert_eq!(
            log.kinds(),
            vec![EventKind::Start, EventKind::Error, EventKind::Success]
        );
    }

    #[test]
    fn test_empty_rows_is_empty_batch() {
        let log = EventLog::new();
        let mut dispatcher = BatchDispatcher::with_writer(MemoryWriter::default());
        dispatcher.subscribe(log.clone());
        let err = dispatcher.generate("A", &[], Path::new("out")).unwrap_err();
        assert!(matches!(err, GenerateError::EmptyBatch { rejected: 0, .. }));
        assert_eq!(log.kinds(), vec![EventKind::Start, EventKind::Critical]);
        assert!(dispatcher.writer().written.borrow().is_empty());
    }

    #[test]
    fn test_unsupported_table_publishes_nothing() {
        let log = EventLog::new();
        let mut dispatcher = BatchDispatcher::with_writer(MemoryWriter::default());
        dispatcher.subscribe(log.clone());
        let err = dispatcher
            .generate("Z9", &[row("202601")], Path::new("out"))
            .unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedSchema { .. }));
        assert!(log.events().is_empty());
    }
}
