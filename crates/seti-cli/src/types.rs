use std::path::PathBuf;

use seti_core::BatchReport;

#[derive(Debug)]
pub struct GenerateOutcome {
    pub table_id: String,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub total_rows: usize,
    /// Messages of rejected rows, in input order, redacted like the log.
    pub row_errors: Vec<String>,
    pub report: Option<BatchReport>,
    /// Fatal error that stopped the batch.
    pub failure: Option<String>,
}

impl GenerateOutcome {
    pub fn has_errors(&self) -> bool {
        self.failure.is_some()
    }

    pub fn accepted(&self) -> usize {
        self.report.as_ref().map_or(0, |report| report.accepted)
    }
}
