use std::path::PathBuf;

use churn_load::LoadReport;
use churn_transform::{CleanReport, TransformReport};

/// Outcome of a full `run`.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub source: PathBuf,
    pub database: PathBuf,
    pub rows_ingested: usize,
    pub columns_ingested: usize,
    pub clean: CleanReport,
    pub transform: TransformReport,
    /// Columns no partition claimed; not loaded.
    pub unassigned: Vec<String>,
    pub load: LoadReport,
    /// Intermediate CSV files written during the run, in write order.
    pub artifacts: Vec<PathBuf>,
}
