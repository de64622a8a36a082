//! Cleaning stage.
//!
//! Repairs monetary columns (unparseable values become `0.0`), removes exact
//! duplicate rows, and trims whitespace from column names. Cell values other
//! than the monetary columns are left untouched.

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use churn_ingest::column_names;
use churn_model::Result;
use churn_model::columns::MONETARY_COLUMNS;

use crate::dedupe::dedupe_rows;
use crate::normalization::names::rename_columns;
use crate::normalization::numeric::repair_monetary_column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    /// Monetary columns, matched against trimmed source names.
    pub monetary_columns: Vec<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            monetary_columns: MONETARY_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub repaired_values: usize,
    pub duplicates_removed: usize,
}

#[derive(Debug, Clone)]
pub struct CleanResult {
    pub data: DataFrame,
    pub report: CleanReport,
}

/// Clean with the default options.
pub fn clean(df: DataFrame) -> Result<DataFrame> {
    clean_with_report(df, &CleanOptions::default()).map(|result| result.data)
}

pub fn clean_with_report(df: DataFrame, options: &CleanOptions) -> Result<CleanResult> {
    let mut df = df;
    let names = column_names(&df);
    let mut repaired_values = 0usize;
    for target in &options.monetary_columns {
        match names.iter().find(|name| name.trim() == target.trim()) {
            Some(name) => repaired_values += repair_monetary_column(&mut df, name)?,
            None => warn!(column = %target, "monetary column not present, skipping repair"),
        }
    }

    let before = df.height();
    let df = dedupe_rows(&df)?;
    let duplicates_removed = before - df.height();

    let df = rename_columns(df, |name| name.trim().to_string())?;
    debug!(
        rows = df.height(),
        repaired_values, duplicates_removed, "cleaned row set"
    );
    Ok(CleanResult {
        data: df,
        report: CleanReport {
            repaired_values,
            duplicates_removed,
        },
    })
}
