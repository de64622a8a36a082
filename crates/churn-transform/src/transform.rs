//! Transformation stage.
//!
//! Renames every column to snake_case, recodes Yes/No columns to 1/0 and
//! coerces flag columns to integers. Designated columns that are absent are
//! skipped; all other columns pass through unchanged.

use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::debug;

use churn_ingest::column_names;
use churn_model::Result;
use churn_model::columns::{BINARY_COLUMNS, FLAG_COLUMNS};

use crate::normalization::binary::recode_binary_column;
use crate::normalization::names::{normalize_column_name, rename_columns};
use crate::normalization::numeric::coerce_integer_column;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Yes/No columns (normalized names).
    pub binary_columns: Vec<String>,
    /// Integer flag columns (normalized names).
    pub flag_columns: Vec<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            binary_columns: BINARY_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
            flag_columns: FLAG_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Number of columns whose name changed.
    pub renamed: usize,
    pub recoded_columns: Vec<String>,
    pub coerced_columns: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub data: DataFrame,
    pub report: TransformReport,
}

/// Transform with the default options.
pub fn transform(df: DataFrame) -> Result<DataFrame> {
    transform_with_report(df, &TransformOptions::default()).map(|result| result.data)
}

pub fn transform_with_report(df: DataFrame, options: &TransformOptions) -> Result<TransformResult> {
    let before = column_names(&df);
    let renamed = before
        .iter()
        .filter(|name| normalize_column_name(name) != **name)
        .count();
    let mut df = rename_columns(df, normalize_column_name)?;
    let present: BTreeSet<String> = column_names(&df).into_iter().collect();

    let mut report = TransformReport {
        renamed,
        ..TransformReport::default()
    };
    for column in &options.binary_columns {
        if present.contains(column) {
            recode_binary_column(&mut df, column)?;
            report.recoded_columns.push(column.clone());
        } else {
            debug!(column = %column, "binary column not present");
        }
    }
    for column in &options.flag_columns {
        if present.contains(column) {
            coerce_integer_column(&mut df, column)?;
            report.coerced_columns.push(column.clone());
        } else {
            debug!(column = %column, "flag column not present");
        }
    }
    debug!(
        rows = df.height(),
        renamed = report.renamed,
        recoded = report.recoded_columns.len(),
        "transformed row set"
    );
    Ok(TransformResult { data: df, report })
}
