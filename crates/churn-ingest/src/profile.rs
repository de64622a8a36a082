//! Row-set profiling: null counts, dtypes, and duplicate records.

use std::collections::{BTreeSet, HashSet};

use polars::prelude::{AnyValue, DataFrame};

use crate::polars_utils::{any_to_text, row_keys};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    pub distinct: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
    /// Rows that exactly repeat an earlier row.
    pub duplicate_rows: usize,
}

pub fn profile(df: &DataFrame) -> FrameProfile {
    let columns = df
        .get_columns()
        .iter()
        .map(|column| {
            let mut distinct = BTreeSet::new();
            for idx in 0..column.len() {
                if let Some(text) = any_to_text(column.get(idx).unwrap_or(AnyValue::Null)) {
                    distinct.insert(text);
                }
            }
            ColumnProfile {
                name: column.name().to_string(),
                dtype: column.dtype().to_string(),
                null_count: column.null_count(),
                distinct: distinct.len(),
            }
        })
        .collect();

    let mut seen = HashSet::new();
    let duplicate_rows = row_keys(df)
        .into_iter()
        .filter(|key| !seen.insert(key.clone()))
        .count();

    FrameProfile {
        rows: df.height(),
        columns,
        duplicate_rows,
    }
}
