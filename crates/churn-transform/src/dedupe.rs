use std::collections::HashSet;

use polars::prelude::{BooleanChunked, DataFrame, NewChunkedArray};

use churn_ingest::row_keys;
use churn_model::Result;

/// Drop rows that repeat an earlier row across every column.
///
/// The first occurrence is kept and the order of kept rows is preserved.
pub fn dedupe_rows(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let mut seen = HashSet::with_capacity(df.height());
    let keep: Vec<bool> = row_keys(df)
        .into_iter()
        .map(|key| seen.insert(key))
        .collect();
    if keep.iter().all(|k| *k) {
        return Ok(df.clone());
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}
