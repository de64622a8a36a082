//! Column renaming with collision detection.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;

use churn_model::{PipelineError, Result};

/// Lower-case a column name and replace each space with an underscore.
pub fn normalize_column_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Rename every column with `rename`.
///
/// Two distinct source names mapping to the same target is a
/// [`PipelineError::SchemaCollision`]; nothing is overwritten.
pub fn rename_columns(df: DataFrame, rename: impl Fn(&str) -> String) -> Result<DataFrame> {
    let mut owners: BTreeMap<String, String> = BTreeMap::new();
    let mut columns = Vec::with_capacity(df.width());
    for mut column in df.take_columns() {
        let original = column.name().to_string();
        let renamed = rename(&original);
        if let Some(first) = owners.insert(renamed.clone(), original.clone()) {
            return Err(PipelineError::SchemaCollision {
                first,
                second: original,
                normalized: renamed,
            });
        }
        column.rename(renamed.into());
        columns.push(column);
    }
    Ok(DataFrame::new(columns)?)
}
