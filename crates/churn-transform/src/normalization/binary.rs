//! Yes/No label recoding.

use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};

use churn_ingest::any_to_text;
use churn_model::columns::{NO_LABEL, YES_LABEL};
use churn_model::{PipelineError, Result};

/// Map a label to its integer code. Matching is exact.
pub fn label_code(label: &str) -> Option<i64> {
    match label {
        YES_LABEL => Some(1),
        NO_LABEL => Some(0),
        _ => None,
    }
}

fn cell_code(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::String(s) => label_code(s),
        AnyValue::StringOwned(s) => label_code(s.as_str()),
        _ => None,
    }
}

/// Replace a Yes/No column with 1/0 codes.
///
/// Any other value, null included, is an [`PipelineError::UnrecognizedCategory`].
pub fn recode_binary_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let column = df.column(name)?;
    let column_name = column.name().clone();
    let mut codes = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        let Some(code) = cell_code(&value) else {
            return Err(PipelineError::UnrecognizedCategory {
                column: name.to_string(),
                row: idx,
                value: any_to_text(value).unwrap_or_else(|| "null".to_string()),
            });
        };
        codes.push(code);
    }
    df.with_column(Series::new(column_name, codes))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_case_sensitive() {
        assert_eq!(label_code("Yes"), Some(1));
        assert_eq!(label_code("No"), Some(0));
        assert_eq!(label_code("yes"), None);
        assert_eq!(label_code("No phone service"), None);
    }
}
