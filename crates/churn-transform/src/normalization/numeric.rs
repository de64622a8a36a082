//! Numeric normalization.

use polars::prelude::{AnyValue, DataFrame, NamedFrom, Series};
use tracing::trace;

use churn_ingest::{any_to_f64, any_to_i64, any_to_text};
use churn_model::{PipelineError, Result};

/// Value written in place of an unparseable monetary cell.
pub const MONETARY_DEFAULT: f64 = 0.0;

/// Parse a monetary cell. `None` means the cell must be repaired.
pub fn parse_monetary(value: AnyValue<'_>) -> Option<f64> {
    any_to_f64(value).filter(|v| !v.is_nan())
}

/// Replace a monetary column with its `f64` form, repairing unparseable cells
/// to [`MONETARY_DEFAULT`]. Returns the number of repaired cells.
pub fn repair_monetary_column(df: &mut DataFrame, name: &str) -> Result<usize> {
    let column = df.column(name)?;
    let column_name = column.name().clone();
    let mut repaired = 0usize;
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        match parse_monetary(column.get(idx).unwrap_or(AnyValue::Null)) {
            Some(value) => values.push(value),
            None => {
                trace!(column = name, row = idx, "repaired monetary value");
                repaired += 1;
                values.push(MONETARY_DEFAULT);
            }
        }
    }
    df.with_column(Series::new(column_name, values))?;
    Ok(repaired)
}

/// Replace a flag column with its `i64` form.
///
/// Nulls, fractional floats and non-integer text are errors.
pub fn coerce_integer_column(df: &mut DataFrame, name: &str) -> Result<()> {
    let column = df.column(name)?;
    let column_name = column.name().clone();
    let mut values = Vec::with_capacity(column.len());
    for idx in 0..column.len() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        match any_to_i64(value.clone()) {
            Some(parsed) => values.push(parsed),
            None => {
                return Err(PipelineError::TypeCoercionError {
                    column: name.to_string(),
                    row: idx,
                    value: any_to_text(value).unwrap_or_else(|| "null".to_string()),
                });
            }
        }
    }
    df.with_column(Series::new(column_name, values))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monetary_parse_rejects_blank_and_nan() {
        assert_eq!(parse_monetary(AnyValue::String("29.85")), Some(29.85));
        assert_eq!(parse_monetary(AnyValue::String(" ")), None);
        assert_eq!(parse_monetary(AnyValue::String("NaN")), None);
        assert_eq!(parse_monetary(AnyValue::Null), None);
        assert_eq!(parse_monetary(AnyValue::Int64(20)), Some(20.0));
    }
}
