//! DataFrame construction from CSV tables.
//!
//! Empty fields become nulls. Column types are inferred per column from the
//! non-null cells, so a column with a single non-numeric token (a blank
//! `TotalCharges` entry such as `" "`) stays text for the cleaner to repair.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use churn_model::Result;

use crate::csv_table::{CsvTable, IngestOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Integer,
    Float,
    Text,
}

fn is_canonical_integer(value: &str) -> bool {
    value
        .parse::<i64>()
        .is_ok_and(|parsed| parsed.to_string() == value)
}

fn is_plain_float(value: &str) -> bool {
    if value.trim() != value {
        return false;
    }
    let digits = value.trim_start_matches(['-', '+']);
    // "007.5" looks like an identifier, not a number
    let bytes = digits.as_bytes();
    if bytes.len() > 1 && bytes[0] == b'0' && bytes[1].is_ascii_digit() {
        return false;
    }
    value.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Infer the narrowest type that holds every non-null cell.
pub fn infer_column_type<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> InferredType {
    let mut saw_value = false;
    let mut integer = true;
    for value in values.into_iter().flatten() {
        saw_value = true;
        if integer && is_canonical_integer(value) {
            continue;
        }
        integer = false;
        if !is_plain_float(value) {
            return InferredType::Text;
        }
    }
    match (saw_value, integer) {
        (false, _) => InferredType::Text,
        (true, true) => InferredType::Integer,
        (true, false) => InferredType::Float,
    }
}

fn cell(row: &[String], idx: usize) -> Option<&str> {
    row.get(idx)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Build a typed DataFrame from a CSV table, preserving header order.
pub fn build_frame(table: &CsvTable, options: &IngestOptions) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(table.headers.len());
    for (idx, header) in table.headers.iter().enumerate() {
        let values: Vec<Option<&str>> = table.rows.iter().map(|row| cell(row, idx)).collect();
        let kind = if options.infer_types {
            infer_column_type(values.iter().copied())
        } else {
            InferredType::Text
        };
        let series = match kind {
            InferredType::Integer => {
                let parsed: Vec<Option<i64>> = values
                    .iter()
                    .map(|v| v.and_then(|s| s.parse::<i64>().ok()))
                    .collect();
                Series::new(header.as_str().into(), parsed)
            }
            InferredType::Float => {
                let parsed: Vec<Option<f64>> = values
                    .iter()
                    .map(|v| v.and_then(|s| s.parse::<f64>().ok()))
                    .collect();
                Series::new(header.as_str().into(), parsed)
            }
            InferredType::Text => Series::new(header.as_str().into(), values),
        };
        columns.push(series.into_column());
    }
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_columns_require_canonical_tokens() {
        assert_eq!(
            infer_column_type([Some("1"), Some("-20"), None]),
            InferredType::Integer
        );
        assert_eq!(
            infer_column_type([Some("0001"), Some("2")]),
            InferredType::Text
        );
        assert_eq!(infer_column_type([Some("+1")]), InferredType::Float);
    }

    #[test]
    fn mixed_integer_and_decimal_is_float() {
        assert_eq!(
            infer_column_type([Some("29.85"), Some("1889")]),
            InferredType::Float
        );
    }

    #[test]
    fn whitespace_token_forces_text() {
        assert_eq!(
            infer_column_type([Some("29.85"), Some(" ")]),
            InferredType::Text
        );
    }

    #[test]
    fn all_null_column_is_text() {
        assert_eq!(infer_column_type([None, None]), InferredType::Text);
    }
}
