//! Tests for the cleaning stage.

use polars::prelude::{AnyValue, Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

use churn_ingest::{any_to_string, column_names};
use churn_model::PipelineError;
use churn_transform::{CleanOptions, clean, clean_with_report};

fn text_df(columns: Vec<(&str, Vec<Option<&str>>)>) -> DataFrame {
    let cols: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    DataFrame::new(cols).unwrap()
}

fn charges(df: &DataFrame) -> Vec<f64> {
    let column = df.column("TotalCharges").unwrap();
    (0..column.len())
        .map(|idx| match column.get(idx).unwrap() {
            AnyValue::Float64(v) => v,
            other => panic!("unexpected cell {other:?}"),
        })
        .collect()
}

#[test]
fn unparseable_charges_become_zero() {
    let df = text_df(vec![
        ("customerID", vec![Some("a"), Some("b"), Some("c"), Some("d")]),
        (
            "TotalCharges",
            vec![Some("29.85"), Some(" "), None, Some("n/a")],
        ),
    ]);
    let result = clean_with_report(df, &CleanOptions::default()).unwrap();
    assert_eq!(charges(&result.data), vec![29.85, 0.0, 0.0, 0.0]);
    assert_eq!(result.report.repaired_values, 3);
    assert_eq!(
        result.data.column("TotalCharges").unwrap().dtype(),
        &DataType::Float64
    );
}

#[test]
fn monetary_column_is_matched_by_trimmed_name() {
    let df = text_df(vec![(" TotalCharges ", vec![Some("1.5"), Some("")])]);
    let cleaned = clean(df).unwrap();
    assert_eq!(column_names(&cleaned), vec!["TotalCharges"]);
    assert_eq!(charges(&cleaned), vec![1.5, 0.0]);
}

#[test]
fn missing_monetary_column_is_skipped() {
    let df = text_df(vec![("customerID", vec![Some("a")])]);
    let cleaned = clean(df).unwrap();
    assert_eq!(cleaned.height(), 1);
}

#[test]
fn duplicates_keep_first_occurrence_in_order() {
    let df = text_df(vec![
        ("id", vec![Some("A"), Some("B"), Some("A"), Some("C"), Some("B")]),
        ("v", vec![Some("1"), Some("2"), Some("1"), Some("3"), Some("2")]),
    ]);
    let result = clean_with_report(df, &CleanOptions::default()).unwrap();
    let ids: Vec<String> = (0..result.data.height())
        .map(|idx| any_to_string(result.data.column("id").unwrap().get(idx).unwrap()))
        .collect();
    assert_eq!(ids, vec!["A", "B", "C"]);
    assert_eq!(result.report.duplicates_removed, 2);
}

#[test]
fn rows_differing_in_one_column_are_kept() {
    let df = text_df(vec![
        ("id", vec![Some("A"), Some("A")]),
        ("v", vec![Some("1"), None]),
    ]);
    assert_eq!(clean(df).unwrap().height(), 2);
}

#[test]
fn header_whitespace_is_trimmed_but_cells_are_not() {
    let df = text_df(vec![("  gender ", vec![Some(" Male ")])]);
    let cleaned = clean(df).unwrap();
    assert_eq!(column_names(&cleaned), vec!["gender"]);
    assert_eq!(
        cleaned.column("gender").unwrap().get(0).unwrap(),
        AnyValue::String(" Male ")
    );
}

#[test]
fn trimmed_header_collision_is_reported() {
    let df = text_df(vec![("a", vec![Some("1")]), (" a", vec![Some("2")])]);
    let err = clean(df).unwrap_err();
    assert!(matches!(err, PipelineError::SchemaCollision { .. }));
}

fn charge_token() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(" ".to_string())),
        "[a-z]{1,4}".prop_map(Some),
        (0u32..100_000).prop_map(|cents| Some(format!("{}.{:02}", cents / 100, cents % 100))),
    ]
}

proptest! {
    #[test]
    fn coerced_value_is_parsed_float_or_zero(tokens in prop::collection::vec(charge_token(), 0..20)) {
        let values: Vec<Option<&str>> = tokens.iter().map(Option::as_deref).collect();
        let ids: Vec<Option<String>> = (0..tokens.len()).map(|i| Some(format!("c{i}"))).collect();
        let id_refs: Vec<Option<&str>> = ids.iter().map(Option::as_deref).collect();
        let df = text_df(vec![("customerID", id_refs), ("TotalCharges", values)]);
        let cleaned = clean(df).unwrap();
        let expected: Vec<f64> = tokens
            .iter()
            .map(|t| t.as_deref().and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| !v.is_nan())
                .unwrap_or(0.0))
            .collect();
        prop_assert_eq!(charges(&cleaned), expected);
    }

    #[test]
    fn clean_is_idempotent(rows in prop::collection::vec((0u8..4, charge_token()), 0..25)) {
        let ids: Vec<Option<String>> = rows.iter().map(|(id, _)| Some(format!("id{id}"))).collect();
        let df = text_df(vec![
            (" customerID", ids.iter().map(Option::as_deref).collect()),
            ("TotalCharges", rows.iter().map(|(_, t)| t.as_deref()).collect()),
        ]);
        let once = clean(df).unwrap();
        let twice = clean(once.clone()).unwrap();
        prop_assert!(once.equals_missing(&twice));
    }
}
