//! Shared fixtures for load tests.

#![allow(dead_code)]

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

const TEXT_COLUMNS: &[&str] = &[
    "gender",
    "multiplelines",
    "internetservice",
    "onlinesecurity",
    "onlinebackup",
    "deviceprotection",
    "techsupport",
    "streamingtv",
    "streamingmovies",
    "contract",
    "paymentmethod",
];

const CODE_COLUMNS: &[&str] = &[
    "seniorcitizen",
    "partner",
    "dependents",
    "phoneservice",
    "paperlessbilling",
    "churn",
];

/// A transformed row set with `rows` customers and every default column.
pub fn transformed_frame(rows: usize) -> DataFrame {
    let mut columns: Vec<Column> = Vec::new();
    let ids: Vec<String> = (1..=rows).map(|i| format!("{i:04}")).collect();
    columns.push(Series::new("customerid".into(), ids).into_column());
    let tenure: Vec<i64> = (0..rows as i64).collect();
    columns.push(Series::new("tenure".into(), tenure).into_column());
    let monthly: Vec<f64> = (0..rows).map(|i| 20.5 + i as f64).collect();
    columns.push(Series::new("monthlycharges".into(), monthly).into_column());
    let total: Vec<f64> = (0..rows).map(|i| if i == 0 { 0.0 } else { 100.25 * i as f64 }).collect();
    columns.push(Series::new("totalcharges".into(), total).into_column());
    for name in CODE_COLUMNS {
        let codes: Vec<i64> = (0..rows as i64).map(|i| i % 2).collect();
        columns.push(Series::new((*name).into(), codes).into_column());
    }
    for name in TEXT_COLUMNS {
        let values: Vec<String> = (0..rows).map(|i| format!("{name}-{i}")).collect();
        columns.push(Series::new((*name).into(), values).into_column());
    }
    DataFrame::new(columns).unwrap()
}
