//! Cleaning and transformation stages.
//!
//! - **clean**: monetary repair, full-row de-duplication, header trimming
//! - **transform**: snake_case column names, Yes/No recoding, flag coercion
//! - **dedupe**: order-preserving full-row de-duplication
//! - **normalization**: per-column value and name rules used by both stages

pub mod clean;
pub mod dedupe;
pub mod normalization;
pub mod transform;

pub use clean::{CleanOptions, CleanReport, CleanResult, clean, clean_with_report};
pub use dedupe::dedupe_rows;
pub use normalization::names::{normalize_column_name, rename_columns};
pub use transform::{
    TransformOptions, TransformReport, TransformResult, transform, transform_with_report,
};
