//! Designated column names.
//!
//! Cleaning runs before renaming, so the monetary column is named in its
//! source spelling. Everything after the transform stage uses snake_case.

/// Key shared by the fact table and every dimension.
pub const KEY_COLUMN: &str = "customerid";

/// Monetary columns repaired by the cleaner (source spelling).
pub const MONETARY_COLUMNS: &[&str] = &["TotalCharges"];

/// Yes/No columns recoded to 1/0 by the transformer.
pub const BINARY_COLUMNS: &[&str] = &[
    "partner",
    "dependents",
    "phoneservice",
    "paperlessbilling",
    "churn",
];

/// Flag columns coerced to integers by the transformer.
pub const FLAG_COLUMNS: &[&str] = &["seniorcitizen"];

pub const YES_LABEL: &str = "Yes";
pub const NO_LABEL: &str = "No";
