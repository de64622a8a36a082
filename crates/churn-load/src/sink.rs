use std::path::PathBuf;

use polars::prelude::{DataFrame, PolarsError};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("frame error: {0}")]
    Frame(#[from] PolarsError),
    #[error("cannot open store {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("column {column} has unsupported type {dtype}")]
    UnsupportedType { column: String, dtype: String },
}

/// A relational store that partitions are loaded into.
pub trait Sink {
    /// Replace the whole contents of `relation` with `data`.
    ///
    /// Must be atomic: on error the previous relation, if any, is unchanged.
    /// Returns the number of rows written.
    fn replace_relation(&mut self, relation: &str, data: &DataFrame) -> Result<usize, SinkError>;

    /// Drop `relation` if it exists.
    fn drop_relation(&mut self, relation: &str) -> Result<(), SinkError>;
}
