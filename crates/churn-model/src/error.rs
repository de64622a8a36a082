#![deny(unsafe_code)]

use std::path::PathBuf;

use polars::prelude::PolarsError;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a pipeline run.
///
/// Monetary parse failures are repaired in place and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("source unavailable {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed source {path}: {message}")]
    MalformedSource { path: PathBuf, message: String },

    #[error("column names {first:?} and {second:?} both normalize to {normalized:?}")]
    SchemaCollision {
        first: String,
        second: String,
        normalized: String,
    },

    #[error("unrecognized category {value:?} in column {column} at row {row}")]
    UnrecognizedCategory {
        column: String,
        row: usize,
        value: String,
    },

    #[error("cannot coerce {value:?} in column {column} at row {row} to integer")]
    TypeCoercionError {
        column: String,
        row: usize,
        value: String,
    },

    #[error("partition {partition} requires missing column {column}")]
    MissingColumn { partition: String, column: String },

    #[error("failed to write relation {relation}: {source}")]
    SinkWriteFailure {
        relation: String,
        #[source]
        source: BoxedSource,
    },

    #[error("failed to write artifact {path}: {source}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: BoxedSource,
    },

    #[error("frame error: {0}")]
    Frame(#[from] PolarsError),
}

impl PipelineError {
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MalformedSource {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn artifact(path: impl Into<PathBuf>, source: impl Into<BoxedSource>) -> Self {
        Self::Artifact {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
