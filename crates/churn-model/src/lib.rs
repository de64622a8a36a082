//! Shared types for the churn star-schema pipeline.
//!
//! - **error**: the pipeline error taxonomy shared by every stage
//! - **columns**: designated column names the stages act on
//! - **schema**: the data-driven fact/dimension membership table
//! - **frame**: named partition frames produced by decomposition

pub mod columns;
pub mod error;
pub mod frame;
pub mod schema;

pub use error::{PipelineError, Result};
pub use frame::{StarPartitions, TableFrame};
pub use schema::{PartitionKind, PartitionSpec, SchemaError, StarSchema};
