//! Decomposition of the transformed row set into a star schema, and
//! replace-on-load persistence of the resulting partitions.
//!
//! - **decompose**: column-membership split into fact/dimension frames
//! - **sink**: the `Sink` trait and its error type
//! - **sqlite**: SQLite sink with transactional drop/create/insert
//! - **loader**: ordered, abort-on-first-failure load of all partitions
//! - **artifacts**: CSV files for intermediate row sets and partitions

pub mod artifacts;
pub mod decompose;
pub mod loader;
pub mod sink;
pub mod sqlite;

pub use artifacts::{export_partitions, write_frame_csv};
pub use decompose::decompose;
pub use loader::{LoadReport, LoadedRelation, load};
pub use sink::{Sink, SinkError};
pub use sqlite::{SqliteSink, create_table_sql, insert_sql, quote_identifier};
