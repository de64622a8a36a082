pub mod csv_table;
pub mod frame_builder;
pub mod polars_utils;
pub mod profile;

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::info;

use churn_model::Result;

pub use csv_table::{CsvTable, IngestOptions, read_csv_table};
pub use frame_builder::{InferredType, build_frame, infer_column_type};
pub use polars_utils::{
    any_to_f64, any_to_i64, any_to_string, any_to_text, column_names, parse_f64, parse_i64,
    row_keys,
};
pub use profile::{ColumnProfile, FrameProfile, profile};

/// Read a delimited source into a raw row set.
///
/// The schema is the source header in source order. Cells are typed by
/// inference (unless disabled) but otherwise left as read.
pub fn ingest(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let table = read_csv_table(path, options)?;
    let frame = build_frame(&table, options)?;
    info!(
        source = %path.display(),
        rows = frame.height(),
        columns = frame.width(),
        "loaded source"
    );
    Ok(frame)
}
