use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::debug;

use churn_model::{PipelineError, Result, StarPartitions};

/// Write a row set as a headered, comma-delimited CSV file.
///
/// Nulls are written as empty fields. The parent directory is created.
pub fn write_frame_csv(df: &DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PipelineError::artifact(parent, e))?;
    }
    let mut file = File::create(path).map_err(|e| PipelineError::artifact(path, e))?;
    let mut data = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut data)
        .map_err(|e| PipelineError::artifact(path, e))?;
    debug!(path = %path.display(), rows = df.height(), "wrote csv artifact");
    Ok(())
}

/// Write each partition to `<dir>/<partition>.csv`, fact first.
pub fn export_partitions(partitions: &StarPartitions, dir: &Path) -> Result<Vec<PathBuf>> {
    partitions
        .iter()
        .map(|table| {
            let path = dir.join(format!("{}.csv", table.partition));
            write_frame_csv(&table.data, &path)?;
            Ok(path)
        })
        .collect()
}
