use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use csv::ReaderBuilder;

use churn_model::{PipelineError, Result};

/// Options controlling how a delimited source is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestOptions {
    /// Field delimiter byte.
    pub delimiter: u8,
    /// Infer integer/float column types. When false every column is text.
    pub infer_types: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            infer_types: true,
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_infer_types(mut self, enable: bool) -> Self {
        self.infer_types = enable;
        self
    }
}

/// Untyped source contents. Header names and cells are kept verbatim.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(index: usize, raw: &str) -> String {
    if index == 0 {
        raw.trim_start_matches('\u{feff}').to_string()
    } else {
        raw.to_string()
    }
}

fn csv_error(path: &Path, error: csv::Error) -> PipelineError {
    let message = error.to_string();
    match error.into_kind() {
        csv::ErrorKind::Io(source) => PipelineError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        },
        _ => PipelineError::malformed(path, message),
    }
}

pub fn read_csv_table(path: &Path, options: &IngestOptions) -> Result<CsvTable> {
    let file = File::open(path).map_err(|source| PipelineError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(file);
    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record.map_err(|e| csv_error(path, e))?,
        None => return Err(PipelineError::malformed(path, "missing header row")),
    };
    let headers: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, value)| normalize_header(idx, value))
        .collect();
    let mut seen = BTreeSet::new();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(PipelineError::malformed(
                path,
                format!("duplicate column {name:?} in header"),
            ));
        }
    }

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, e))?;
        if record.len() != headers.len() {
            let line = record.position().map_or(0, csv::Position::line);
            return Err(PipelineError::malformed(
                path,
                format!(
                    "line {line}: expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(CsvTable { headers, rows })
}
