use std::collections::BTreeSet;

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use churn_ingest::column_names;
use churn_model::{
    PartitionSpec, PipelineError, Result, StarPartitions, StarSchema, TableFrame,
};

fn check_columns(spec: &PartitionSpec, present: &BTreeSet<String>) -> Result<()> {
    match spec.columns.iter().find(|column| !present.contains(*column)) {
        Some(column) => Err(PipelineError::MissingColumn {
            partition: spec.name.clone(),
            column: column.clone(),
        }),
        None => Ok(()),
    }
}

fn select_partition(df: &DataFrame, spec: &PartitionSpec) -> Result<TableFrame> {
    let data = df.select(spec.columns.iter().map(String::as_str))?;
    debug!(
        partition = %spec.name,
        rows = data.height(),
        columns = data.width(),
        "selected partition"
    );
    Ok(TableFrame::new(&spec.name, &spec.relation, spec.kind, data))
}

/// Split a transformed row set into fact and dimension partitions.
///
/// Every partition is checked before any is built, so a missing column fails
/// the whole decomposition. Each partition keeps all input rows.
pub fn decompose(df: &DataFrame, schema: &StarSchema) -> Result<StarPartitions> {
    let names = column_names(df);
    let present: BTreeSet<String> = names.iter().cloned().collect();
    for spec in schema.partitions() {
        check_columns(spec, &present)?;
    }

    let fact = select_partition(df, schema.fact())?;
    let dimensions = schema
        .dimensions()
        .iter()
        .map(|spec| select_partition(df, spec))
        .collect::<Result<Vec<_>>>()?;

    let assigned = schema.assigned_columns();
    let unassigned: Vec<String> = names
        .into_iter()
        .filter(|name| !assigned.contains(name.as_str()))
        .collect();
    if !unassigned.is_empty() {
        warn!(
            columns = ?unassigned,
            "columns not assigned to any partition will not be loaded"
        );
    }

    Ok(StarPartitions {
        fact,
        dimensions,
        unassigned,
    })
}
