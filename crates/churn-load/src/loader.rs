use std::time::Instant;

use tracing::{error, info, info_span};

use churn_model::{PipelineError, Result, StarPartitions};

use crate::sink::Sink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRelation {
    pub partition: String,
    pub relation: String,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub relations: Vec<LoadedRelation>,
}

impl LoadReport {
    pub fn total_rows(&self) -> usize {
        self.relations.iter().map(|r| r.rows).sum()
    }
}

/// Load every partition into `sink`, fact first.
///
/// Each relation is replaced as a unit. The first failing relation aborts
/// the load; relations already written stay replaced and later ones are not
/// attempted.
pub fn load<S: Sink + ?Sized>(partitions: &StarPartitions, sink: &mut S) -> Result<LoadReport> {
    let mut report = LoadReport::default();
    for table in partitions.iter() {
        let span = info_span!("relation", relation = %table.relation);
        let _guard = span.enter();
        let start = Instant::now();

        let rows = sink
            .replace_relation(&table.relation, &table.data)
            .map_err(|source| {
                error!(relation = %table.relation, error = %source, "relation load failed");
                PipelineError::SinkWriteFailure {
                    relation: table.relation.clone(),
                    source: Box::new(source),
                }
            })?;

        info!(
            partition = %table.partition,
            rows,
            duration_ms = start.elapsed().as_millis(),
            "relation replaced"
        );
        report.relations.push(LoadedRelation {
            partition: table.partition.clone(),
            relation: table.relation.clone(),
            rows,
            columns: table.data.width(),
        });
    }
    Ok(report)
}
