//! Churn pipeline with explicit stages.
//!
//! The stages run strictly in order:
//! 1. **Ingest**: read the delimited source into a row set
//! 2. **Clean**: repair monetary values, drop duplicate rows, trim names
//! 3. **Transform**: normalize names, recode Yes/No, coerce flags
//! 4. **Decompose**: split into fact and dimension partitions
//! 5. **Load**: replace each relation in the SQLite store
//!
//! Each stage runs in its own span and logs its duration. The first failing
//! stage aborts the run.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use churn_ingest::{IngestOptions, ingest, profile};
use churn_load::{LoadReport, SqliteSink, decompose, export_partitions, load, write_frame_csv};
use churn_model::{StarPartitions, StarSchema};
use churn_transform::{
    CleanOptions, CleanResult, TransformOptions, TransformResult, clean_with_report,
    transform_with_report,
};

use crate::config::RunPlan;
use crate::types::RunSummary;

pub fn ingest_stage(source: &Path, options: &IngestOptions) -> Result<DataFrame> {
    let span = info_span!("ingest", source = %source.display());
    let start = Instant::now();
    let df = span
        .in_scope(|| ingest(source, options))
        .with_context(|| format!("ingest {}", source.display()))?;
    span.in_scope(|| {
        let profile = profile(&df);
        debug!(
            duplicate_rows = profile.duplicate_rows,
            null_cells = profile.columns.iter().map(|c| c.null_count).sum::<usize>(),
            "source profile"
        );
        info!(
            rows = df.height(),
            columns = df.width(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
    });
    Ok(df)
}

pub fn clean_stage(df: DataFrame) -> Result<CleanResult> {
    let span = info_span!("clean");
    let start = Instant::now();
    let result = span
        .in_scope(|| clean_with_report(df, &CleanOptions::default()))
        .context("clean row set")?;
    span.in_scope(|| {
        info!(
            rows = result.data.height(),
            repaired_values = result.report.repaired_values,
            duplicates_removed = result.report.duplicates_removed,
            duration_ms = start.elapsed().as_millis(),
            "clean complete"
        );
    });
    Ok(result)
}

pub fn transform_stage(df: DataFrame) -> Result<TransformResult> {
    let span = info_span!("transform");
    let start = Instant::now();
    let result = span
        .in_scope(|| transform_with_report(df, &TransformOptions::default()))
        .context("transform row set")?;
    span.in_scope(|| {
        info!(
            rows = result.data.height(),
            columns = result.data.width(),
            recoded = result.report.recoded_columns.len(),
            coerced = result.report.coerced_columns.len(),
            duration_ms = start.elapsed().as_millis(),
            "transform complete"
        );
    });
    Ok(result)
}

pub fn decompose_stage(df: &DataFrame, schema: &StarSchema) -> Result<StarPartitions> {
    let span = info_span!("decompose");
    let start = Instant::now();
    let partitions = span
        .in_scope(|| decompose(df, schema))
        .context("decompose into star schema")?;
    span.in_scope(|| {
        info!(
            partitions = partitions.iter().count(),
            unassigned = partitions.unassigned.len(),
            duration_ms = start.elapsed().as_millis(),
            "decompose complete"
        );
    });
    Ok(partitions)
}

pub fn load_stage(partitions: &StarPartitions, database: &Path) -> Result<LoadReport> {
    let span = info_span!("load", database = %database.display());
    let start = Instant::now();
    let report = span.in_scope(|| -> Result<LoadReport> {
        let mut sink = SqliteSink::open_path(database)
            .with_context(|| format!("open database {}", database.display()))?;
        Ok(load(partitions, &mut sink)?)
    })?;
    span.in_scope(|| {
        info!(
            relations = report.relations.len(),
            rows = report.total_rows(),
            duration_ms = start.elapsed().as_millis(),
            "load complete"
        );
    });
    Ok(report)
}

/// Ingest then clean, as `clean` and `transform` need.
pub fn ingest_and_clean(source: &Path, options: &IngestOptions) -> Result<CleanResult> {
    let raw = ingest_stage(source, options)?;
    clean_stage(raw)
}

/// Run every stage against `plan`, writing any configured artifacts.
pub fn run_pipeline(plan: &RunPlan) -> Result<RunSummary> {
    let run_span = info_span!("run", source = %plan.source_path.display());
    let _guard = run_span.enter();
    let start = Instant::now();
    let mut artifacts: Vec<PathBuf> = Vec::new();

    let raw = ingest_stage(&plan.source_path, &plan.ingest)?;
    let (rows_ingested, columns_ingested) = (raw.height(), raw.width());

    let cleaned = clean_stage(raw)?;
    if let Some(path) = &plan.cleaned_path {
        write_frame_csv(&cleaned.data, path)?;
        artifacts.push(path.clone());
    }

    let transformed = transform_stage(cleaned.data)?;
    if let Some(path) = &plan.output_path {
        write_frame_csv(&transformed.data, path)?;
        artifacts.push(path.clone());
    }

    let partitions = decompose_stage(&transformed.data, &plan.schema)?;
    if let Some(dir) = &plan.partitions_dir {
        artifacts.extend(export_partitions(&partitions, dir)?);
    }

    let load = load_stage(&partitions, &plan.database_path)?;
    info!(
        rows = load.total_rows(),
        duration_ms = start.elapsed().as_millis(),
        "pipeline complete"
    );

    Ok(RunSummary {
        source: plan.source_path.clone(),
        database: plan.database_path.clone(),
        rows_ingested,
        columns_ingested,
        clean: cleaned.report,
        transform: transformed.report,
        unassigned: partitions.unassigned,
        load,
        artifacts,
    })
}
