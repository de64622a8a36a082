use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use churn_cli::config::PipelineConfig;
use churn_cli::pipeline::{
    decompose_stage, ingest_and_clean, ingest_stage, load_stage, run_pipeline,
    transform_stage,
};
use churn_cli::types::RunSummary;
use churn_ingest::profile;
use churn_load::{LoadReport, export_partitions, write_frame_csv};

use crate::cli::{LoadArgs, ModelArgs, ProfileArgs, RunArgs, StageArgs};
use crate::summary::{print_profile, print_schema};

fn stage_config(config: Option<&Path>, delimiter: Option<char>) -> Result<PipelineConfig> {
    let overrides = PipelineConfig {
        delimiter,
        ..PipelineConfig::default()
    };
    Ok(PipelineConfig::load_optional(config)?.merge(overrides))
}

pub fn run_run(config: Option<&Path>, args: &RunArgs) -> Result<RunSummary> {
    let merged = PipelineConfig::load_optional(config)?.merge(args.as_overrides());
    let plan = merged.resolve()?;
    run_pipeline(&plan)
}

pub fn run_profile(config: Option<&Path>, args: &ProfileArgs) -> Result<()> {
    let options = stage_config(config, args.delimiter)?.ingest_options()?;
    let df = ingest_stage(&args.source, &options)?;
    print_profile(&profile(&df));
    Ok(())
}

pub fn run_clean(config: Option<&Path>, args: &StageArgs) -> Result<()> {
    let options = stage_config(config, args.delimiter)?.ingest_options()?;
    let cleaned = ingest_and_clean(&args.source, &options)?;
    write_frame_csv(&cleaned.data, &args.output)?;
    println!(
        "Wrote {} ({} rows; repaired {}, removed {} duplicates)",
        args.output.display(),
        cleaned.data.height(),
        cleaned.report.repaired_values,
        cleaned.report.duplicates_removed
    );
    Ok(())
}

pub fn run_transform(config: Option<&Path>, args: &StageArgs) -> Result<()> {
    let options = stage_config(config, args.delimiter)?.ingest_options()?;
    let cleaned = ingest_and_clean(&args.source, &options)?;
    let transformed = transform_stage(cleaned.data)?;
    write_frame_csv(&transformed.data, &args.output)?;
    println!(
        "Wrote {} ({} rows x {} columns)",
        args.output.display(),
        transformed.data.height(),
        transformed.data.width()
    );
    Ok(())
}

pub fn run_model(config: Option<&Path>, args: &ModelArgs) -> Result<()> {
    let config = PipelineConfig::load_optional(config)?;
    let df = ingest_stage(&args.transformed, &config.ingest_options()?)?;
    let partitions = decompose_stage(&df, &config.star_schema()?)?;
    let paths = export_partitions(&partitions, &args.dir)
        .with_context(|| format!("export partitions to {}", args.dir.display()))?;
    for path in paths {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

pub fn run_load(config: Option<&Path>, args: &LoadArgs) -> Result<LoadReport> {
    let config = PipelineConfig::load_optional(config)?;
    let df = ingest_stage(&args.transformed, &config.ingest_options()?)?;
    let partitions = decompose_stage(&df, &config.star_schema()?)?;
    let report = load_stage(&partitions, &args.database)?;
    info!(database = %args.database.display(), "load finished");
    Ok(report)
}

pub fn run_schema(config: Option<&Path>) -> Result<()> {
    let schema = PipelineConfig::load_optional(config)?.star_schema()?;
    print_schema(&schema);
    Ok(())
}

