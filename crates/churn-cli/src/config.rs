//! Pipeline configuration.
//!
//! Values come from an optional TOML file and are overridden by CLI flags.
//! [`PipelineConfig::resolve`] turns the merged values into a [`RunPlan`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;

use churn_ingest::IngestOptions;
use churn_model::{PartitionSpec, StarSchema};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    pub source_path: Option<PathBuf>,
    /// Destination for the transformed row set.
    pub output_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
    /// Destination for the cleaned row set.
    pub cleaned_path: Option<PathBuf>,
    /// Directory receiving one CSV per partition.
    pub partitions_dir: Option<PathBuf>,
    pub delimiter: Option<char>,
    /// Extra dimensions appended to the default schema.
    #[serde(default, rename = "partition")]
    pub partitions: Vec<PartitionSpec>,
}

/// Everything a full run needs, after merging and validation.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub source_path: PathBuf,
    pub database_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub cleaned_path: Option<PathBuf>,
    pub partitions_dir: Option<PathBuf>,
    pub ingest: IngestOptions,
    pub schema: StarSchema,
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("parse pipeline config")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Read `path` when given, otherwise start from defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Overlay `overrides` on `self`. Set fields in `overrides` win and
    /// partitions from both are kept.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        let mut partitions = self.partitions;
        partitions.extend(overrides.partitions);
        Self {
            source_path: overrides.source_path.or(self.source_path),
            output_path: overrides.output_path.or(self.output_path),
            database_path: overrides.database_path.or(self.database_path),
            cleaned_path: overrides.cleaned_path.or(self.cleaned_path),
            partitions_dir: overrides.partitions_dir.or(self.partitions_dir),
            delimiter: overrides.delimiter.or(self.delimiter),
            partitions,
        }
    }

    pub fn ingest_options(&self) -> Result<IngestOptions> {
        let options = IngestOptions::default();
        match self.delimiter {
            None => Ok(options),
            Some(ch) => {
                let byte = u8::try_from(ch)
                    .ok()
                    .filter(u8::is_ascii)
                    .ok_or_else(|| anyhow!("delimiter {ch:?} is not a single ASCII character"))?;
                Ok(options.with_delimiter(byte))
            }
        }
    }

    /// Default star schema plus the configured dimensions.
    pub fn star_schema(&self) -> Result<StarSchema> {
        self.partitions
            .iter()
            .cloned()
            .try_fold(StarSchema::default(), |schema, spec| {
                let name = spec.name.clone();
                schema
                    .with_partition(spec)
                    .with_context(|| format!("add partition {name}"))
            })
    }

    pub fn resolve(&self) -> Result<RunPlan> {
        let Some(source_path) = self.source_path.clone() else {
            bail!("source_path is not set (use --source or the config file)");
        };
        let Some(database_path) = self.database_path.clone() else {
            bail!("database_path is not set (use --database or the config file)");
        };
        Ok(RunPlan {
            source_path,
            database_path,
            output_path: self.output_path.clone(),
            cleaned_path: self.cleaned_path.clone(),
            partitions_dir: self.partitions_dir.clone(),
            ingest: self.ingest_options()?,
            schema: self.star_schema()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values() {
        let file = PipelineConfig::from_toml_str(
            r#"
            source_path = "data/in.csv"
            database_path = "out/file.db"
            output_path = "out/clean.csv"
            "#,
        )
        .unwrap();
        let flags = PipelineConfig {
            database_path: Some(PathBuf::from("cli.db")),
            ..PipelineConfig::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.source_path, Some(PathBuf::from("data/in.csv")));
        assert_eq!(merged.database_path, Some(PathBuf::from("cli.db")));
        assert_eq!(merged.output_path, Some(PathBuf::from("out/clean.csv")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(PipelineConfig::from_toml_str("sorce_path = \"x\"").is_err());
    }

    #[test]
    fn resolve_requires_source_and_database() {
        let err = PipelineConfig::default().resolve().unwrap_err();
        assert!(err.to_string().contains("source_path"));

        let only_source = PipelineConfig {
            source_path: Some(PathBuf::from("in.csv")),
            ..PipelineConfig::default()
        };
        let err = only_source.resolve().unwrap_err();
        assert!(err.to_string().contains("database_path"));
    }

    #[test]
    fn delimiter_must_be_ascii() {
        let config = PipelineConfig {
            delimiter: Some(';'),
            ..PipelineConfig::default()
        };
        assert_eq!(config.ingest_options().unwrap().delimiter, b';');

        let config = PipelineConfig {
            delimiter: Some('é'),
            ..PipelineConfig::default()
        };
        assert!(config.ingest_options().is_err());
    }

    #[test]
    fn partition_tables_extend_the_schema() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [[partition]]
            name = "dim_region"
            relation = "dim_region_table"
            columns = ["region"]
            "#,
        )
        .unwrap();
        let schema = config.star_schema().unwrap();
        assert_eq!(schema.dimensions().len(), 4);
        let region = schema.partition("dim_region").unwrap();
        assert_eq!(region.columns, vec!["customerid", "region"]);
    }

    #[test]
    fn conflicting_partition_is_an_error() {
        let config = PipelineConfig::from_toml_str(
            r#"
            [[partition]]
            name = "dim_gender"
            relation = "dim_gender_table"
            columns = ["gender"]
            "#,
        )
        .unwrap();
        let err = config.star_schema().unwrap_err();
        assert!(format!("{err:#}").contains("gender"));
    }
}
