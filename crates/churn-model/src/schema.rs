//! Star-schema membership table.
//!
//! The split of the transformed row set into fact and dimension partitions is
//! plain data: each [`PartitionSpec`] names its relation and the ordered
//! columns it owns. Adding a dimension means adding a spec, either in code via
//! [`StarSchema::with_partition`] or from a `[[partition]]` table in the
//! pipeline config.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::columns::KEY_COLUMN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionKind {
    Fact,
    #[default]
    Dimension,
}

/// One partition of the star schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionSpec {
    /// Partition name, also used for exported CSV file names.
    pub name: String,
    /// Target relation in the sink.
    pub relation: String,
    #[serde(default)]
    pub kind: PartitionKind,
    /// Ordered columns, starting with the key.
    pub columns: Vec<String>,
}

impl PartitionSpec {
    pub fn new(
        name: impl Into<String>,
        relation: impl Into<String>,
        kind: PartitionKind,
        columns: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            relation: relation.into(),
            kind,
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// Columns other than `key`.
    pub fn attribute_columns<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(move |c| *c != key)
    }

    fn with_leading_key(mut self, key: &str) -> Self {
        self.columns.retain(|c| c != key);
        self.columns.insert(0, key.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("star schema must have exactly one fact partition, found {0}")]
    FactCount(usize),
    #[error("duplicate partition name: {0}")]
    DuplicatePartition(String),
    #[error("duplicate relation name: {0}")]
    DuplicateRelation(String),
    #[error("column {column} is assigned to both {first} and {second}")]
    OverlappingColumn {
        column: String,
        first: String,
        second: String,
    },
    #[error("partition {0} has no columns besides the key")]
    EmptyPartition(String),
}

/// Fact/dimension membership table keyed on a shared column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarSchema {
    key: String,
    fact: PartitionSpec,
    dimensions: Vec<PartitionSpec>,
}

impl Default for StarSchema {
    fn default() -> Self {
        Self {
            key: KEY_COLUMN.to_string(),
            fact: PartitionSpec::new(
                "fact",
                "fact_table",
                PartitionKind::Fact,
                &[
                    "customerid",
                    "tenure",
                    "monthlycharges",
                    "totalcharges",
                    "churn",
                ],
            ),
            dimensions: vec![
                PartitionSpec::new(
                    "dim_customer",
                    "dim_customer_table",
                    PartitionKind::Dimension,
                    &[
                        "customerid",
                        "gender",
                        "seniorcitizen",
                        "partner",
                        "dependents",
                    ],
                ),
                PartitionSpec::new(
                    "dim_services",
                    "dim_services_table",
                    PartitionKind::Dimension,
                    &[
                        "customerid",
                        "phoneservice",
                        "multiplelines",
                        "internetservice",
                        "onlinesecurity",
                        "onlinebackup",
                        "deviceprotection",
                        "techsupport",
                        "streamingtv",
                        "streamingmovies",
                    ],
                ),
                PartitionSpec::new(
                    "dim_subscription",
                    "dim_subscription_table",
                    PartitionKind::Dimension,
                    &[
                        "customerid",
                        "contract",
                        "paperlessbilling",
                        "paymentmethod",
                    ],
                ),
            ],
        }
    }
}

impl StarSchema {
    /// Build and validate a schema from explicit partitions.
    ///
    /// Exactly one partition must be the fact; the rest keep their order.
    pub fn new(
        key: impl Into<String>,
        partitions: Vec<PartitionSpec>,
    ) -> Result<Self, SchemaError> {
        let key = key.into();
        let (mut facts, dimensions): (Vec<_>, Vec<_>) = partitions
            .into_iter()
            .map(|spec| spec.with_leading_key(&key))
            .partition(|spec| spec.kind == PartitionKind::Fact);
        if facts.len() != 1 {
            return Err(SchemaError::FactCount(facts.len()));
        }
        let schema = Self {
            key,
            fact: facts.remove(0),
            dimensions,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Append a dimension, re-validating the whole table.
    pub fn with_partition(mut self, spec: PartitionSpec) -> Result<Self, SchemaError> {
        if spec.kind == PartitionKind::Fact {
            return Err(SchemaError::FactCount(2));
        }
        self.dimensions.push(spec.with_leading_key(&self.key));
        self.validate()?;
        Ok(self)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn fact(&self) -> &PartitionSpec {
        &self.fact
    }

    pub fn dimensions(&self) -> &[PartitionSpec] {
        &self.dimensions
    }

    /// Fact first, then dimensions in order.
    pub fn partitions(&self) -> impl Iterator<Item = &PartitionSpec> {
        std::iter::once(&self.fact).chain(self.dimensions.iter())
    }

    pub fn partition(&self, name: &str) -> Option<&PartitionSpec> {
        self.partitions().find(|p| p.name == name)
    }

    /// Every column named by some partition, key included once.
    pub fn assigned_columns(&self) -> BTreeSet<&str> {
        self.partitions()
            .flat_map(|spec| spec.columns.iter().map(String::as_str))
            .collect()
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut names = BTreeSet::new();
        let mut relations = BTreeSet::new();
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for spec in self.partitions() {
            if !names.insert(spec.name.as_str()) {
                return Err(SchemaError::DuplicatePartition(spec.name.clone()));
            }
            if !relations.insert(spec.relation.as_str()) {
                return Err(SchemaError::DuplicateRelation(spec.relation.clone()));
            }
            let mut attributes = 0usize;
            for column in spec.attribute_columns(&self.key) {
                attributes += 1;
                if let Some(first) = owners.insert(column, spec.name.as_str()) {
                    return Err(SchemaError::OverlappingColumn {
                        column: column.to_string(),
                        first: first.to_string(),
                        second: spec.name.clone(),
                    });
                }
            }
            if attributes == 0 {
                return Err(SchemaError::EmptyPartition(spec.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_is_valid() {
        let schema = StarSchema::default();
        schema.validate().expect("default schema");
        assert_eq!(schema.fact().relation, "fact_table");
        assert_eq!(schema.dimensions().len(), 3);
        for spec in schema.partitions() {
            assert_eq!(spec.columns.first().map(String::as_str), Some(KEY_COLUMN));
        }
    }

    #[test]
    fn key_is_prepended_once() {
        let spec = PartitionSpec::new(
            "dim_extra",
            "dim_extra_table",
            PartitionKind::Dimension,
            &["region", "customerid"],
        );
        let schema = StarSchema::default().with_partition(spec).unwrap();
        let extra = schema.partition("dim_extra").unwrap();
        assert_eq!(extra.columns, vec!["customerid", "region"]);
    }
}
