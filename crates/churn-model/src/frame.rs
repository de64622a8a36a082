//! Partition frames produced by decomposition.
//!
//! A [`TableFrame`] pairs a Polars DataFrame with the partition it came from
//! and the relation it is loaded into. [`StarPartitions`] is the full output
//! of one decomposition: the fact frame, the dimension frames in schema
//! order, and any input columns no partition claimed.

use polars::prelude::DataFrame;

use crate::schema::PartitionKind;

#[derive(Debug, Clone)]
pub struct TableFrame {
    /// Partition name (e.g. "dim_customer").
    pub partition: String,
    /// Target relation (e.g. "dim_customer_table").
    pub relation: String,
    pub kind: PartitionKind,
    pub data: DataFrame,
}

impl TableFrame {
    pub fn new(
        partition: impl Into<String>,
        relation: impl Into<String>,
        kind: PartitionKind,
        data: DataFrame,
    ) -> Self {
        Self {
            partition: partition.into(),
            relation: relation.into(),
            kind,
            data,
        }
    }

    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct StarPartitions {
    pub fact: TableFrame,
    pub dimensions: Vec<TableFrame>,
    /// Input columns not assigned to any partition.
    pub unassigned: Vec<String>,
}

impl StarPartitions {
    pub fn dimension(&self, name: &str) -> Option<&TableFrame> {
        self.dimensions.iter().find(|d| d.partition == name)
    }

    /// Fact first, then dimensions in schema order. This is the load order.
    pub fn iter(&self) -> impl Iterator<Item = &TableFrame> {
        std::iter::once(&self.fact).chain(self.dimensions.iter())
    }
}
