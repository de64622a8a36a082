//! Tests for star-schema decomposition.

mod common;

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use churn_ingest::column_names;
use churn_load::decompose;
use churn_model::{PartitionKind, PartitionSpec, PipelineError, StarSchema};

use common::transformed_frame;

#[test]
fn every_input_column_lands_in_a_partition() {
    let df = transformed_frame(3);
    let partitions = decompose(&df, &StarSchema::default()).unwrap();

    let mut covered = BTreeSet::new();
    for table in partitions.iter() {
        covered.extend(table.column_names());
    }
    let input: BTreeSet<String> = column_names(&df).into_iter().collect();
    assert_eq!(covered, input);
    assert!(partitions.unassigned.is_empty());
}

#[test]
fn partitions_keep_all_rows_and_the_key() {
    let df = transformed_frame(5);
    let partitions = decompose(&df, &StarSchema::default()).unwrap();

    assert_eq!(partitions.iter().count(), 4);
    for table in partitions.iter() {
        assert_eq!(table.record_count(), 5, "{}", table.partition);
        assert_eq!(table.column_names()[0], "customerid");
    }
    assert_eq!(partitions.fact.kind, PartitionKind::Fact);
    assert_eq!(
        partitions.fact.column_names(),
        vec!["customerid", "tenure", "monthlycharges", "totalcharges", "churn"]
    );
}

#[test]
fn key_values_match_across_partitions() {
    let df = transformed_frame(4);
    let partitions = decompose(&df, &StarSchema::default()).unwrap();
    let fact_keys = partitions.fact.data.column("customerid").unwrap().clone();
    for table in &partitions.dimensions {
        let keys = table.data.column("customerid").unwrap();
        assert!(keys.as_materialized_series().equals(fact_keys.as_materialized_series()));
    }
}

#[test]
fn missing_column_names_partition_and_column() {
    let df = transformed_frame(2).drop("contract").unwrap();
    match decompose(&df, &StarSchema::default()).unwrap_err() {
        PipelineError::MissingColumn { partition, column } => {
            assert_eq!(partition, "dim_subscription");
            assert_eq!(column, "contract");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unassigned_columns_are_reported_not_loaded() {
    let mut df = transformed_frame(2);
    df.with_column(Series::new("region".into(), vec!["north", "south"]))
        .unwrap();
    let partitions = decompose(&df, &StarSchema::default()).unwrap();
    assert_eq!(partitions.unassigned, vec!["region"]);
    for table in partitions.iter() {
        assert!(!table.column_names().contains(&"region".to_string()));
    }
}

#[test]
fn extra_dimension_claims_its_columns() {
    let mut df = transformed_frame(2);
    df.with_column(Series::new("region".into(), vec!["north", "south"]))
        .unwrap();
    let schema = StarSchema::default()
        .with_partition(PartitionSpec::new(
            "dim_region",
            "dim_region_table",
            PartitionKind::Dimension,
            &["region"],
        ))
        .unwrap();

    let partitions = decompose(&df, &schema).unwrap();
    assert!(partitions.unassigned.is_empty());
    let region = partitions.dimension("dim_region").unwrap();
    assert_eq!(region.relation, "dim_region_table");
    assert_eq!(region.column_names(), vec!["customerid", "region"]);
}

#[test]
fn empty_row_set_yields_empty_partitions() {
    let df = transformed_frame(0);
    let partitions = decompose(&df, &StarSchema::default()).unwrap();
    for table in partitions.iter() {
        assert_eq!(table.record_count(), 0);
    }
}

#[test]
fn key_only_frame_fails_on_first_partition() {
    let df = DataFrame::new(vec![
        Series::new("customerid".into(), vec!["0001"]).into_column(),
    ])
    .unwrap();
    let err = decompose(&df, &StarSchema::default()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::MissingColumn { ref partition, ref column }
            if partition == "fact" && column == "tenure"
    ));
}
