//! Tests for the star-schema membership table.

use churn_model::{PartitionKind, PartitionSpec, SchemaError, StarSchema};

#[test]
fn default_schema_assigns_each_column_once() {
    let schema = StarSchema::default();
    let mut total = 0usize;
    for spec in schema.partitions() {
        total += spec.attribute_columns(schema.key()).count();
    }
    // key counted once by assigned_columns
    assert_eq!(schema.assigned_columns().len(), total + 1);
    assert!(schema.assigned_columns().contains("totalcharges"));
    assert!(schema.assigned_columns().contains("paymentmethod"));
}

#[test]
fn default_relations_match_target_tables() {
    let schema = StarSchema::default();
    let relations: Vec<&str> = schema
        .partitions()
        .map(|p| p.relation.as_str())
        .collect();
    assert_eq!(
        relations,
        vec![
            "fact_table",
            "dim_customer_table",
            "dim_services_table",
            "dim_subscription_table"
        ]
    );
}

#[test]
fn overlapping_column_is_rejected() {
    let spec = PartitionSpec::new(
        "dim_billing",
        "dim_billing_table",
        PartitionKind::Dimension,
        &["customerid", "paymentmethod"],
    );
    let err = StarSchema::default().with_partition(spec).unwrap_err();
    assert_eq!(
        err,
        SchemaError::OverlappingColumn {
            column: "paymentmethod".to_string(),
            first: "dim_subscription".to_string(),
            second: "dim_billing".to_string(),
        }
    );
}

#[test]
fn second_fact_is_rejected() {
    let spec = PartitionSpec::new("fact_two", "fact_two_table", PartitionKind::Fact, &["x"]);
    let err = StarSchema::default().with_partition(spec).unwrap_err();
    assert_eq!(err, SchemaError::FactCount(2));
}

#[test]
fn duplicate_relation_is_rejected() {
    let spec = PartitionSpec::new(
        "dim_other",
        "fact_table",
        PartitionKind::Dimension,
        &["region"],
    );
    let err = StarSchema::default().with_partition(spec).unwrap_err();
    assert_eq!(err, SchemaError::DuplicateRelation("fact_table".to_string()));
}

#[test]
fn key_only_partition_is_rejected() {
    let spec = PartitionSpec::new(
        "dim_empty",
        "dim_empty_table",
        PartitionKind::Dimension,
        &["customerid"],
    );
    let err = StarSchema::default().with_partition(spec).unwrap_err();
    assert_eq!(err, SchemaError::EmptyPartition("dim_empty".to_string()));
}

#[test]
fn partition_spec_deserializes_with_dimension_default() {
    let spec: PartitionSpec = toml::from_str(
        r#"
        name = "dim_region"
        relation = "dim_region_table"
        columns = ["customerid", "region"]
        "#,
    )
    .expect("parse partition");
    assert_eq!(spec.kind, PartitionKind::Dimension);
    assert_eq!(spec.columns, vec!["customerid", "region"]);
}

#[test]
fn custom_schema_needs_exactly_one_fact() {
    let dims = vec![PartitionSpec::new(
        "dim_a",
        "dim_a_table",
        PartitionKind::Dimension,
        &["a"],
    )];
    assert_eq!(
        StarSchema::new("id", dims).unwrap_err(),
        SchemaError::FactCount(0)
    );

    let schema = StarSchema::new(
        "id",
        vec![
            PartitionSpec::new("dim_a", "dim_a_table", PartitionKind::Dimension, &["a"]),
            PartitionSpec::new("facts", "facts_table", PartitionKind::Fact, &["amount"]),
        ],
    )
    .unwrap();
    assert_eq!(schema.fact().name, "facts");
    assert_eq!(schema.fact().columns, vec!["id", "amount"]);
    assert_eq!(schema.partitions().count(), 2);
}
