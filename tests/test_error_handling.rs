use std::path::Path;

use cftemplate::resources::*;
use cftemplate::stack::StackLoader;
use cftemplate::{Error, Template};

#[test]
fn test_errors_name_the_violated_field() {
    let err = LambdaFunction::builder()
        .resource_id("Fn")
        .handler("index.handler")
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "LambdaFunction: required field `s3_bucket` is not set"
    );
}

#[test]
fn test_constraint_checked_before_anything_renders() {
    let err = SnsTopic::builder()
        .resource_id("Alerts")
        .topic_name("alerts")
        .display_name("Operational alerts")
        .build()
        .unwrap_err();
    match err {
        Error::Constraint { entry, message } => {
            assert_eq!(entry, "SnsTopic");
            assert_eq!(message, "display_name must be at most 10 characters, got 18");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_cors_rule_error_propagates_through_bucket() {
    let err = S3Bucket::builder()
        .resource_id("Site")
        .bucket_name("site")
        .cors_rule(CorsRule::builder().allowed_origin("*"))
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        Error::MissingField {
            entry: "CorsRule",
            field: "allowed_methods"
        }
    ));
}

#[test]
fn test_duplicate_index_names_rejected() {
    let index = GlobalSecondaryIndex {
        name: "ByOwner".to_string(),
        key: TableKey::hash(KeyAttribute::new("owner", AttributeType::String)),
        projection_type: ProjectionType::All,
        provisioned_throughput: Provision::new(1, 1),
    };
    let err = DynamoDbTable::builder()
        .resource_id("Items")
        .table_name("items")
        .partition_key(TableKey::hash(KeyAttribute::new("id", AttributeType::String)))
        .provisioned_throughput(Provision::new(1, 1))
        .global_secondary_index(index.clone())
        .global_secondary_index(index)
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("duplicate global secondary index `ByOwner`"));
}

#[test]
fn test_empty_template_rejected() {
    assert!(Template::builder().build().is_err());
}

#[test]
fn test_malformed_json_is_a_definition_error() {
    let err = StackLoader::parse("{ \"resources\": [").err().unwrap();
    assert!(matches!(err, Error::Definition(_)));
}

#[test]
fn test_unreadable_definition_reports_path() {
    let err = StackLoader::from_path(Path::new("does/not/exist.json"))
        .err()
        .unwrap();
    assert!(matches!(err, Error::Read { .. }));
    assert_eq!(err.to_string(), "unable to read does/not/exist.json");
}
