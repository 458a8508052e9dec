use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::resources::{Resource, ResourceType};
use crate::section::*;

/// Scalar types usable in attribute definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "S")]
    String,
    #[serde(rename = "N")]
    Number,
    #[serde(rename = "B")]
    Binary,
    #[serde(rename = "BOOL")]
    Boolean,
    #[serde(rename = "SS")]
    StringSet,
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeType::String => "S",
            AttributeType::Number => "N",
            AttributeType::Binary => "B",
            AttributeType::Boolean => "BOOL",
            AttributeType::StringSet => "SS",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectionType {
    KeysOnly,
    Include,
    All,
}

impl fmt::Display for ProjectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectionType::KeysOnly => "KEYS_ONLY",
            ProjectionType::Include => "INCLUDE",
            ProjectionType::All => "ALL",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreamViewType {
    KeysOnly,
    NewImage,
    OldImage,
    NewAndOldImages,
}

impl fmt::Display for StreamViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StreamViewType::KeysOnly => "KEYS_ONLY",
            StreamViewType::NewImage => "NEW_IMAGE",
            StreamViewType::OldImage => "OLD_IMAGE",
            StreamViewType::NewAndOldImages => "NEW_AND_OLD_IMAGES",
        };
        f.write_str(name)
    }
}

/// A named, typed attribute used in a key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl KeyAttribute {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }
}

impl Delegating for KeyAttribute {
    fn delegate(&self) -> Section {
        aggregating(vec![
            single_line("AttributeName", &self.name),
            single_line("AttributeType", self.attribute_type),
        ])
    }
}

/// Hash key plus optional range key; renders as a key schema list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableKey {
    pub hash_key: KeyAttribute,
    #[serde(default)]
    pub range_key: Option<KeyAttribute>,
}

impl TableKey {
    pub fn hash(hash_key: KeyAttribute) -> Self {
        Self {
            hash_key,
            range_key: None,
        }
    }

    pub fn composite(hash_key: KeyAttribute, range_key: KeyAttribute) -> Self {
        Self {
            hash_key,
            range_key: Some(range_key),
        }
    }

    fn attributes(&self) -> impl Iterator<Item = &KeyAttribute> {
        std::iter::once(&self.hash_key).chain(self.range_key.as_ref())
    }
}

fn key_schema_entry(attribute: &KeyAttribute, key_type: &str) -> Section {
    list_item(vec![
        single_line("AttributeName", &attribute.name),
        single_line("KeyType", key_type),
    ])
}

impl Delegating for TableKey {
    fn delegate(&self) -> Section {
        aggregating_present([
            Some(key_schema_entry(&self.hash_key, "HASH")),
            self.range_key
                .as_ref()
                .map(|range| key_schema_entry(range, "RANGE")),
        ])
    }
}

/// Read and write capacity units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Provision {
    pub read_capacity: u32,
    pub write_capacity: u32,
}

impl Provision {
    pub fn new(read_capacity: u32, write_capacity: u32) -> Self {
        Self {
            read_capacity,
            write_capacity,
        }
    }

    fn validate(&self, entry: &'static str) -> Result<()> {
        if self.read_capacity == 0 || self.write_capacity == 0 {
            return Err(Error::constraint(
                entry,
                "provisioned read and write capacity must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Delegating for Provision {
    fn delegate(&self) -> Section {
        titled(
            "ProvisionedThroughput",
            vec![
                single_line("ReadCapacityUnits", self.read_capacity),
                single_line("WriteCapacityUnits", self.write_capacity),
            ],
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalSecondaryIndex {
    pub name: String,
    pub key: TableKey,
    pub projection_type: ProjectionType,
    pub provisioned_throughput: Provision,
}

impl Delegating for GlobalSecondaryIndex {
    fn delegate(&self) -> Section {
        aggregating(vec![
            single_line("IndexName", &self.name),
            titled_one("KeySchema", self.key.clone().into_section()),
            titled("Projection", vec![single_line("ProjectionType", self.projection_type)]),
            self.provisioned_throughput.into_section(),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbTable {
    resource_id: String,
    table_name: String,
    partition_key: TableKey,
    provisioned_throughput: Provision,
    global_secondary_indexes: Vec<GlobalSecondaryIndex>,
    stream_view_type: Option<StreamViewType>,
}

impl DynamoDbTable {
    pub fn builder() -> DynamoDbTableBuilder {
        DynamoDbTableBuilder::default()
    }

    /// Attributes of the partition key and every index key, one per name.
    ///
    /// `build` has already rejected names declared with two types.
    fn attribute_definitions(&self) -> Vec<Section> {
        let mut seen = HashSet::new();
        self.partition_key
            .attributes()
            .chain(
                self.global_secondary_indexes
                    .iter()
                    .flat_map(|index| index.key.attributes()),
            )
            .filter(|attribute| seen.insert(attribute.name.as_str()))
            .map(|attribute| attribute.clone().into_section())
            .collect()
    }
}

impl Resource for DynamoDbTable {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::DynamoDbTable
    }

    fn properties(&self) -> Section {
        let indexes = (!self.global_secondary_indexes.is_empty()).then(|| {
            titled(
                "GlobalSecondaryIndexes",
                vec![list_of(
                    self.global_secondary_indexes
                        .iter()
                        .cloned()
                        .map(IntoSection::into_section),
                )],
            )
        });

        aggregating_present([
            Some(single_line("TableName", &self.table_name)),
            Some(self.provisioned_throughput.into_section()),
            self.stream_view_type.map(|view| {
                titled("StreamSpecification", vec![single_line("StreamViewType", view)])
            }),
            Some(titled("AttributeDefinitions", vec![list_of(self.attribute_definitions())])),
            Some(titled_one("KeySchema", self.partition_key.clone().into_section())),
            indexes,
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DynamoDbTableBuilder {
    resource_id: Option<String>,
    table_name: Option<String>,
    partition_key: Option<TableKey>,
    provisioned_throughput: Option<Provision>,
    global_secondary_indexes: Vec<GlobalSecondaryIndex>,
    stream_view_type: Option<StreamViewType>,
}

impl DynamoDbTableBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    pub fn partition_key(mut self, key: TableKey) -> Self {
        self.partition_key = Some(key);
        self
    }

    pub fn provisioned_throughput(mut self, provision: Provision) -> Self {
        self.provisioned_throughput = Some(provision);
        self
    }

    pub fn global_secondary_index(mut self, index: GlobalSecondaryIndex) -> Self {
        self.global_secondary_indexes.push(index);
        self
    }

    /// Enables the table stream; without it no `StreamSpecification` is emitted.
    pub fn stream_view_type(mut self, view: StreamViewType) -> Self {
        self.stream_view_type = Some(view);
        self
    }

    pub fn build(self) -> Result<DynamoDbTable> {
        const ENTRY: &str = "DynamoDbTable";

        let provisioned_throughput =
            required(self.provisioned_throughput, ENTRY, "provisioned_throughput")?;
        provisioned_throughput.validate(ENTRY)?;

        let mut index_names = HashSet::new();
        for index in &self.global_secondary_indexes {
            index.provisioned_throughput.validate(ENTRY)?;
            if !index_names.insert(index.name.as_str()) {
                return Err(Error::constraint(
                    ENTRY,
                    format!("duplicate global secondary index `{}`", index.name),
                ));
            }
        }

        let partition_key = required(self.partition_key, ENTRY, "partition_key")?;
        let mut attribute_types = HashMap::new();
        let key_attributes = partition_key.attributes().chain(
            self.global_secondary_indexes
                .iter()
                .flat_map(|index| index.key.attributes()),
        );
        for attribute in key_attributes {
            let declared = *attribute_types
                .entry(attribute.name.as_str())
                .or_insert(attribute.attribute_type);
            if declared != attribute.attribute_type {
                return Err(Error::constraint(
                    ENTRY,
                    format!(
                        "attribute `{}` declared as both {} and {}",
                        attribute.name, declared, attribute.attribute_type
                    ),
                ));
            }
        }

        Ok(DynamoDbTable {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            table_name: required(self.table_name, ENTRY, "table_name")?,
            partition_key,
            provisioned_throughput,
            global_secondary_indexes: self.global_secondary_indexes,
            stream_view_type: self.stream_view_type,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders_table() -> DynamoDbTableBuilder {
        DynamoDbTable::builder()
            .resource_id("Orders")
            .table_name("orders")
            .partition_key(TableKey::composite(
                KeyAttribute::new("customerId", AttributeType::String),
                KeyAttribute::new("orderId", AttributeType::String),
            ))
            .provisioned_throughput(Provision::new(5, 5))
    }

    #[test]
    fn test_table_with_composite_key() {
        let table = orders_table()
            .stream_view_type(StreamViewType::NewAndOldImages)
            .build()
            .unwrap();

        let expected = "\
Orders:
  Type: AWS::DynamoDB::Table
  Properties:
    TableName: orders
    ProvisionedThroughput:
      ReadCapacityUnits: 5
      WriteCapacityUnits: 5
    StreamSpecification:
      StreamViewType: NEW_AND_OLD_IMAGES
    AttributeDefinitions:
      - AttributeName: customerId
        AttributeType: S
      - AttributeName: orderId
        AttributeType: S
    KeySchema:
      - AttributeName: customerId
        KeyType: HASH
      - AttributeName: orderId
        KeyType: RANGE";
        assert_eq!(table.render(), expected);
    }

    #[test]
    fn test_index_attributes_are_deduplicated() {
        let table = orders_table()
            .global_secondary_index(GlobalSecondaryIndex {
                name: "ByStatus".to_string(),
                key: TableKey::composite(
                    KeyAttribute::new("status", AttributeType::String),
                    KeyAttribute::new("orderId", AttributeType::String),
                ),
                projection_type: ProjectionType::KeysOnly,
                provisioned_throughput: Provision::new(1, 1),
            })
            .build()
            .unwrap();

        let rendered = table.render();
        assert_eq!(rendered.matches("- AttributeName: orderId\n        AttributeType: S").count(), 1);
        assert!(rendered.contains("- AttributeName: status\n        AttributeType: S"));
        assert!(!rendered.contains("StreamSpecification"));
        assert!(rendered.ends_with(
            "    GlobalSecondaryIndexes:
      - IndexName: ByStatus
        KeySchema:
          - AttributeName: status
            KeyType: HASH
          - AttributeName: orderId
            KeyType: RANGE
        Projection:
          ProjectionType: KEYS_ONLY
        ProvisionedThroughput:
          ReadCapacityUnits: 1
          WriteCapacityUnits: 1"
        ));
    }

    #[test]
    fn test_conflicting_attribute_types_rejected() {
        let err = DynamoDbTable::builder()
            .resource_id("Items")
            .table_name("items")
            .partition_key(TableKey::hash(KeyAttribute::new("id", AttributeType::String)))
            .provisioned_throughput(Provision::new(1, 1))
            .global_secondary_index(GlobalSecondaryIndex {
                name: "ById".to_string(),
                key: TableKey::hash(KeyAttribute::new("id", AttributeType::Number)),
                projection_type: ProjectionType::All,
                provisioned_throughput: Provision::new(1, 1),
            })
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "DynamoDbTable: attribute `id` declared as both S and N"
        );
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = orders_table()
            .provisioned_throughput(Provision::new(0, 5))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Constraint { entry: "DynamoDbTable", .. }));
    }

    #[test]
    fn test_missing_partition_key() {
        let err = DynamoDbTable::builder()
            .resource_id("Orders")
            .table_name("orders")
            .provisioned_throughput(Provision::new(1, 1))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "DynamoDbTable: required field `partition_key` is not set"
        );
    }
}
