#[cfg(test)]
mod composition_tests {
    use crate::intrinsic::*;
    use crate::resources::*;
    use crate::{
        list_of, plain, single_line, titled, titled_one, Aggregate, Condition, IntoSection,
        KeyValueLine, ListItem, Output, Parameter, PlainText, Render, Section, Template,
        TitledBlock,
    };

    fn leaf(value: &str) -> Section {
        PlainText::new(value).into_section()
    }

    #[test]
    fn test_aggregate_matches_join_for_leaf_sequences() {
        let sequences: [&[&str]; 4] = [&["a"], &["a", "b"], &["x y", "", "z"], &["- item", "key: v"]];
        for separator in ["\n", "\n\n", ", "] {
            for sequence in sequences {
                let children = sequence.iter().map(|value| leaf(value)).collect();
                let aggregate = Aggregate::with_separator(children, separator);
                assert_eq!(aggregate.render(), sequence.join(separator));
            }
            assert_eq!(Aggregate::with_separator(vec![], separator).render(), "");
        }
    }

    #[test]
    fn test_titled_block_over_plain_text() {
        assert_eq!(TitledBlock::new("Foo", leaf("bar")).render(), "Foo:\n  bar");
    }

    #[test]
    fn test_list_item_over_key_value_lines() {
        let body = Aggregate::new(vec![
            KeyValueLine::new("A", "1").into_section(),
            KeyValueLine::new("B", "2").into_section(),
        ]);
        assert_eq!(ListItem::new(body.into_section()).render(), "- A: 1\n  B: 2");
    }

    #[test]
    fn test_two_titled_blocks_indent_body_by_four_spaces() {
        let body = "first line\n  nested already\nlast";
        let tree = titled_one("Outer", titled_one("Inner", plain(body)));
        let rendered = tree.render();
        let lines: Vec<&str> = rendered.split('\n').collect();

        assert_eq!(lines[0], "Outer:");
        assert_eq!(lines[1], "  Inner:");
        for (rendered_line, body_line) in lines[2..].iter().zip(body.split('\n')) {
            assert_eq!(rendered_line.strip_prefix("    "), Some(body_line));
        }
        assert_eq!(lines.len() - 2, body.split('\n').count());
    }

    #[test]
    fn test_resources_list_scenario() {
        let bucket = titled(
            "MyBucket",
            vec![
                single_line("Type", "AWS::Example::Bucket"),
                titled("Properties", vec![single_line("BucketName", "my-bucket")]),
            ],
        );
        let document = titled("Resources", vec![list_of([bucket])]);

        let expected = "\
Resources:
  - MyBucket:
      Type: AWS::Example::Bucket
      Properties:
        BucketName: my-bucket";
        assert_eq!(document.render(), expected);
    }

    #[test]
    fn test_full_template() {
        let bucket = S3Bucket::builder()
            .resource_id("Uploads")
            .bucket_name("uploads-bucket")
            .build()
            .unwrap();
        let topic = SnsTopic::builder()
            .resource_id("Notifications")
            .topic_name(conditional_value("IsProd", "prod-events", "dev-events"))
            .build()
            .unwrap();

        let template = Template::builder()
            .description("Upload pipeline")
            .parameter(Parameter::new("Stage", "String", "Deployment stage"))
            .condition(Condition::new("IsProd", resource_equals("Stage", "prod")))
            .resource(bucket)
            .resource(topic)
            .output(Output::new("UploadsBucket", "Bucket receiving uploads", referencing("Uploads")))
            .build()
            .unwrap();

        let expected = [
            "Description: Upload pipeline",
            "",
            "Parameters:",
            "  Stage:",
            "    Type: String",
            "    Description: Deployment stage",
            "",
            "Conditions:",
            "  IsProd:",
            "    !Equals [ !Ref Stage, prod ]",
            "",
            "Resources:",
            "  Uploads:",
            "    Type: AWS::S3::Bucket",
            "    Properties:",
            "      BucketName: uploads-bucket",
            "  Notifications:",
            "    Type: AWS::SNS::Topic",
            "    Properties:",
            "      TopicName: ",
            "        Fn::If:",
            "          - IsProd",
            "          - prod-events",
            "          - dev-events",
            "",
            "Outputs:",
            "  UploadsBucket:",
            "    Description: Bucket receiving uploads",
            "    Value: !Ref Uploads",
        ]
        .join("\n");
        assert_eq!(template.render(), expected);
    }

    #[test]
    fn test_template_render_is_idempotent() {
        let table = DynamoDbTable::builder()
            .resource_id("Audit")
            .table_name("audit-log")
            .partition_key(TableKey::hash(KeyAttribute::new("eventId", AttributeType::String)))
            .provisioned_throughput(Provision::new(2, 2))
            .build()
            .unwrap();
        let template = Template::builder().resource(table).build().unwrap();

        let first = template.render();
        let second = template.render();
        assert_eq!(first, second);
        assert!(first.starts_with("Resources:\n  Audit:\n    Type: AWS::DynamoDB::Table"));
    }
}
