use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::resources::{string_list, HttpMethod, Resource, ResourceType};
use crate::section::*;

/// S3 bucket; only the resource id and bucket name are required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3Bucket {
    resource_id: String,
    bucket_name: String,
    access_control: Option<String>,
    index_document: Option<String>,
    cors_rules: Vec<CorsRule>,
}

impl S3Bucket {
    pub fn builder() -> S3BucketBuilder {
        S3BucketBuilder::default()
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

impl Resource for S3Bucket {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::S3Bucket
    }

    fn properties(&self) -> Section {
        let cors = (!self.cors_rules.is_empty()).then(|| {
            titled(
                "CorsConfiguration",
                vec![titled(
                    "CorsRules",
                    vec![list_of(self.cors_rules.iter().cloned().map(IntoSection::into_section))],
                )],
            )
        });

        aggregating_present([
            Some(single_line("BucketName", &self.bucket_name)),
            self.access_control
                .as_ref()
                .map(|acl| single_line("AccessControl", acl)),
            self.index_document.as_ref().map(|index| {
                titled("WebsiteConfiguration", vec![single_line("IndexDocument", index)])
            }),
            cors,
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct S3BucketBuilder {
    resource_id: Option<String>,
    bucket_name: Option<String>,
    access_control: Option<String>,
    index_document: Option<String>,
    cors_rules: Vec<CorsRuleBuilder>,
}

impl S3BucketBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn bucket_name(mut self, bucket_name: impl Into<String>) -> Self {
        self.bucket_name = Some(bucket_name.into());
        self
    }

    pub fn access_control(mut self, access_control: impl Into<String>) -> Self {
        self.access_control = Some(access_control.into());
        self
    }

    pub fn index_document(mut self, index_document: impl Into<String>) -> Self {
        self.index_document = Some(index_document.into());
        self
    }

    pub fn cors_rule(mut self, rule: CorsRuleBuilder) -> Self {
        self.cors_rules.push(rule);
        self
    }

    pub fn build(self) -> Result<S3Bucket> {
        let cors_rules = self
            .cors_rules
            .into_iter()
            .map(CorsRuleBuilder::build)
            .collect::<Result<Vec<_>>>()?;

        Ok(S3Bucket {
            resource_id: required(self.resource_id, "S3Bucket", "resource_id")?,
            bucket_name: required(self.bucket_name, "S3Bucket", "bucket_name")?,
            access_control: self.access_control,
            index_document: self.index_document,
            cors_rules,
        })
    }
}

/// One CORS rule of a bucket; allowed methods and origins are required
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsRule {
    id: Option<String>,
    max_age: Option<u32>,
    allowed_headers: Vec<String>,
    allowed_methods: Vec<HttpMethod>,
    allowed_origins: Vec<String>,
    exposed_headers: Vec<String>,
}

impl CorsRule {
    pub fn builder() -> CorsRuleBuilder {
        CorsRuleBuilder::default()
    }
}

impl Delegating for CorsRule {
    fn delegate(&self) -> Section {
        let methods: Vec<String> = self.allowed_methods.iter().map(ToString::to_string).collect();

        aggregating_present([
            self.id.as_ref().map(|id| single_line("Id", id)),
            self.max_age.map(|age| single_line("MaxAge", age)),
            string_list("AllowedHeaders", &self.allowed_headers),
            string_list("AllowedMethods", &methods),
            string_list("AllowedOrigins", &self.allowed_origins),
            string_list("ExposedHeaders", &self.exposed_headers),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsRuleBuilder {
    id: Option<String>,
    max_age: Option<u32>,
    allowed_headers: Vec<String>,
    allowed_methods: Vec<HttpMethod>,
    allowed_origins: Vec<String>,
    exposed_headers: Vec<String>,
}

impl CorsRuleBuilder {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn allowed_header(mut self, header: impl Into<String>) -> Self {
        self.allowed_headers.push(header.into());
        self
    }

    pub fn allowed_method(mut self, method: HttpMethod) -> Self {
        self.allowed_methods.push(method);
        self
    }

    pub fn allowed_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origins.push(origin.into());
        self
    }

    pub fn exposed_header(mut self, header: impl Into<String>) -> Self {
        self.exposed_headers.push(header.into());
        self
    }

    pub fn build(self) -> Result<CorsRule> {
        if self.allowed_methods.is_empty() {
            return Err(Error::missing("CorsRule", "allowed_methods"));
        }
        if self.allowed_origins.is_empty() {
            return Err(Error::missing("CorsRule", "allowed_origins"));
        }

        Ok(CorsRule {
            id: self.id,
            max_age: self.max_age,
            allowed_headers: self.allowed_headers,
            allowed_methods: self.allowed_methods,
            allowed_origins: self.allowed_origins,
            exposed_headers: self.exposed_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_bucket() {
        let bucket = S3Bucket::builder()
            .resource_id("MyBucket")
            .bucket_name("my-bucket")
            .build()
            .unwrap();

        assert_eq!(bucket.bucket_name(), "my-bucket");
        assert_eq!(
            bucket.render(),
            "MyBucket:\n  Type: AWS::S3::Bucket\n  Properties:\n    BucketName: my-bucket"
        );
    }

    #[test]
    fn test_website_bucket_with_cors() {
        let bucket = S3Bucket::builder()
            .resource_id("Site")
            .bucket_name("site-bucket")
            .access_control("PublicRead")
            .index_document("index.html")
            .cors_rule(
                CorsRule::builder()
                    .max_age(3600)
                    .allowed_method(HttpMethod::Get)
                    .allowed_method(HttpMethod::Head)
                    .allowed_origin("*"),
            )
            .build()
            .unwrap();

        let expected = "\
Site:
  Type: AWS::S3::Bucket
  Properties:
    BucketName: site-bucket
    AccessControl: PublicRead
    WebsiteConfiguration:
      IndexDocument: index.html
    CorsConfiguration:
      CorsRules:
        - MaxAge: 3600
          AllowedMethods:
            - GET
            - HEAD
          AllowedOrigins:
            - *";
        assert_eq!(bucket.render(), expected);
    }

    #[test]
    fn test_missing_bucket_name() {
        let err = S3Bucket::builder().resource_id("MyBucket").build().unwrap_err();
        assert_eq!(err.to_string(), "S3Bucket: required field `bucket_name` is not set");
    }

    #[test]
    fn test_cors_rule_requires_origins() {
        let err = CorsRule::builder()
            .allowed_method(HttpMethod::Get)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::MissingField {
                entry: "CorsRule",
                field: "allowed_origins"
            }
        ));
    }
}
