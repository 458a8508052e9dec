//! Resource catalog.
//!
//! Every entry is plain data exposed through the [`Resource`] trait; the
//! shared `Id:` / `Type:` / `Properties:` shape comes from
//! [`resource_section`].

use std::fmt;

use serde::Deserialize;

use crate::section::*;

pub mod apigateway;
pub mod cloudfront;
pub mod cognito;
pub mod dynamodb;
pub mod iam;
pub mod lambda;
pub mod s3;
pub mod sns;

pub use apigateway::*;
pub use cloudfront::*;
pub use cognito::*;
pub use dynamodb::*;
pub use iam::*;
pub use lambda::*;
pub use s3::*;
pub use sns::*;

/// Resource types the catalog knows how to emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    S3Bucket,
    CloudFrontDistribution,
    LambdaFunction,
    DynamoDbTable,
    UserPool,
    UserPoolClient,
    IdentityPool,
    IdentityPoolRoleAttachment,
    SnsTopic,
    ApiGatewayRestApi,
    ApiGatewayAuthorizer,
    ApiGatewayResource,
    ApiGatewayMethod,
    ApiGatewayDeployment,
    ApiGatewayStage,
    IamRole,
}

impl ResourceType {
    /// The type name as it appears in a template.
    pub fn wire_name(&self) -> &'static str {
        match self {
            ResourceType::S3Bucket => "AWS::S3::Bucket",
            ResourceType::CloudFrontDistribution => "AWS::CloudFront::Distribution",
            ResourceType::LambdaFunction => "AWS::Lambda::Function",
            ResourceType::DynamoDbTable => "AWS::DynamoDB::Table",
            ResourceType::UserPool => "AWS::Cognito::UserPool",
            ResourceType::UserPoolClient => "AWS::Cognito::UserPoolClient",
            ResourceType::IdentityPool => "AWS::Cognito::IdentityPool",
            ResourceType::IdentityPoolRoleAttachment => "AWS::Cognito::IdentityPoolRoleAttachment",
            ResourceType::SnsTopic => "AWS::SNS::Topic",
            ResourceType::ApiGatewayRestApi => "AWS::ApiGateway::RestApi",
            ResourceType::ApiGatewayAuthorizer => "AWS::ApiGateway::Authorizer",
            ResourceType::ApiGatewayResource => "AWS::ApiGateway::Resource",
            ResourceType::ApiGatewayMethod => "AWS::ApiGateway::Method",
            ResourceType::ApiGatewayDeployment => "AWS::ApiGateway::Deployment",
            ResourceType::ApiGatewayStage => "AWS::ApiGateway::Stage",
            ResourceType::IamRole => "AWS::IAM::Role",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// HTTP methods accepted by CORS rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Head,
    Patch,
    Options,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
        };
        f.write_str(name)
    }
}

/// A named template resource with a type and a property set
pub trait Resource: Send + Sync {
    fn resource_id(&self) -> &str;

    fn resource_type(&self) -> ResourceType;

    fn properties(&self) -> Section;
}

/// The canonical resource mapping: `Id:` holding `Type:` and `Properties:`.
pub fn resource_section<R: Resource + ?Sized>(resource: &R) -> Section {
    titled(
        resource.resource_id(),
        vec![
            single_line("Type", resource.resource_type()),
            titled_one("Properties", resource.properties()),
        ],
    )
}

impl<R: Resource> Delegating for R {
    fn delegate(&self) -> Section {
        resource_section(self)
    }
}

/// `Title:` over a list of plain strings, skipped when the list is empty.
pub(crate) fn string_list(title: &str, values: &[String]) -> Option<Section> {
    (!values.is_empty()).then(|| titled(title, vec![list_of(plain_strings(values.iter().cloned()))]))
}
