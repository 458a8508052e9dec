use serde::Deserialize;

use crate::resources::*;
use crate::template::{Condition, Output, Parameter};

/// Root of a JSON stack definition
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StackDefinition {
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub conditions: Vec<Condition>,
    pub resources: Vec<ResourceDefinition>,
    pub outputs: Vec<Output>,
}

/// One resource entry, selected by its `kind` field
#[derive(Debug, Deserialize)]
#[serde(tag = "kind")]
pub enum ResourceDefinition {
    S3Bucket(S3BucketBuilder),
    LambdaFunction(LambdaFunctionBuilder),
    SnsTopic(SnsTopicBuilder),
    IamRole(IamRoleBuilder),
    DynamoDbTable(DynamoDbTableBuilder),
    CloudFrontDistribution(CloudFrontDistributionBuilder),
    CognitoUserPool(CognitoUserPoolBuilder),
    CognitoUserPoolClient(CognitoUserPoolClientBuilder),
    CognitoIdentityPool(CognitoIdentityPoolBuilder),
    IdentityPoolRoleAttachment(IdentityPoolRoleAttachmentBuilder),
    ApiGatewayRestApi(ApiGatewayRestApiBuilder),
    ApiGatewayResource(ApiGatewayResourceBuilder),
    ApiGatewayMethod(ApiGatewayMethodBuilder),
    ApiGatewayAuthorizer(ApiGatewayAuthorizerBuilder),
    ApiGatewayDeployment(ApiGatewayDeploymentBuilder),
    ApiGatewayStage(ApiGatewayStageBuilder),
}

impl ResourceDefinition {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceDefinition::S3Bucket(_) => "S3Bucket",
            ResourceDefinition::LambdaFunction(_) => "LambdaFunction",
            ResourceDefinition::SnsTopic(_) => "SnsTopic",
            ResourceDefinition::IamRole(_) => "IamRole",
            ResourceDefinition::DynamoDbTable(_) => "DynamoDbTable",
            ResourceDefinition::CloudFrontDistribution(_) => "CloudFrontDistribution",
            ResourceDefinition::CognitoUserPool(_) => "CognitoUserPool",
            ResourceDefinition::CognitoUserPoolClient(_) => "CognitoUserPoolClient",
            ResourceDefinition::CognitoIdentityPool(_) => "CognitoIdentityPool",
            ResourceDefinition::IdentityPoolRoleAttachment(_) => "IdentityPoolRoleAttachment",
            ResourceDefinition::ApiGatewayRestApi(_) => "ApiGatewayRestApi",
            ResourceDefinition::ApiGatewayResource(_) => "ApiGatewayResource",
            ResourceDefinition::ApiGatewayMethod(_) => "ApiGatewayMethod",
            ResourceDefinition::ApiGatewayAuthorizer(_) => "ApiGatewayAuthorizer",
            ResourceDefinition::ApiGatewayDeployment(_) => "ApiGatewayDeployment",
            ResourceDefinition::ApiGatewayStage(_) => "ApiGatewayStage",
        }
    }
}
