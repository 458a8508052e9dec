use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::section::*;
use crate::stack::types::*;
use crate::template::Template;

/// Builds templates from stack definitions
///
/// Every resource goes through its builder, so a definition that loads is a
/// definition that renders.
pub struct StackLoader;

impl StackLoader {
    pub fn parse(json: &str) -> Result<Template> {
        let definition: StackDefinition = serde_json::from_str(json)?;
        Self::assemble(definition)
    }

    pub fn from_path(path: &Path) -> Result<Template> {
        let json = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = json.len(), "loaded stack definition");
        Self::parse(&json)
    }

    pub fn assemble(definition: StackDefinition) -> Result<Template> {
        let mut builder = Template::builder();

        if let Some(description) = definition.description {
            builder = builder.description(description);
        }
        for parameter in definition.parameters {
            builder = builder.parameter(parameter);
        }
        for condition in definition.conditions {
            builder = builder.condition(condition);
        }
        for resource in definition.resources {
            debug!(kind = resource.kind(), "building resource");
            builder = builder.resource_section(Self::build_resource(resource)?);
        }
        for output in definition.outputs {
            builder = builder.output(output);
        }

        builder.build()
    }

    fn build_resource(resource: ResourceDefinition) -> Result<Section> {
        let section = match resource {
            ResourceDefinition::S3Bucket(bucket) => bucket.build()?.into_section(),
            ResourceDefinition::LambdaFunction(function) => function.build()?.into_section(),
            ResourceDefinition::SnsTopic(topic) => topic.build()?.into_section(),
            ResourceDefinition::IamRole(role) => role.build()?.into_section(),
            ResourceDefinition::DynamoDbTable(table) => table.build()?.into_section(),
            ResourceDefinition::CloudFrontDistribution(distribution) => {
                distribution.build()?.into_section()
            }
            ResourceDefinition::CognitoUserPool(pool) => pool.build()?.into_section(),
            ResourceDefinition::CognitoUserPoolClient(client) => client.build()?.into_section(),
            ResourceDefinition::CognitoIdentityPool(pool) => pool.build()?.into_section(),
            ResourceDefinition::IdentityPoolRoleAttachment(attachment) => {
                attachment.build()?.into_section()
            }
            ResourceDefinition::ApiGatewayRestApi(api) => api.build()?.into_section(),
            ResourceDefinition::ApiGatewayResource(resource) => resource.build()?.into_section(),
            ResourceDefinition::ApiGatewayMethod(method) => method.build()?.into_section(),
            ResourceDefinition::ApiGatewayAuthorizer(authorizer) => {
                authorizer.build()?.into_section()
            }
            ResourceDefinition::ApiGatewayDeployment(deployment) => {
                deployment.build()?.into_section()
            }
            ResourceDefinition::ApiGatewayStage(stage) => stage.build()?.into_section(),
        };
        Ok(section)
    }
}
