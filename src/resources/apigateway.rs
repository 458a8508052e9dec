//! API Gateway REST API entries: the API itself, its resources and methods,
//! authorizers, deployments and stages.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::intrinsic::join_expression;
use crate::resources::{string_list, HttpMethod, Resource, ResourceType};
use crate::section::*;

const ACCESS_CONTROL_HEADER_PREFIX: &str = "method.response.header.Access-Control-Allow-";

const CORS_ALLOWED_HEADERS: &str =
    "\"'Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token'\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizerType {
    CognitoUserPools,
    Token,
    Request,
}

impl fmt::Display for AuthorizerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthorizerType::CognitoUserPools => "COGNITO_USER_POOLS",
            AuthorizerType::Token => "TOKEN",
            AuthorizerType::Request => "REQUEST",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationType {
    None,
    AwsIam,
    Custom,
    CognitoUserPools,
}

impl AuthorizationType {
    fn needs_authorizer(&self) -> bool {
        matches!(self, AuthorizationType::Custom | AuthorizationType::CognitoUserPools)
    }
}

impl fmt::Display for AuthorizationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuthorizationType::None => "NONE",
            AuthorizationType::AwsIam => "AWS_IAM",
            AuthorizationType::Custom => "CUSTOM",
            AuthorizationType::CognitoUserPools => "COGNITO_USER_POOLS",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationType {
    Aws,
    AwsProxy,
    Mock,
}

impl fmt::Display for IntegrationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegrationType::Aws => "AWS",
            IntegrationType::AwsProxy => "AWS_PROXY",
            IntegrationType::Mock => "MOCK",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PassthroughBehavior {
    WhenNoMatch,
    WhenNoTemplates,
    Never,
}

impl fmt::Display for PassthroughBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PassthroughBehavior::WhenNoMatch => "WHEN_NO_MATCH",
            PassthroughBehavior::WhenNoTemplates => "WHEN_NO_TEMPLATES",
            PassthroughBehavior::Never => "NEVER",
        };
        f.write_str(name)
    }
}

/// The `Access-Control-Allow-*` headers of a method or integration response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiResponseParameters {
    pub allow_headers: String,
    pub allow_methods: String,
    pub allow_origins: String,
}

impl ApiResponseParameters {
    /// Integration-side CORS values: the usual request headers, the given
    /// methods and any origin.
    pub fn for_allowed_methods(methods: &[HttpMethod]) -> Self {
        let methods = methods
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Self {
            allow_headers: CORS_ALLOWED_HEADERS.to_string(),
            allow_methods: format!("\"'{}'\"", methods),
            allow_origins: "\"'*'\"".to_string(),
        }
    }

    /// Method-side declaration that all three headers are present.
    pub fn all_true() -> Self {
        Self {
            allow_headers: "true".to_string(),
            allow_methods: "true".to_string(),
            allow_origins: "true".to_string(),
        }
    }
}

impl Delegating for ApiResponseParameters {
    fn delegate(&self) -> Section {
        titled(
            "ResponseParameters",
            vec![
                single_line(format!("{}Headers", ACCESS_CONTROL_HEADER_PREFIX), &self.allow_headers),
                single_line(format!("{}Methods", ACCESS_CONTROL_HEADER_PREFIX), &self.allow_methods),
                single_line(format!("{}Origin", ACCESS_CONTROL_HEADER_PREFIX), &self.allow_origins),
            ],
        )
    }
}

/// One entry of `IntegrationResponses` or `MethodResponses`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiResponse {
    pub status_code: u16,
    #[serde(default)]
    pub selection_pattern: Option<String>,
    #[serde(default)]
    pub response_parameters: Option<ApiResponseParameters>,
    #[serde(default)]
    pub response_models: BTreeMap<String, String>,
    #[serde(default)]
    pub response_templates: BTreeMap<String, String>,
}

impl ApiResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            selection_pattern: None,
            response_parameters: None,
            response_models: BTreeMap::new(),
            response_templates: BTreeMap::new(),
        }
    }

    pub fn selection_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.selection_pattern = Some(pattern.into());
        self
    }

    pub fn response_parameters(mut self, parameters: ApiResponseParameters) -> Self {
        self.response_parameters = Some(parameters);
        self
    }

    pub fn response_model(mut self, content_type: impl Into<String>, model: impl Into<String>) -> Self {
        self.response_models.insert(content_type.into(), model.into());
        self
    }

    pub fn response_template(
        mut self,
        content_type: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.response_templates
            .insert(content_type.into(), template.into());
        self
    }

    fn validate(&self, entry: &'static str) -> Result<()> {
        if !(100..=599).contains(&self.status_code) {
            return Err(Error::constraint(
                entry,
                format!("status code {} is not a valid HTTP status", self.status_code),
            ));
        }
        Ok(())
    }
}

fn string_map(title: &str, entries: &BTreeMap<String, String>) -> Option<Section> {
    (!entries.is_empty()).then(|| titled(title, key_value_map(entries.iter())))
}

impl Delegating for ApiResponse {
    fn delegate(&self) -> Section {
        aggregating_present([
            Some(single_line("StatusCode", self.status_code)),
            self.selection_pattern
                .as_ref()
                .map(|pattern| single_line("SelectionPattern", pattern)),
            self.response_parameters
                .clone()
                .map(IntoSection::into_section),
            string_map("ResponseModels", &self.response_models),
            string_map("ResponseTemplates", &self.response_templates),
        ])
    }
}

fn response_list(title: &str, responses: &[ApiResponse]) -> Option<Section> {
    (!responses.is_empty()).then(|| {
        titled(
            title,
            vec![list_of(responses.iter().cloned().map(IntoSection::into_section))],
        )
    })
}

/// The REST API that every other API Gateway entry points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayRestApi {
    resource_id: String,
    name: String,
    description: Option<String>,
}

impl ApiGatewayRestApi {
    pub fn builder() -> ApiGatewayRestApiBuilder {
        ApiGatewayRestApiBuilder::default()
    }
}

impl Resource for ApiGatewayRestApi {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::ApiGatewayRestApi
    }

    fn properties(&self) -> Section {
        aggregating_present([
            Some(single_line("Name", &self.name)),
            self.description
                .as_ref()
                .map(|text| single_line("Description", text)),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayRestApiBuilder {
    resource_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
}

impl ApiGatewayRestApiBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn build(self) -> Result<ApiGatewayRestApi> {
        Ok(ApiGatewayRestApi {
            resource_id: required(self.resource_id, "ApiGatewayRestApi", "resource_id")?,
            name: required(self.name, "ApiGatewayRestApi", "name")?,
            description: self.description,
        })
    }
}

/// One path segment of a REST API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayResource {
    resource_id: String,
    parent_id: String,
    rest_api_id: String,
    path_part: String,
}

impl ApiGatewayResource {
    pub fn builder() -> ApiGatewayResourceBuilder {
        ApiGatewayResourceBuilder::default()
    }
}

impl Resource for ApiGatewayResource {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::ApiGatewayResource
    }

    fn properties(&self) -> Section {
        aggregating(vec![
            single_line("ParentId", &self.parent_id),
            single_line("RestApiId", &self.rest_api_id),
            single_line("PathPart", &self.path_part),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayResourceBuilder {
    resource_id: Option<String>,
    parent_id: Option<String>,
    rest_api_id: Option<String>,
    path_part: Option<String>,
}

impl ApiGatewayResourceBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn parent_id(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn rest_api_id(mut self, rest_api_id: impl Into<String>) -> Self {
        self.rest_api_id = Some(rest_api_id.into());
        self
    }

    pub fn path_part(mut self, path_part: impl Into<String>) -> Self {
        self.path_part = Some(path_part.into());
        self
    }

    pub fn build(self) -> Result<ApiGatewayResource> {
        const ENTRY: &str = "ApiGatewayResource";

        let path_part = required(self.path_part, ENTRY, "path_part")?;
        if path_part.is_empty() || path_part.contains('/') {
            return Err(Error::constraint(
                ENTRY,
                format!("path_part must be a single non-empty segment, got `{}`", path_part),
            ));
        }

        Ok(ApiGatewayResource {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            parent_id: required(self.parent_id, ENTRY, "parent_id")?,
            rest_api_id: required(self.rest_api_id, ENTRY, "rest_api_id")?,
            path_part,
        })
    }
}

/// An HTTP method on an API resource and the integration behind it
///
/// When a Lambda ARN is set, the integration `Uri` is the Lambda invocation
/// path joined around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayMethod {
    resource_id: String,
    operation_name: Option<String>,
    rest_api_id: String,
    api_resource_id: String,
    authorizer_id: Option<String>,
    authorization_type: AuthorizationType,
    http_method: HttpMethod,
    integration_type: IntegrationType,
    integration_http_method: Option<HttpMethod>,
    lambda_arn: Option<String>,
    request_templates: BTreeMap<String, String>,
    passthrough_behavior: PassthroughBehavior,
    integration_responses: Vec<ApiResponse>,
    method_responses: Vec<ApiResponse>,
}

impl ApiGatewayMethod {
    pub fn builder() -> ApiGatewayMethodBuilder {
        ApiGatewayMethodBuilder::default()
    }

    fn integration(&self) -> Section {
        let uri = self.lambda_arn.as_ref().map(|arn| {
            titled_one(
                "Uri",
                join_expression(
                    "",
                    [
                        "\"arn:aws:apigateway:\"",
                        "!Ref AWS::Region",
                        "\":lambda:path/2015-03-31/functions/\"",
                        arn.as_str(),
                        "/invocations",
                    ],
                ),
            )
        });

        titled(
            "Integration",
            vec![aggregating_present([
                Some(single_line("Type", self.integration_type)),
                self.integration_http_method
                    .map(|method| single_line("IntegrationHttpMethod", method)),
                string_map("RequestTemplates", &self.request_templates),
                Some(single_line("PassthroughBehavior", self.passthrough_behavior)),
                uri,
                response_list("IntegrationResponses", &self.integration_responses),
            ])],
        )
    }
}

impl Resource for ApiGatewayMethod {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::ApiGatewayMethod
    }

    fn properties(&self) -> Section {
        aggregating_present([
            self.operation_name
                .as_ref()
                .map(|name| single_line("OperationName", name)),
            Some(single_line("ResourceId", &self.api_resource_id)),
            Some(single_line("RestApiId", &self.rest_api_id)),
            self.authorizer_id
                .as_ref()
                .map(|id| single_line("AuthorizerId", id)),
            Some(single_line("AuthorizationType", self.authorization_type)),
            Some(single_line("HttpMethod", self.http_method)),
            Some(self.integration()),
            response_list("MethodResponses", &self.method_responses),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayMethodBuilder {
    resource_id: Option<String>,
    operation_name: Option<String>,
    rest_api_id: Option<String>,
    api_resource_id: Option<String>,
    authorizer_id: Option<String>,
    authorization_type: Option<AuthorizationType>,
    http_method: Option<HttpMethod>,
    integration_type: Option<IntegrationType>,
    integration_http_method: Option<HttpMethod>,
    lambda_arn: Option<String>,
    request_templates: BTreeMap<String, String>,
    passthrough_behavior: Option<PassthroughBehavior>,
    integration_responses: Vec<ApiResponse>,
    method_responses: Vec<ApiResponse>,
}

impl ApiGatewayMethodBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn rest_api_id(mut self, rest_api_id: impl Into<String>) -> Self {
        self.rest_api_id = Some(rest_api_id.into());
        self
    }

    /// The API resource (path) the method is attached to.
    pub fn api_resource_id(mut self, api_resource_id: impl Into<String>) -> Self {
        self.api_resource_id = Some(api_resource_id.into());
        self
    }

    pub fn authorizer_id(mut self, authorizer_id: impl Into<String>) -> Self {
        self.authorizer_id = Some(authorizer_id.into());
        self
    }

    pub fn authorization_type(mut self, authorization_type: AuthorizationType) -> Self {
        self.authorization_type = Some(authorization_type);
        self
    }

    pub fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    pub fn integration_type(mut self, integration_type: IntegrationType) -> Self {
        self.integration_type = Some(integration_type);
        self
    }

    pub fn integration_http_method(mut self, method: HttpMethod) -> Self {
        self.integration_http_method = Some(method);
        self
    }

    pub fn lambda_arn(mut self, lambda_arn: impl Into<String>) -> Self {
        self.lambda_arn = Some(lambda_arn.into());
        self
    }

    pub fn request_template(
        mut self,
        content_type: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.request_templates
            .insert(content_type.into(), template.into());
        self
    }

    pub fn passthrough_behavior(mut self, behavior: PassthroughBehavior) -> Self {
        self.passthrough_behavior = Some(behavior);
        self
    }

    pub fn integration_response(mut self, response: ApiResponse) -> Self {
        self.integration_responses.push(response);
        self
    }

    pub fn method_response(mut self, response: ApiResponse) -> Self {
        self.method_responses.push(response);
        self
    }

    pub fn build(self) -> Result<ApiGatewayMethod> {
        const ENTRY: &str = "ApiGatewayMethod";

        let authorization_type = required(self.authorization_type, ENTRY, "authorization_type")?;
        if authorization_type.needs_authorizer() && self.authorizer_id.is_none() {
            return Err(Error::constraint(
                ENTRY,
                format!("authorization type {} requires an authorizer_id", authorization_type),
            ));
        }

        let integration_type = required(self.integration_type, ENTRY, "integration_type")?;
        if integration_type != IntegrationType::Mock && self.integration_http_method.is_none() {
            return Err(Error::constraint(
                ENTRY,
                format!("{} integrations require an integration_http_method", integration_type),
            ));
        }

        for response in self.integration_responses.iter().chain(&self.method_responses) {
            response.validate(ENTRY)?;
        }

        Ok(ApiGatewayMethod {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            operation_name: self.operation_name,
            rest_api_id: required(self.rest_api_id, ENTRY, "rest_api_id")?,
            api_resource_id: required(self.api_resource_id, ENTRY, "api_resource_id")?,
            authorizer_id: self.authorizer_id,
            authorization_type,
            http_method: required(self.http_method, ENTRY, "http_method")?,
            integration_type,
            integration_http_method: self.integration_http_method,
            lambda_arn: self.lambda_arn,
            request_templates: self.request_templates,
            passthrough_behavior: required(
                self.passthrough_behavior,
                ENTRY,
                "passthrough_behavior",
            )?,
            integration_responses: self.integration_responses,
            method_responses: self.method_responses,
        })
    }
}

/// Authorizer guarding methods of a REST API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayAuthorizer {
    resource_id: String,
    rest_api_id: String,
    name: String,
    identity_source: String,
    authorizer_type: AuthorizerType,
    provider_arns: Vec<String>,
}

impl ApiGatewayAuthorizer {
    pub fn builder() -> ApiGatewayAuthorizerBuilder {
        ApiGatewayAuthorizerBuilder::default()
    }
}

impl Resource for ApiGatewayAuthorizer {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::ApiGatewayAuthorizer
    }

    fn properties(&self) -> Section {
        aggregating_present([
            Some(single_line("Name", &self.name)),
            Some(single_line("IdentitySource", &self.identity_source)),
            Some(single_line("Type", self.authorizer_type)),
            string_list("ProviderARNs", &self.provider_arns),
            Some(single_line("RestApiId", &self.rest_api_id)),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayAuthorizerBuilder {
    resource_id: Option<String>,
    rest_api_id: Option<String>,
    name: Option<String>,
    identity_source: Option<String>,
    authorizer_type: Option<AuthorizerType>,
    provider_arns: Vec<String>,
}

impl ApiGatewayAuthorizerBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn rest_api_id(mut self, rest_api_id: impl Into<String>) -> Self {
        self.rest_api_id = Some(rest_api_id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Where the caller's token is read from, e.g. `method.request.header.Authorization`.
    pub fn identity_source(mut self, identity_source: impl Into<String>) -> Self {
        self.identity_source = Some(identity_source.into());
        self
    }

    pub fn authorizer_type(mut self, authorizer_type: AuthorizerType) -> Self {
        self.authorizer_type = Some(authorizer_type);
        self
    }

    pub fn provider_arn(mut self, arn: impl Into<String>) -> Self {
        self.provider_arns.push(arn.into());
        self
    }

    pub fn build(self) -> Result<ApiGatewayAuthorizer> {
        const ENTRY: &str = "ApiGatewayAuthorizer";

        let authorizer_type = required(self.authorizer_type, ENTRY, "authorizer_type")?;
        if authorizer_type == AuthorizerType::CognitoUserPools && self.provider_arns.is_empty() {
            return Err(Error::constraint(
                ENTRY,
                "COGNITO_USER_POOLS authorizers need at least one provider ARN",
            ));
        }

        Ok(ApiGatewayAuthorizer {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            rest_api_id: required(self.rest_api_id, ENTRY, "rest_api_id")?,
            name: required(self.name, ENTRY, "name")?,
            identity_source: required(self.identity_source, ENTRY, "identity_source")?,
            authorizer_type,
            provider_arns: self.provider_arns,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayDeployment {
    resource_id: String,
    rest_api_id: String,
}

impl ApiGatewayDeployment {
    pub fn builder() -> ApiGatewayDeploymentBuilder {
        ApiGatewayDeploymentBuilder::default()
    }
}

impl Resource for ApiGatewayDeployment {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::ApiGatewayDeployment
    }

    fn properties(&self) -> Section {
        single_line("RestApiId", &self.rest_api_id)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayDeploymentBuilder {
    resource_id: Option<String>,
    rest_api_id: Option<String>,
}

impl ApiGatewayDeploymentBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn rest_api_id(mut self, rest_api_id: impl Into<String>) -> Self {
        self.rest_api_id = Some(rest_api_id.into());
        self
    }

    pub fn build(self) -> Result<ApiGatewayDeployment> {
        Ok(ApiGatewayDeployment {
            resource_id: required(self.resource_id, "ApiGatewayDeployment", "resource_id")?,
            rest_api_id: required(self.rest_api_id, "ApiGatewayDeployment", "rest_api_id")?,
        })
    }
}

/// Named stage exposing a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiGatewayStage {
    resource_id: String,
    rest_api_id: String,
    stage_name: String,
    deployment_id: String,
}

impl ApiGatewayStage {
    pub fn builder() -> ApiGatewayStageBuilder {
        ApiGatewayStageBuilder::default()
    }
}

impl Resource for ApiGatewayStage {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::ApiGatewayStage
    }

    fn properties(&self) -> Section {
        aggregating(vec![
            single_line("RestApiId", &self.rest_api_id),
            single_line("StageName", &self.stage_name),
            single_line("DeploymentId", &self.deployment_id),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiGatewayStageBuilder {
    resource_id: Option<String>,
    rest_api_id: Option<String>,
    stage_name: Option<String>,
    deployment_id: Option<String>,
}

impl ApiGatewayStageBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn rest_api_id(mut self, rest_api_id: impl Into<String>) -> Self {
        self.rest_api_id = Some(rest_api_id.into());
        self
    }

    pub fn stage_name(mut self, stage_name: impl Into<String>) -> Self {
        self.stage_name = Some(stage_name.into());
        self
    }

    pub fn deployment_id(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = Some(deployment_id.into());
        self
    }

    pub fn build(self) -> Result<ApiGatewayStage> {
        const ENTRY: &str = "ApiGatewayStage";

        let stage_name = required(self.stage_name, ENTRY, "stage_name")?;
        let valid = !stage_name.is_empty()
            && stage_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::constraint(
                ENTRY,
                format!(
                    "stage_name may only contain letters, digits, '-' and '_', got `{}`",
                    stage_name
                ),
            ));
        }

        Ok(ApiGatewayStage {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            rest_api_id: required(self.rest_api_id, ENTRY, "rest_api_id")?,
            stage_name,
            deployment_id: required(self.deployment_id, ENTRY, "deployment_id")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intrinsic::{get_att_arn, get_att_attribute, referencing};

    fn items_method() -> ApiGatewayMethodBuilder {
        ApiGatewayMethod::builder()
            .resource_id("ItemsGet")
            .rest_api_id(referencing("ItemsApi"))
            .api_resource_id(referencing("ItemsResource"))
            .authorization_type(AuthorizationType::None)
            .http_method(HttpMethod::Get)
            .integration_type(IntegrationType::Aws)
            .integration_http_method(HttpMethod::Post)
            .passthrough_behavior(PassthroughBehavior::WhenNoTemplates)
    }

    #[test]
    fn test_rest_api() {
        let api = ApiGatewayRestApi::builder()
            .resource_id("ItemsApi")
            .name("items")
            .description("Item catalog")
            .build()
            .unwrap();
        assert_eq!(
            api.render(),
            "ItemsApi:\n  Type: AWS::ApiGateway::RestApi\n  Properties:\n    Name: items\n    Description: Item catalog"
        );
    }

    #[test]
    fn test_api_resource() {
        let resource = ApiGatewayResource::builder()
            .resource_id("ItemsResource")
            .parent_id(get_att_attribute("ItemsApi", "RootResourceId"))
            .rest_api_id(referencing("ItemsApi"))
            .path_part("items")
            .build()
            .unwrap();
        let expected = "\
ItemsResource:
  Type: AWS::ApiGateway::Resource
  Properties:
    ParentId: !GetAtt ItemsApi.RootResourceId
    RestApiId: !Ref ItemsApi
    PathPart: items";
        assert_eq!(resource.render(), expected);
    }

    #[test]
    fn test_path_part_must_be_one_segment() {
        let err = ApiGatewayResource::builder()
            .resource_id("Nested")
            .parent_id("root")
            .rest_api_id("api")
            .path_part("items/{id}")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Constraint { entry: "ApiGatewayResource", .. }));
    }

    #[test]
    fn test_lambda_method_with_cors_responses() {
        let method = items_method()
            .lambda_arn(get_att_arn("ItemsFunction"))
            .request_template("application/json", "'{\"id\": \"$input.params('id')\"}'")
            .integration_response(
                ApiResponse::new(200).response_parameters(
                    ApiResponseParameters::for_allowed_methods(&[HttpMethod::Get, HttpMethod::Options]),
                ),
            )
            .method_response(
                ApiResponse::new(200)
                    .response_parameters(ApiResponseParameters::all_true())
                    .response_model("application/json", "Empty"),
            )
            .build()
            .unwrap();

        let expected = [
            "ItemsGet:",
            "  Type: AWS::ApiGateway::Method",
            "  Properties:",
            "    ResourceId: !Ref ItemsResource",
            "    RestApiId: !Ref ItemsApi",
            "    AuthorizationType: NONE",
            "    HttpMethod: GET",
            "    Integration:",
            "      Type: AWS",
            "      IntegrationHttpMethod: POST",
            "      RequestTemplates:",
            "        application/json: '{\"id\": \"$input.params('id')\"}'",
            "      PassthroughBehavior: WHEN_NO_TEMPLATES",
            "      Uri:",
            "        Fn::Join:",
            "          - \"\"",
            "          - - \"arn:aws:apigateway:\"",
            "            - !Ref AWS::Region",
            "            - \":lambda:path/2015-03-31/functions/\"",
            "            - Fn::GetAtt: [ItemsFunction, Arn]",
            "            - /invocations",
            "      IntegrationResponses:",
            "        - StatusCode: 200",
            "          ResponseParameters:",
            "            method.response.header.Access-Control-Allow-Headers: \"'Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token'\"",
            "            method.response.header.Access-Control-Allow-Methods: \"'GET,OPTIONS'\"",
            "            method.response.header.Access-Control-Allow-Origin: \"'*'\"",
            "    MethodResponses:",
            "      - StatusCode: 200",
            "        ResponseParameters:",
            "          method.response.header.Access-Control-Allow-Headers: true",
            "          method.response.header.Access-Control-Allow-Methods: true",
            "          method.response.header.Access-Control-Allow-Origin: true",
            "        ResponseModels:",
            "          application/json: Empty",
        ]
        .join("\n");
        assert_eq!(method.render(), expected);
    }

    #[test]
    fn test_mock_method_without_optional_parts() {
        let method = ApiGatewayMethod::builder()
            .resource_id("ItemsOptions")
            .operation_name("Preflight")
            .rest_api_id("api")
            .api_resource_id("items")
            .authorization_type(AuthorizationType::None)
            .http_method(HttpMethod::Options)
            .integration_type(IntegrationType::Mock)
            .passthrough_behavior(PassthroughBehavior::Never)
            .build()
            .unwrap();

        let rendered = method.render();
        assert!(rendered.contains("  Properties:\n    OperationName: Preflight\n    ResourceId: items\n"));
        assert!(rendered.ends_with("    Integration:\n      Type: MOCK\n      PassthroughBehavior: NEVER"));
        assert!(!rendered.contains("MethodResponses"));
    }

    #[test]
    fn test_custom_authorization_requires_authorizer() {
        let err = items_method()
            .authorization_type(AuthorizationType::CognitoUserPools)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ApiGatewayMethod: authorization type COGNITO_USER_POOLS requires an authorizer_id"
        );

        let method = items_method()
            .authorization_type(AuthorizationType::CognitoUserPools)
            .authorizer_id(referencing("ItemsAuthorizer"))
            .build()
            .unwrap();
        assert!(method
            .render()
            .contains("    AuthorizerId: !Ref ItemsAuthorizer\n    AuthorizationType: COGNITO_USER_POOLS\n"));
    }

    #[test]
    fn test_aws_integration_requires_http_method() {
        let err = ApiGatewayMethod::builder()
            .resource_id("ItemsGet")
            .rest_api_id("api")
            .api_resource_id("items")
            .authorization_type(AuthorizationType::AwsIam)
            .http_method(HttpMethod::Get)
            .integration_type(IntegrationType::AwsProxy)
            .passthrough_behavior(PassthroughBehavior::WhenNoMatch)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ApiGatewayMethod: AWS_PROXY integrations require an integration_http_method"
        );
    }

    #[test]
    fn test_response_status_code_checked() {
        let err = items_method()
            .method_response(ApiResponse::new(42))
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ApiGatewayMethod: status code 42 is not a valid HTTP status"
        );
    }

    #[test]
    fn test_response_with_selection_pattern_and_template() {
        let response = ApiResponse::new(400)
            .selection_pattern(".*Invalid.*")
            .response_template("application/json", "'{\"error\": \"bad request\"}'");
        assert_eq!(
            response.render(),
            "StatusCode: 400\nSelectionPattern: .*Invalid.*\nResponseTemplates:\n  application/json: '{\"error\": \"bad request\"}'"
        );
    }

    #[test]
    fn test_cognito_authorizer() {
        let authorizer = ApiGatewayAuthorizer::builder()
            .resource_id("ItemsAuthorizer")
            .rest_api_id(referencing("ItemsApi"))
            .name("users")
            .identity_source("method.request.header.Authorization")
            .authorizer_type(AuthorizerType::CognitoUserPools)
            .provider_arn(get_att_arn("Users"))
            .build()
            .unwrap();

        let expected = "\
ItemsAuthorizer:
  Type: AWS::ApiGateway::Authorizer
  Properties:
    Name: users
    IdentitySource: method.request.header.Authorization
    Type: COGNITO_USER_POOLS
    ProviderARNs:
      - Fn::GetAtt: [Users, Arn]
    RestApiId: !Ref ItemsApi";
        assert_eq!(authorizer.render(), expected);
    }

    #[test]
    fn test_cognito_authorizer_needs_provider() {
        let err = ApiGatewayAuthorizer::builder()
            .resource_id("ItemsAuthorizer")
            .rest_api_id("api")
            .name("users")
            .identity_source("method.request.header.Authorization")
            .authorizer_type(AuthorizerType::CognitoUserPools)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Constraint { entry: "ApiGatewayAuthorizer", .. }));
    }

    #[test]
    fn test_deployment_and_stage() {
        let deployment = ApiGatewayDeployment::builder()
            .resource_id("ItemsDeployment")
            .rest_api_id(referencing("ItemsApi"))
            .build()
            .unwrap();
        assert_eq!(
            deployment.render(),
            "ItemsDeployment:\n  Type: AWS::ApiGateway::Deployment\n  Properties:\n    RestApiId: !Ref ItemsApi"
        );

        let stage = ApiGatewayStage::builder()
            .resource_id("ItemsStage")
            .rest_api_id(referencing("ItemsApi"))
            .stage_name("prod")
            .deployment_id(referencing("ItemsDeployment"))
            .build()
            .unwrap();
        assert_eq!(
            stage.render(),
            "ItemsStage:\n  Type: AWS::ApiGateway::Stage\n  Properties:\n    RestApiId: !Ref ItemsApi\n    StageName: prod\n    DeploymentId: !Ref ItemsDeployment"
        );
    }

    #[test]
    fn test_stage_name_characters() {
        let err = ApiGatewayStage::builder()
            .resource_id("ItemsStage")
            .rest_api_id("api")
            .stage_name("prod stage")
            .deployment_id("deployment")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("stage_name may only contain"));
    }
}
