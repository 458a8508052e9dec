//! Cognito user pools, their clients, identity pools and identity pool role
//! attachments.

use std::fmt;

use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::resources::{string_list, Resource, ResourceType};
use crate::section::*;

/// Days an admin-created account may stay unused, when not configured
pub const DEFAULT_UNUSED_ACCOUNT_VALIDITY_DAYS: u32 = 7;

const MAX_UNUSED_ACCOUNT_VALIDITY_DAYS: u32 = 365;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MfaConfiguration {
    #[default]
    Off,
    On,
    Optional,
}

impl fmt::Display for MfaConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MfaConfiguration::Off => "OFF",
            MfaConfiguration::On => "ON",
            MfaConfiguration::Optional => "OPTIONAL",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AttributeDataType {
    String,
    Number,
    DateTime,
    Boolean,
}

impl fmt::Display for AttributeDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeDataType::String => "String",
            AttributeDataType::Number => "Number",
            AttributeDataType::DateTime => "DateTime",
            AttributeDataType::Boolean => "Boolean",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PasswordPolicy {
    pub minimum_length: u32,
    #[serde(default)]
    pub require_lowercase: bool,
    #[serde(default)]
    pub require_numbers: bool,
    #[serde(default)]
    pub require_uppercase: bool,
}

impl PasswordPolicy {
    fn validate(&self) -> Result<()> {
        if !(6..=99).contains(&self.minimum_length) {
            return Err(Error::constraint(
                "CognitoUserPool",
                format!(
                    "password minimum_length must be between 6 and 99, got {}",
                    self.minimum_length
                ),
            ));
        }
        Ok(())
    }
}

impl Delegating for PasswordPolicy {
    fn delegate(&self) -> Section {
        aggregating(vec![
            single_line("MinimumLength", self.minimum_length),
            single_line("RequireLowercase", self.require_lowercase),
            single_line("RequireNumbers", self.require_numbers),
            single_line("RequireUppercase", self.require_uppercase),
        ])
    }
}

/// One user attribute of the pool schema
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaAttribute {
    pub name: String,
    pub attribute_data_type: AttributeDataType,
    #[serde(default)]
    pub mutable: bool,
    #[serde(default)]
    pub required: bool,
}

impl SchemaAttribute {
    pub fn new(name: impl Into<String>, attribute_data_type: AttributeDataType) -> Self {
        Self {
            name: name.into(),
            attribute_data_type,
            mutable: false,
            required: false,
        }
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl Delegating for SchemaAttribute {
    fn delegate(&self) -> Section {
        aggregating(vec![
            single_line("Name", &self.name),
            single_line("AttributeDataType", self.attribute_data_type),
            single_line("Mutable", self.mutable),
            single_line("Required", self.required),
        ])
    }
}

/// User directory; MFA defaults to `OFF` and unused admin-created accounts
/// expire after seven days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoUserPool {
    resource_id: String,
    user_pool_name: String,
    admin_create_user_only: bool,
    unused_account_validity_days: u32,
    username_attributes: Vec<String>,
    mfa_configuration: MfaConfiguration,
    auto_verified_attributes: Vec<String>,
    email_verification_message: Option<String>,
    email_verification_subject: Option<String>,
    password_policy: Option<PasswordPolicy>,
    schema: Vec<SchemaAttribute>,
}

impl CognitoUserPool {
    pub fn builder() -> CognitoUserPoolBuilder {
        CognitoUserPoolBuilder::default()
    }
}

impl Resource for CognitoUserPool {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::UserPool
    }

    fn properties(&self) -> Section {
        let schema = (!self.schema.is_empty()).then(|| {
            titled(
                "Schema",
                vec![list_of(self.schema.iter().cloned().map(IntoSection::into_section))],
            )
        });

        aggregating_present([
            Some(single_line("UserPoolName", &self.user_pool_name)),
            Some(titled(
                "AdminCreateUserConfig",
                vec![
                    single_line("AllowAdminCreateUserOnly", self.admin_create_user_only),
                    single_line("UnusedAccountValidityDays", self.unused_account_validity_days),
                ],
            )),
            string_list("UsernameAttributes", &self.username_attributes),
            Some(single_line(
                "MfaConfiguration",
                format!("\"{}\"", self.mfa_configuration),
            )),
            string_list("AutoVerifiedAttributes", &self.auto_verified_attributes),
            self.email_verification_message
                .as_ref()
                .map(|message| single_line("EmailVerificationMessage", message)),
            self.email_verification_subject
                .as_ref()
                .map(|subject| single_line("EmailVerificationSubject", subject)),
            self.password_policy.map(|policy| {
                titled_one("Policies", titled_one("PasswordPolicy", policy.into_section()))
            }),
            schema,
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CognitoUserPoolBuilder {
    resource_id: Option<String>,
    user_pool_name: Option<String>,
    admin_create_user_only: bool,
    unused_account_validity_days: Option<u32>,
    username_attributes: Vec<String>,
    mfa_configuration: MfaConfiguration,
    auto_verified_attributes: Vec<String>,
    email_verification_message: Option<String>,
    email_verification_subject: Option<String>,
    password_policy: Option<PasswordPolicy>,
    schema: Vec<SchemaAttribute>,
}

impl CognitoUserPoolBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn user_pool_name(mut self, user_pool_name: impl Into<String>) -> Self {
        self.user_pool_name = Some(user_pool_name.into());
        self
    }

    pub fn admin_create_user_only(mut self, admin_only: bool) -> Self {
        self.admin_create_user_only = admin_only;
        self
    }

    pub fn unused_account_validity_days(mut self, days: u32) -> Self {
        self.unused_account_validity_days = Some(days);
        self
    }

    /// Attribute accepted as the user name, e.g. `email`.
    pub fn username_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.username_attributes.push(attribute.into());
        self
    }

    pub fn mfa_configuration(mut self, mfa: MfaConfiguration) -> Self {
        self.mfa_configuration = mfa;
        self
    }

    pub fn auto_verified_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.auto_verified_attributes.push(attribute.into());
        self
    }

    pub fn email_verification(
        mut self,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.email_verification_subject = Some(subject.into());
        self.email_verification_message = Some(message.into());
        self
    }

    pub fn password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = Some(policy);
        self
    }

    pub fn schema_attribute(mut self, attribute: SchemaAttribute) -> Self {
        self.schema.push(attribute);
        self
    }

    pub fn build(self) -> Result<CognitoUserPool> {
        const ENTRY: &str = "CognitoUserPool";

        let unused_account_validity_days = self
            .unused_account_validity_days
            .unwrap_or(DEFAULT_UNUSED_ACCOUNT_VALIDITY_DAYS);
        if unused_account_validity_days > MAX_UNUSED_ACCOUNT_VALIDITY_DAYS {
            return Err(Error::constraint(
                ENTRY,
                format!(
                    "unused_account_validity_days must be at most {}, got {}",
                    MAX_UNUSED_ACCOUNT_VALIDITY_DAYS, unused_account_validity_days
                ),
            ));
        }
        if let Some(policy) = &self.password_policy {
            policy.validate()?;
        }
        if let Some(message) = &self.email_verification_message {
            if !message.contains("{####}") {
                return Err(Error::constraint(
                    ENTRY,
                    "email_verification_message must contain the {####} code placeholder",
                ));
            }
        }

        Ok(CognitoUserPool {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            user_pool_name: required(self.user_pool_name, ENTRY, "user_pool_name")?,
            admin_create_user_only: self.admin_create_user_only,
            unused_account_validity_days,
            username_attributes: self.username_attributes,
            mfa_configuration: self.mfa_configuration,
            auto_verified_attributes: self.auto_verified_attributes,
            email_verification_message: self.email_verification_message,
            email_verification_subject: self.email_verification_subject,
            password_policy: self.password_policy,
            schema: self.schema,
        })
    }
}

/// App client of a user pool; no secret is generated unless asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoUserPoolClient {
    resource_id: String,
    client_name: String,
    generate_secret: bool,
    user_pool_id: String,
}

impl CognitoUserPoolClient {
    pub fn builder() -> CognitoUserPoolClientBuilder {
        CognitoUserPoolClientBuilder::default()
    }
}

impl Resource for CognitoUserPoolClient {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::UserPoolClient
    }

    fn properties(&self) -> Section {
        aggregating(vec![
            single_line("ClientName", &self.client_name),
            single_line("GenerateSecret", self.generate_secret),
            single_line("UserPoolId", &self.user_pool_id),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CognitoUserPoolClientBuilder {
    resource_id: Option<String>,
    client_name: Option<String>,
    generate_secret: bool,
    user_pool_id: Option<String>,
}

impl CognitoUserPoolClientBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn generate_secret(mut self, generate_secret: bool) -> Self {
        self.generate_secret = generate_secret;
        self
    }

    pub fn user_pool_id(mut self, user_pool_id: impl Into<String>) -> Self {
        self.user_pool_id = Some(user_pool_id.into());
        self
    }

    pub fn build(self) -> Result<CognitoUserPoolClient> {
        const ENTRY: &str = "CognitoUserPoolClient";

        Ok(CognitoUserPoolClient {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            client_name: required(self.client_name, ENTRY, "client_name")?,
            generate_secret: self.generate_secret,
            user_pool_id: required(self.user_pool_id, ENTRY, "user_pool_id")?,
        })
    }
}

/// A user pool client trusted by an identity pool
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CognitoIdentityProvider {
    pub client_id: String,
    pub provider_name: String,
}

impl CognitoIdentityProvider {
    pub fn new(client_id: impl Into<String>, provider_name: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            provider_name: provider_name.into(),
        }
    }
}

impl Delegating for CognitoIdentityProvider {
    fn delegate(&self) -> Section {
        aggregating(vec![
            single_line("ClientId", &self.client_id),
            single_line("ProviderName", &self.provider_name),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CognitoIdentityPool {
    resource_id: String,
    identity_pool_name: String,
    allow_unauthenticated_identities: bool,
    providers: Vec<CognitoIdentityProvider>,
}

impl CognitoIdentityPool {
    pub fn builder() -> CognitoIdentityPoolBuilder {
        CognitoIdentityPoolBuilder::default()
    }
}

impl Resource for CognitoIdentityPool {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::IdentityPool
    }

    fn properties(&self) -> Section {
        let providers = (!self.providers.is_empty()).then(|| {
            titled(
                "CognitoIdentityProviders",
                vec![list_of(self.providers.iter().cloned().map(IntoSection::into_section))],
            )
        });

        aggregating_present([
            Some(single_line("IdentityPoolName", &self.identity_pool_name)),
            Some(single_line(
                "AllowUnauthenticatedIdentities",
                self.allow_unauthenticated_identities,
            )),
            providers,
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CognitoIdentityPoolBuilder {
    resource_id: Option<String>,
    identity_pool_name: Option<String>,
    allow_unauthenticated_identities: bool,
    providers: Vec<CognitoIdentityProvider>,
}

impl CognitoIdentityPoolBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn identity_pool_name(mut self, identity_pool_name: impl Into<String>) -> Self {
        self.identity_pool_name = Some(identity_pool_name.into());
        self
    }

    pub fn allow_unauthenticated_identities(mut self, allow: bool) -> Self {
        self.allow_unauthenticated_identities = allow;
        self
    }

    pub fn provider(mut self, provider: CognitoIdentityProvider) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> Result<CognitoIdentityPool> {
        const ENTRY: &str = "CognitoIdentityPool";

        if !self.allow_unauthenticated_identities && self.providers.is_empty() {
            return Err(Error::constraint(
                ENTRY,
                "an identity pool without unauthenticated access needs at least one provider",
            ));
        }

        Ok(CognitoIdentityPool {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            identity_pool_name: required(self.identity_pool_name, ENTRY, "identity_pool_name")?,
            allow_unauthenticated_identities: self.allow_unauthenticated_identities,
            providers: self.providers,
        })
    }
}

/// Attaches the authenticated and, optionally, unauthenticated IAM roles to
/// an identity pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityPoolRoleAttachment {
    resource_id: String,
    identity_pool_id: String,
    authenticated_role: String,
    unauthenticated_role: Option<String>,
}

impl IdentityPoolRoleAttachment {
    pub fn builder() -> IdentityPoolRoleAttachmentBuilder {
        IdentityPoolRoleAttachmentBuilder::default()
    }
}

impl Resource for IdentityPoolRoleAttachment {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::IdentityPoolRoleAttachment
    }

    fn properties(&self) -> Section {
        aggregating(vec![
            single_line("IdentityPoolId", &self.identity_pool_id),
            titled(
                "Roles",
                vec![aggregating_present([
                    Some(single_line("authenticated", &self.authenticated_role)),
                    self.unauthenticated_role
                        .as_ref()
                        .map(|role| single_line("unauthenticated", role)),
                ])],
            ),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityPoolRoleAttachmentBuilder {
    resource_id: Option<String>,
    identity_pool_id: Option<String>,
    authenticated_role: Option<String>,
    unauthenticated_role: Option<String>,
}

impl IdentityPoolRoleAttachmentBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn identity_pool_id(mut self, identity_pool_id: impl Into<String>) -> Self {
        self.identity_pool_id = Some(identity_pool_id.into());
        self
    }

    pub fn authenticated_role(mut self, role: impl Into<String>) -> Self {
        self.authenticated_role = Some(role.into());
        self
    }

    pub fn unauthenticated_role(mut self, role: impl Into<String>) -> Self {
        self.unauthenticated_role = Some(role.into());
        self
    }

    pub fn build(self) -> Result<IdentityPoolRoleAttachment> {
        const ENTRY: &str = "IdentityPoolRoleAttachment";

        Ok(IdentityPoolRoleAttachment {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            identity_pool_id: required(self.identity_pool_id, ENTRY, "identity_pool_id")?,
            authenticated_role: required(self.authenticated_role, ENTRY, "authenticated_role")?,
            unauthenticated_role: self.unauthenticated_role,
        })
    }
}
