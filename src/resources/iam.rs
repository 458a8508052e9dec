use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::resources::{Resource, ResourceType};
use crate::section::*;

const POLICY_DOCUMENT_VERSION: &str = "\"2012-10-17\"";
const DEFAULT_POLICY_NAME: &str = "root";

/// IAM role assumable by a set of services, with one inline policy that
/// allows a list of actions on every resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IamRole {
    resource_id: String,
    assume_role_statement: PolicyStatement,
    policy_name: String,
    allowed_actions: Vec<String>,
}

impl IamRole {
    pub fn builder() -> IamRoleBuilder {
        IamRoleBuilder::default()
    }

    fn allowed_actions_statement(&self) -> Section {
        aggregating(vec![
            single_line("Effect", "Allow"),
            titled(
                "Action",
                vec![list_of(plain_strings(self.allowed_actions.iter().cloned()))],
            ),
            single_line("Resource", "\"*\""),
        ])
    }
}

fn policy_document(name: &str, statements: Vec<Section>) -> Section {
    titled(
        name,
        vec![
            single_line("Version", POLICY_DOCUMENT_VERSION),
            titled("Statement", vec![list_of(statements)]),
        ],
    )
}

impl Resource for IamRole {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::IamRole
    }

    fn properties(&self) -> Section {
        aggregating(vec![
            policy_document(
                "AssumeRolePolicyDocument",
                vec![self.assume_role_statement.clone().into_section()],
            ),
            single_line("Path", "/"),
            titled(
                "Policies",
                vec![list_of([aggregating(vec![
                    single_line("PolicyName", &self.policy_name),
                    policy_document("PolicyDocument", vec![self.allowed_actions_statement()]),
                ])])],
            ),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IamRoleBuilder {
    resource_id: Option<String>,
    assume_role_statement: Option<PolicyStatement>,
    policy_name: Option<String>,
    allowed_actions: Vec<String>,
}

impl IamRoleBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn assume_role_statement(mut self, statement: PolicyStatement) -> Self {
        self.assume_role_statement = Some(statement);
        self
    }

    /// Name of the inline policy, `root` when unset.
    pub fn policy_name(mut self, policy_name: impl Into<String>) -> Self {
        self.policy_name = Some(policy_name.into());
        self
    }

    pub fn allowed_action(mut self, action: impl Into<String>) -> Self {
        self.allowed_actions.push(action.into());
        self
    }

    pub fn build(self) -> Result<IamRole> {
        if self.allowed_actions.is_empty() {
            return Err(Error::missing("IamRole", "allowed_actions"));
        }
        let assume_role_statement =
            required(self.assume_role_statement, "IamRole", "assume_role_statement")?;
        if assume_role_statement.services.is_empty() {
            return Err(Error::constraint(
                "IamRole",
                "assume_role_statement must name at least one service",
            ));
        }

        Ok(IamRole {
            resource_id: required(self.resource_id, "IamRole", "resource_id")?,
            assume_role_statement,
            policy_name: self
                .policy_name
                .unwrap_or_else(|| DEFAULT_POLICY_NAME.to_string()),
            allowed_actions: self.allowed_actions,
        })
    }
}

/// Statement granting `sts:<action>` to the listed principals
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyStatement {
    pub principal: String,
    pub action: String,
    pub services: Vec<String>,
}

impl PolicyStatement {
    pub fn new(principal: impl Into<String>, action: impl Into<String>, services: Vec<String>) -> Self {
        Self {
            principal: principal.into(),
            action: action.into(),
            services,
        }
    }

    /// `sts:AssumeRole` for AWS services.
    pub fn assume_role_by_services<I, S>(services: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            "Service",
            "AssumeRole",
            services.into_iter().map(Into::into).collect(),
        )
    }
}

impl Delegating for PolicyStatement {
    fn delegate(&self) -> Section {
        aggregating(vec![
            single_line("Effect", "Allow"),
            titled(
                "Principal",
                vec![titled(
                    self.principal.clone(),
                    vec![list_of(plain_strings(self.services.iter().cloned()))],
                )],
            ),
            single_line("Action", format!("sts:{}", self.action)),
        ])
    }
}
