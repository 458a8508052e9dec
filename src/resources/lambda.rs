use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::resources::{Resource, ResourceType};
use crate::section::*;

pub const DEFAULT_MEMORY_SIZE: u32 = 128;
pub const DEFAULT_TIMEOUT: u32 = 3;

/// Lambda function whose code lives in an S3 object
///
/// `role` is expression text, typically from
/// [`get_att_arn`](crate::intrinsic::get_att_arn), and is emitted under its
/// own `Role:` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LambdaFunction {
    resource_id: String,
    s3_bucket: String,
    s3_key: String,
    handler: String,
    runtime: String,
    memory_size: u32,
    role: String,
    description: Option<String>,
    timeout: u32,
    environment: BTreeMap<String, String>,
}

impl LambdaFunction {
    pub fn builder() -> LambdaFunctionBuilder {
        LambdaFunctionBuilder::default()
    }
}

impl Resource for LambdaFunction {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::LambdaFunction
    }

    fn properties(&self) -> Section {
        let environment = (!self.environment.is_empty()).then(|| {
            titled(
                "Environment",
                vec![titled("Variables", key_value_map(self.environment.iter()))],
            )
        });

        aggregating_present([
            Some(titled(
                "Code",
                vec![
                    single_line("S3Bucket", &self.s3_bucket),
                    single_line("S3Key", &self.s3_key),
                ],
            )),
            Some(single_line("Handler", &self.handler)),
            Some(single_line("Runtime", &self.runtime)),
            Some(single_line("MemorySize", self.memory_size)),
            Some(titled("Role", vec![plain(self.role.clone())])),
            self.description
                .as_ref()
                .map(|text| single_line("Description", text)),
            Some(single_line("Timeout", self.timeout)),
            environment,
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LambdaFunctionBuilder {
    resource_id: Option<String>,
    s3_bucket: Option<String>,
    s3_key: Option<String>,
    handler: Option<String>,
    runtime: Option<String>,
    memory_size: Option<u32>,
    role: Option<String>,
    description: Option<String>,
    timeout: Option<u32>,
    environment: BTreeMap<String, String>,
}

impl LambdaFunctionBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn code(mut self, s3_bucket: impl Into<String>, s3_key: impl Into<String>) -> Self {
        self.s3_bucket = Some(s3_bucket.into());
        self.s3_key = Some(s3_key.into());
        self
    }

    pub fn handler(mut self, handler: impl Into<String>) -> Self {
        self.handler = Some(handler.into());
        self
    }

    pub fn runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    /// Memory in MB, 128 when unset.
    pub fn memory_size(mut self, megabytes: u32) -> Self {
        self.memory_size = Some(megabytes);
        self
    }

    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Timeout in seconds, 3 when unset.
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn environment_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Result<LambdaFunction> {
        const ENTRY: &str = "LambdaFunction";

        let memory_size = self.memory_size.unwrap_or(DEFAULT_MEMORY_SIZE);
        if !(128..=10240).contains(&memory_size) {
            return Err(Error::constraint(
                ENTRY,
                format!("memory_size must be between 128 and 10240 MB, got {}", memory_size),
            ));
        }
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if !(1..=900).contains(&timeout) {
            return Err(Error::constraint(
                ENTRY,
                format!("timeout must be between 1 and 900 seconds, got {}", timeout),
            ));
        }

        Ok(LambdaFunction {
            resource_id: required(self.resource_id, ENTRY, "resource_id")?,
            s3_bucket: required(self.s3_bucket, ENTRY, "s3_bucket")?,
            s3_key: required(self.s3_key, ENTRY, "s3_key")?,
            handler: required(self.handler, ENTRY, "handler")?,
            runtime: required(self.runtime, ENTRY, "runtime")?,
            memory_size,
            role: required(self.role, ENTRY, "role")?,
            description: self.description,
            timeout,
            environment: self.environment,
        })
    }
}
