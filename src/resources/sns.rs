use serde::Deserialize;

use crate::error::{required, Error, Result};
use crate::resources::{Resource, ResourceType};
use crate::section::*;

/// Longest display name SNS accepts for SMS subscriptions
pub const MAX_DISPLAY_NAME_LENGTH: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnsTopic {
    resource_id: String,
    topic_name: String,
    display_name: Option<String>,
}

impl SnsTopic {
    pub fn builder() -> SnsTopicBuilder {
        SnsTopicBuilder::default()
    }
}

impl Resource for SnsTopic {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    fn resource_type(&self) -> ResourceType {
        ResourceType::SnsTopic
    }

    fn properties(&self) -> Section {
        aggregating_present([
            Some(single_line("TopicName", &self.topic_name)),
            self.display_name
                .as_ref()
                .map(|name| single_line("DisplayName", name)),
        ])
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnsTopicBuilder {
    resource_id: Option<String>,
    topic_name: Option<String>,
    display_name: Option<String>,
}

impl SnsTopicBuilder {
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn topic_name(mut self, topic_name: impl Into<String>) -> Self {
        self.topic_name = Some(topic_name.into());
        self
    }

    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn build(self) -> Result<SnsTopic> {
        if let Some(name) = &self.display_name {
            let length = name.chars().count();
            if length > MAX_DISPLAY_NAME_LENGTH {
                return Err(Error::constraint(
                    "SnsTopic",
                    format!(
                        "display_name must be at most {} characters, got {}",
                        MAX_DISPLAY_NAME_LENGTH, length
                    ),
                ));
            }
        }

        Ok(SnsTopic {
            resource_id: required(self.resource_id, "SnsTopic", "resource_id")?,
            topic_name: required(self.topic_name, "SnsTopic", "topic_name")?,
            display_name: self.display_name,
        })
    }
}
