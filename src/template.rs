//! Top-level template sections and document assembly.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::resources::Resource;
use crate::section::*;

/// One entry of the `Parameters` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub parameter_type: String,
    pub description: String,
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        parameter_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            parameter_type: parameter_type.into(),
            description: description.into(),
        }
    }
}

impl Delegating for Parameter {
    fn delegate(&self) -> Section {
        titled(
            self.name.clone(),
            vec![
                single_line("Type", &self.parameter_type),
                single_line("Description", &self.description),
            ],
        )
    }
}

/// One entry of the `Conditions` section; `function` is opaque expression text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub id: String,
    pub function: String,
}

impl Condition {
    pub fn new(id: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            function: function.into(),
        }
    }
}

impl Delegating for Condition {
    fn delegate(&self) -> Section {
        titled(self.id.clone(), vec![plain(self.function.clone())])
    }
}

/// One entry of the `Outputs` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Output {
    pub name: String,
    pub description: String,
    pub value: String,
}

impl Output {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value: value.into(),
        }
    }
}

impl Delegating for Output {
    fn delegate(&self) -> Section {
        titled(
            self.name.clone(),
            vec![
                single_line("Description", &self.description),
                single_line("Value", &self.value),
            ],
        )
    }
}

pub fn description(text: &str) -> Section {
    single_line("Description", text)
}

pub fn parameters(parameters: &[Parameter]) -> Section {
    titled("Parameters", sections_of(parameters))
}

pub fn conditions(conditions: &[Condition]) -> Section {
    titled("Conditions", sections_of(conditions))
}

pub fn resources(resources: Vec<Section>) -> Section {
    titled("Resources", resources)
}

pub fn outputs(outputs: &[Output]) -> Section {
    titled("Outputs", sections_of(outputs))
}

fn sections_of<T: Render + Clone + 'static>(items: &[T]) -> Vec<Section> {
    items.iter().cloned().map(IntoSection::into_section).collect()
}

/// A complete template, assembled from its optional sections
///
/// Sections render in the order description, parameters, conditions,
/// resources, outputs; absent or empty ones are left out.
#[derive(Clone, Default)]
pub struct Template {
    description: Option<String>,
    parameters: Vec<Parameter>,
    conditions: Vec<Condition>,
    resources: Vec<Section>,
    outputs: Vec<Output>,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }
}

impl Delegating for Template {
    fn delegate(&self) -> Section {
        let mut sections = Vec::new();

        if let Some(text) = &self.description {
            sections.push(description(text));
        }
        if !self.parameters.is_empty() {
            sections.push(parameters(&self.parameters));
        }
        if !self.conditions.is_empty() {
            sections.push(conditions(&self.conditions));
        }
        if !self.resources.is_empty() {
            sections.push(resources(self.resources.clone()));
        }
        if !self.outputs.is_empty() {
            sections.push(outputs(&self.outputs));
        }

        document(sections)
    }
}

#[derive(Default)]
pub struct TemplateBuilder {
    description: Option<String>,
    parameters: Vec<Parameter>,
    conditions: Vec<Condition>,
    resources: Vec<Section>,
    outputs: Vec<Output>,
}

impl TemplateBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn resource<R: Resource + 'static>(mut self, resource: R) -> Self {
        self.resources.push(resource.into_section());
        self
    }

    /// Adds an already-assembled resource section.
    pub fn resource_section(mut self, section: Section) -> Self {
        self.resources.push(section);
        self
    }

    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Fails when no section at all was supplied.
    pub fn build(self) -> Result<Template> {
        let has_content = self.description.is_some()
            || !self.parameters.is_empty()
            || !self.conditions.is_empty()
            || !self.resources.is_empty()
            || !self.outputs.is_empty();
        if !has_content {
            return Err(Error::constraint("Template", "at least one section is required"));
        }

        Ok(Template {
            description: self.description,
            parameters: self.parameters,
            conditions: self.conditions,
            resources: self.resources,
            outputs: self.outputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intrinsic::resource_equals;

    #[test]
    fn test_parameter_renders_type_and_description() {
        let parameter = Parameter::new("Stage", "String", "Deployment stage");
        assert_eq!(
            parameter.render(),
            "Stage:\n  Type: String\n  Description: Deployment stage"
        );
    }

    #[test]
    fn test_conditions_section() {
        let section = conditions(&[Condition::new("IsProd", resource_equals("Stage", "prod"))]);
        assert_eq!(
            section.render(),
            "Conditions:\n  IsProd:\n    !Equals [ !Ref Stage, prod ]"
        );
    }

    #[test]
    fn test_outputs_section() {
        let section = outputs(&[Output::new("BucketName", "Name of the bucket", "!Ref Bucket")]);
        assert_eq!(
            section.render(),
            "Outputs:\n  BucketName:\n    Description: Name of the bucket\n    Value: !Ref Bucket"
        );
    }

    #[test]
    fn test_template_skips_empty_sections() {
        let template = Template::builder()
            .description("Only a description")
            .output(Output::new("Out", "An output", "value"))
            .build()
            .unwrap();

        assert_eq!(
            template.render(),
            "Description: Only a description\n\nOutputs:\n  Out:\n    Description: An output\n    Value: value"
        );
    }

    #[test]
    fn test_empty_template_is_rejected() {
        let err = Template::builder().build().err().unwrap();
        assert!(err.to_string().contains("Template"));
    }
}
