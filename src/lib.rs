//! # cftemplate
//!
//! Composes CloudFormation templates out of small renderers and writes them
//! as indented YAML.
//!
//! Every piece of a template implements [`Render`]. Trees are built from a
//! handful of primitives ([`PlainText`], [`KeyValueLine`], [`Aggregate`],
//! [`TitledBlock`], [`ListItem`], [`Delegate`]) through the factory functions
//! in [`section`], and value objects expose themselves through
//! [`Delegating`].
//!
//! ```
//! use cftemplate::{list_of, single_line, titled, Render};
//!
//! let resources = titled(
//!     "Resources",
//!     vec![list_of([titled(
//!         "MyBucket",
//!         vec![
//!             single_line("Type", "AWS::Example::Bucket"),
//!             titled("Properties", vec![single_line("BucketName", "my-bucket")]),
//!         ],
//!     )])],
//! );
//!
//! assert_eq!(
//!     resources.render(),
//!     "Resources:\n  - MyBucket:\n      Type: AWS::Example::Bucket\n      Properties:\n        BucketName: my-bucket"
//! );
//! ```

pub mod error;
pub mod generator;
pub mod intrinsic;
pub mod resources;
pub mod section;
pub mod stack;
pub mod template;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use generator::*;
pub use section::*;
pub use template::{Condition, Output, Parameter, Template, TemplateBuilder};
