//! Helpers that pre-format CloudFormation intrinsic function expressions.
//!
//! The results are plain strings meant to be passed as values to
//! [`single_line`] or [`plain`]; nothing downstream inspects them.

use crate::section::*;

/// Value that removes a property when used inside a condition
pub const NO_VALUE: &str = "Ref: \"AWS::NoValue\"";

/// `!Ref` to another resource or parameter.
pub fn referencing(resource_id: &str) -> String {
    format!("!Ref {}", resource_id)
}

/// `Fn::If` choosing between two values on a named condition.
///
/// The expression starts with a line break so it can follow a `Key:` line.
pub fn conditional_value(condition_id: &str, value_if_true: &str, value_if_false: &str) -> String {
    let expression = titled(
        "Fn::If",
        vec![list_of(plain_strings([condition_id, value_if_true, value_if_false]))],
    );
    format!("\n{}", indent(&expression.render()))
}

/// `Fn::Join` of `parts` with `delimiter`.
///
/// The expression starts with a line break so it can follow a `Key:` line.
pub fn joining<I, S>(delimiter: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    format!("\n{}", indent(&join_expression(delimiter, parts).render()))
}

/// The `Fn::Join:` block itself, for use as the body of a titled section.
pub fn join_expression<I, S>(delimiter: &str, parts: I) -> Section
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    titled(
        "Fn::Join",
        vec![list_of([
            plain(format!("\"{}\"", delimiter)),
            list_of(plain_strings(parts)),
        ])],
    )
}

/// `!Equals` comparing a referenced resource with a value.
pub fn resource_equals(resource_id: &str, value: &str) -> String {
    format!("!Equals [ {}, {} ]", referencing(resource_id), value)
}

/// `Fn::GetAtt` for the Arn of a resource.
pub fn get_att_arn(resource_id: &str) -> String {
    single_line("Fn::GetAtt", format!("[{}, Arn]", resource_id)).render()
}

/// `!GetAtt` for an arbitrary attribute of a resource.
pub fn get_att_attribute(resource_id: &str, attribute: &str) -> String {
    plain(format!("!GetAtt {}.{}", resource_id, attribute)).render()
}
