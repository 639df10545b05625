//! Static expression evaluation
//!
//! Expressions are evaluated without any variables or functions in scope,
//! so only literal values (and operations over them) resolve.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use hcl::eval::{Context, Errors, Evaluate};
use hcl::{Attribute, Value};

/// Evaluate `attr` and convert the result to a string.
///
/// Numbers and bools convert to their text form. Anything else is recorded
/// in `diags` and yields `None`.
pub fn decode_string(attr: &Attribute, diags: &mut Diagnostics) -> Option<String> {
    let ctx = Context::new();
    let name = attr.key();

    let value = match attr.expr().evaluate(&ctx) {
        Ok(value) => value,
        Err(errors) => {
            for error in &Errors::from(errors) {
                diags.error(DiagnosticKind::Evaluation {
                    name: name.to_string(),
                    message: error.to_string(),
                });
            }
            return None;
        }
    };

    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => {
            diags.error(DiagnosticKind::NullValue { name: name.to_string() });
            None
        }
        other => {
            diags.error(DiagnosticKind::TypeMismatch {
                name: name.to_string(),
                found: type_name(&other).to_string(),
            });
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attribute(source: &str) -> Attribute {
        let body = hcl::parse(source).unwrap();
        body.attributes().next().unwrap().clone()
    }

    #[test]
    fn test_string_literal() {
        let mut diags = Diagnostics::new();
        let value = decode_string(&attribute("bucket = \"my-bucket\""), &mut diags);
        assert_eq!(value.as_deref(), Some("my-bucket"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_number_and_bool_convert() {
        let mut diags = Diagnostics::new();
        assert_eq!(decode_string(&attribute("key = 42"), &mut diags).as_deref(), Some("42"));
        assert_eq!(decode_string(&attribute("key = true"), &mut diags).as_deref(), Some("true"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_static_operations_resolve() {
        let mut diags = Diagnostics::new();
        let value = decode_string(&attribute("key = true ? \"state/prod\" : \"other\""), &mut diags);
        assert_eq!(value.as_deref(), Some("state/prod"));
        assert!(diags.is_empty());
    }

    #[test]
    fn test_list_is_type_mismatch() {
        let mut diags = Diagnostics::new();
        let value = decode_string(&attribute("region = [\"a\", \"b\"]"), &mut diags);
        assert!(value.is_none());
        assert!(matches!(
            diags.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::TypeMismatch { name, found }) if name == "region" && found == "list"
        ));
    }

    #[test]
    fn test_null_rejected() {
        let mut diags = Diagnostics::new();
        assert!(decode_string(&attribute("path = null"), &mut diags).is_none());
        assert!(matches!(
            diags.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::NullValue { name }) if name == "path"
        ));
    }

    #[test]
    fn test_variable_reference_not_resolved() {
        let mut diags = Diagnostics::new();
        let value = decode_string(&attribute("bucket = var.bucket"), &mut diags);
        assert!(value.is_none());
        assert!(diags.has_errors());
        assert!(diags
            .iter()
            .all(|d| matches!(&d.kind, DiagnosticKind::Evaluation { name, .. } if name == "bucket")));
    }
}
