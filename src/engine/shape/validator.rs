use serde_json::Value;

use crate::domain::report::{ValidationResult, Violation, ViolationReason};
use crate::domain::shape::{FieldSpec, Schema, join_path};

/// Validates every element of `root` against `schema`.
///
/// `root` is expected to be an array; anything else yields a single
/// `not_array` violation. Violations are reported in element order, then in
/// field declaration order, with nested fields at their parent's position.
pub fn validate(root: &Value, schema: &Schema) -> ValidationResult {
    match root {
        Value::Array(items) => validate_items(items, schema),
        other => ValidationResult::from_violations(vec![Violation {
            index: None,
            path: "$".to_string(),
            reason: ViolationReason::NotArray,
            actual: json_type_name(other).to_string(),
            message: "response body must be an array".to_string(),
        }]),
    }
}

/// Validates an already split element list.
pub fn validate_items(items: &[Value], schema: &Schema) -> ValidationResult {
    let mut violations = Vec::new();
    for (index, item) in items.iter().enumerate() {
        validate_object(item, schema, "", index, &mut violations);
    }
    ValidationResult::from_violations(violations)
}

fn validate_object(
    value: &Value,
    schema: &Schema,
    prefix: &str,
    index: usize,
    violations: &mut Vec<Violation>,
) {
    // Non-object elements have no keys; every required field is missing.
    let map = value.as_object();
    for field in schema.fields() {
        let path = join_path(prefix, &field.name);
        let actual = map.and_then(|map| map.get(&field.name));
        if let Some(violation) = check_field(field, actual, &path, index) {
            violations.push(violation);
            continue;
        }
        if let Some(actual) = actual
            && let Some(nested) = field.nested_for(actual)
        {
            validate_object(actual, nested, &path, index, violations);
        }
    }
}

fn check_field(
    field: &FieldSpec,
    actual: Option<&Value>,
    path: &str,
    index: usize,
) -> Option<Violation> {
    let violation = |reason, actual: &str, message: String| Violation {
        index: Some(index),
        path: path.to_string(),
        reason,
        actual: actual.to_string(),
        message,
    };

    match actual {
        None if field.optional => None,
        None => Some(violation(
            ViolationReason::Missing,
            "missing",
            format!("{path} is missing"),
        )),
        Some(Value::Null) if field.nullable => None,
        Some(Value::Null) => Some(violation(
            ViolationReason::NullNotAllowed,
            "null",
            format!("{path} must not be null"),
        )),
        Some(value) if field.kinds.matches(value) => None,
        Some(value) => {
            let mut expected = field.kinds.describe();
            if field.nullable {
                expected.push_str(" or null");
            }
            Some(violation(
                ViolationReason::KindMismatch,
                json_type_name(value),
                format!("{path} must be {expected}"),
            ))
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
