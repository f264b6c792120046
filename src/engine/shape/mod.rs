pub mod validator;

use serde_json::Value;

use crate::domain::report::ValidationResult;
use crate::domain::shape::Schema;

pub use validator::{validate, validate_items};

/// Validates a decoded response body against a checked schema.
pub fn execute_validate(root: &Value, schema: &Schema) -> ValidationResult {
    validate(root, schema)
}
