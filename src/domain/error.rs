use thiserror::Error;

/// Problems in a schema definition, found before any input is validated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A field was declared with an empty name.
    #[error("field name must not be empty (in `{parent}`)")]
    EmptyFieldName { parent: String },

    /// Two fields on the same level share a name.
    #[error("duplicate field `{path}`")]
    DuplicateField { path: String },

    /// Nested fields were declared on a field that can never be an object.
    #[error("field `{path}` declares nested fields but its type does not include object")]
    NestedWithoutObject { path: String },
}

/// Errors produced while decoding a Postman collection.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// A request item was found but its `request` member could not be decoded.
    #[error("invalid request in item `{name}` (#{index}): {source}")]
    InvalidRequest {
        index: usize,
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors produced while scanning a test script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// A built-in scan pattern failed to compile.
    #[error("invalid script pattern: {0}")]
    Pattern(#[from] regex::Error),
}
