pub mod export;
pub mod requests;
pub mod scripts;
pub mod validate;

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::shape::ShapeDocument;
use crate::io::{self, IoError};

/// Structured command response that carries exit-code mapping and JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

impl CommandResponse {
    pub fn report(exit_code: i32, payload: Value) -> Self {
        Self { exit_code, payload }
    }

    pub fn input_usage(message: String, details: Value) -> Self {
        Self::error("input_usage_error", message, 3, details)
    }

    pub fn internal(message: String, details: Value) -> Self {
        Self::error("internal_error", message, 1, details)
    }

    fn error(error: &str, message: String, code: i32, details: Value) -> Self {
        Self {
            exit_code: code,
            payload: json!({
                "error": error,
                "message": message,
                "code": code,
                "details": details,
            }),
        }
    }

    /// Payloads of failed runs belong on stderr.
    pub fn is_error(&self) -> bool {
        matches!(self.exit_code, 1 | 3)
    }
}

pub(crate) enum CommandError {
    InputUsage(String),
    Internal(String),
}

impl CommandError {
    pub(crate) fn into_response(self, command: &str) -> CommandResponse {
        match self {
            Self::InputUsage(message) => {
                CommandResponse::input_usage(message, json!({"command": command}))
            }
            Self::Internal(message) => {
                CommandResponse::internal(message, json!({"command": command}))
            }
        }
    }
}

pub(crate) fn map_io_as_input_usage(error: IoError) -> CommandError {
    CommandError::InputUsage(error.to_string())
}

pub(crate) fn to_payload<T: Serialize>(value: &T, what: &str) -> Result<Value, CommandError> {
    serde_json::to_value(value)
        .map_err(|err| CommandError::Internal(format!("failed to serialize {what}: {err}")))
}

/// Loads a schema document and checks its definition.
pub(crate) fn load_shape(path: &Path) -> Result<ShapeDocument, CommandError> {
    let format = io::resolve_schema_format(path).map_err(|err| {
        CommandError::InputUsage(format!(
            "unable to resolve schema format from `{}`: {err}",
            path.display()
        ))
    })?;
    let file = File::open(path).map_err(|err| {
        CommandError::InputUsage(format!(
            "failed to open schema file `{}`: {err}",
            path.display()
        ))
    })?;
    let value = io::reader::read_document(file, format).map_err(map_io_as_input_usage)?;
    let document: ShapeDocument = serde_json::from_value(value)
        .map_err(|err| CommandError::InputUsage(format!("invalid schema: {err}")))?;
    document
        .fields
        .check()
        .map_err(|err| CommandError::InputUsage(format!("invalid schema: {err}")))?;
    Ok(document)
}

pub(crate) fn open_input(path: &Path) -> Result<File, CommandError> {
    File::open(path).map_err(|err| {
        CommandError::InputUsage(format!(
            "failed to open input file `{}`: {err}",
            path.display()
        ))
    })
}
