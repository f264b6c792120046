use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;

use crate::cmd::{
    CommandError, CommandResponse, load_shape, map_io_as_input_usage, open_input, to_payload,
};
use crate::domain::report::ValidationResult;
use crate::engine::shape;
use crate::io::{self, Format};

/// Input arguments for validate command execution API.
#[derive(Debug, Clone)]
pub struct ValidateCommandArgs {
    pub input: Option<PathBuf>,
    pub from: Option<Format>,
    pub schema: PathBuf,
}

/// Runs `validate`, reading the response body from `stdin` when no input
/// path is given. Exit code 0 means conformant, 2 means violations were found.
pub fn run_with_stdin<R: Read>(args: &ValidateCommandArgs, stdin: R) -> CommandResponse {
    match execute(args, stdin) {
        Ok(result) => report_response(&result),
        Err(error) => error.into_response("validate"),
    }
}

fn report_response(result: &ValidationResult) -> CommandResponse {
    let exit_code = if result.conformant { 0 } else { 2 };
    match to_payload(result, "validation result") {
        Ok(payload) => CommandResponse::report(exit_code, payload),
        Err(error) => error.into_response("validate"),
    }
}

fn execute<R: Read>(
    args: &ValidateCommandArgs,
    stdin: R,
) -> Result<ValidationResult, CommandError> {
    let document = load_shape(&args.schema)?;
    let input_format = io::resolve_input_format(args.from, args.input.as_deref())
        .map_err(map_io_as_input_usage)?;
    let root = load_input_document(args, stdin, input_format)?;
    Ok(shape::execute_validate(&root, &document.fields))
}

fn load_input_document<R: Read>(
    args: &ValidateCommandArgs,
    stdin: R,
    format: Format,
) -> Result<Value, CommandError> {
    if let Some(path) = &args.input {
        let file = open_input(path)?;
        io::reader::read_document(file, format).map_err(map_io_as_input_usage)
    } else {
        io::reader::read_document(stdin, format).map_err(map_io_as_input_usage)
    }
}

pub fn pipeline_steps() -> Vec<String> {
    ["load_schema", "check_schema", "read_input", "validate_shape"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}

pub fn deterministic_guards() -> Vec<String> {
    [
        "rust_native_execution",
        "element_order_preserved",
        "field_declaration_order",
    ]
    .into_iter()
    .map(ToOwned::to_owned)
    .collect()
}
