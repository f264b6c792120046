use std::path::PathBuf;

use jsonschema::validator_for;

use crate::cmd::{CommandError, CommandResponse, load_shape};
use crate::engine::export::to_json_schema;

/// Input arguments for export command execution API.
#[derive(Debug, Clone)]
pub struct ExportCommandArgs {
    pub schema: PathBuf,
}

/// Renders the schema file as a JSON Schema document.
pub fn run(args: &ExportCommandArgs) -> CommandResponse {
    match execute(args) {
        Ok(response) => response,
        Err(error) => error.into_response("export"),
    }
}

fn execute(args: &ExportCommandArgs) -> Result<CommandResponse, CommandError> {
    let document = load_shape(&args.schema)?;
    let rendered = to_json_schema(&document);
    // The rendition must compile before it is handed to other tools.
    validator_for(&rendered).map_err(|err| {
        CommandError::Internal(format!("exported schema does not compile: {err}"))
    })?;
    Ok(CommandResponse::report(0, rendered))
}

pub fn pipeline_steps() -> Vec<String> {
    ["load_schema", "check_schema", "render_json_schema", "compile_json_schema"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}

pub fn deterministic_guards() -> Vec<String> {
    ["rust_native_execution", "field_declaration_order"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}
