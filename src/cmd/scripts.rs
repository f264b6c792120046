use std::io::Read;
use std::path::PathBuf;

use crate::cmd::{CommandError, CommandResponse, load_shape, open_input, to_payload};
use crate::domain::script::ScriptReport;
use crate::engine::script;

/// Input arguments for scripts command execution API.
#[derive(Debug, Clone)]
pub struct ScriptsCommandArgs {
    pub script: Option<PathBuf>,
    pub schema: Option<PathBuf>,
}

/// Lists the `pm.test` blocks and `pm.expect` keys of a Postman test script.
///
/// With a schema, expectation keys are also looked up as field paths; any
/// key the schema does not declare yields exit code 2.
pub fn run_with_stdin<R: Read>(args: &ScriptsCommandArgs, stdin: R) -> CommandResponse {
    match execute(args, stdin) {
        Ok(response) => response,
        Err(error) => error.into_response("scripts"),
    }
}

fn execute<R: Read>(
    args: &ScriptsCommandArgs,
    mut stdin: R,
) -> Result<CommandResponse, CommandError> {
    let shape = args.schema.as_deref().map(load_shape).transpose()?;

    let mut source = String::new();
    let read = match &args.script {
        Some(path) => open_input(path)?.read_to_string(&mut source),
        None => stdin.read_to_string(&mut source),
    };
    read.map_err(|err| CommandError::InputUsage(format!("failed to read script: {err}")))?;

    let parsed = script::parse_script(&source)
        .map_err(|err| CommandError::Internal(err.to_string()))?;
    let unmatched_keys = shape
        .as_ref()
        .map(|document| script::unmatched_keys(&parsed, &document.fields));
    let exit_code = match &unmatched_keys {
        Some(keys) if !keys.is_empty() => 2,
        _ => 0,
    };
    let report = ScriptReport {
        script: parsed,
        unmatched_keys,
    };
    Ok(CommandResponse::report(
        exit_code,
        to_payload(&report, "script report")?,
    ))
}

pub fn pipeline_steps() -> Vec<String> {
    ["read_script", "scan_tests", "match_schema_paths"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}

pub fn deterministic_guards() -> Vec<String> {
    ["rust_native_execution", "source_line_order"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}
