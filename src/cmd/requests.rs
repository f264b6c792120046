use std::io::Read;
use std::path::PathBuf;

use crate::cmd::{CommandError, CommandResponse, map_io_as_input_usage, open_input, to_payload};
use crate::domain::collection::RequestSummary;
use crate::engine::collection;
use crate::io::{self, Format};

/// Input arguments for requests command execution API.
#[derive(Debug, Clone)]
pub struct RequestsCommandArgs {
    pub collection: Option<PathBuf>,
    pub from: Option<Format>,
}

/// Lists the request items of a Postman collection as `{name, method, url}`.
pub fn run_with_stdin<R: Read>(args: &RequestsCommandArgs, stdin: R) -> CommandResponse {
    match execute(args, stdin) {
        Ok(response) => response,
        Err(error) => error.into_response("requests"),
    }
}

fn execute<R: Read>(
    args: &RequestsCommandArgs,
    stdin: R,
) -> Result<CommandResponse, CommandError> {
    let format = io::resolve_input_format(args.from, args.collection.as_deref())
        .map_err(map_io_as_input_usage)?;
    let document = match &args.collection {
        Some(path) => io::reader::read_document(open_input(path)?, format),
        None => io::reader::read_document(stdin, format),
    }
    .map_err(map_io_as_input_usage)?;

    let items = collection::load_requests(&document)
        .map_err(|err| CommandError::InputUsage(err.to_string()))?;
    let summaries: Vec<RequestSummary> = items.iter().map(RequestSummary::from).collect();
    Ok(CommandResponse::report(0, to_payload(&summaries, "request list")?))
}

pub fn pipeline_steps() -> Vec<String> {
    ["read_collection", "find_requests", "decode_requests"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}

pub fn deterministic_guards() -> Vec<String> {
    ["rust_native_execution", "document_order_preserved"]
        .into_iter()
        .map(ToOwned::to_owned)
        .collect()
}
