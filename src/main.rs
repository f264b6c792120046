use std::io;
use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::{Value, json};
use shapeq::cmd::{CommandResponse, export, requests, scripts, validate};
use shapeq::domain::report::{PipelineInput, PipelineInputSource, PipelineReport};
use shapeq::io::{self as shapeq_io, Format};

#[derive(Debug, Parser)]
#[command(
    name = "shapeq",
    version,
    about = "Response shape assertions for JSON APIs"
)]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    emit_pipeline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a response body against a shape schema.
    Validate(ValidateArgs),
    /// List the request items of a Postman collection.
    Requests(RequestsArgs),
    /// List the tests and expectation keys of a Postman test script.
    Scripts(ScriptsArgs),
    /// Render a shape schema as JSON Schema.
    Export(ExportArgs),
}

#[derive(Debug, clap::Args)]
struct ValidateArgs {
    #[arg(long)]
    schema: PathBuf,

    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, value_enum)]
    from: Option<CliInputFormat>,
}

#[derive(Debug, clap::Args)]
struct RequestsArgs {
    #[arg(long)]
    collection: Option<PathBuf>,

    #[arg(long, value_enum)]
    from: Option<CliInputFormat>,
}

#[derive(Debug, clap::Args)]
struct ScriptsArgs {
    #[arg(long)]
    script: Option<PathBuf>,

    #[arg(long)]
    schema: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
struct ExportArgs {
    #[arg(long)]
    schema: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliInputFormat {
    Json,
    Yaml,
    Jsonl,
}

impl From<CliInputFormat> for Format {
    fn from(value: CliInputFormat) -> Self {
        match value {
            CliInputFormat::Json => Self::Json,
            CliInputFormat::Yaml => Self::Yaml,
            CliInputFormat::Jsonl => Self::Jsonl,
        }
    }
}

#[derive(Serialize)]
struct CliError<'a> {
    error: &'a str,
    message: String,
    code: i32,
    details: Value,
}

fn main() {
    process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return handle_parse_error(error),
    };

    let emit_pipeline = cli.emit_pipeline;
    match cli.command {
        Commands::Validate(args) => run_validate(args, emit_pipeline),
        Commands::Requests(args) => run_requests(args, emit_pipeline),
        Commands::Scripts(args) => run_scripts(args, emit_pipeline),
        Commands::Export(args) => run_export(args, emit_pipeline),
    }
}

fn handle_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            print!("{error}");
            0
        }
        _ => {
            emit_error(
                "input_usage_error",
                error.to_string(),
                json!({"kind": "cli_parse_error"}),
                3,
            );
            3
        }
    }
}

fn run_validate(args: ValidateArgs, emit_pipeline: bool) -> i32 {
    let explicit = args.from.map(Format::from);
    let command_args = validate::ValidateCommandArgs {
        input: args.input.clone(),
        from: explicit.or(if args.input.is_some() {
            None
        } else {
            Some(Format::Json)
        }),
        schema: args.schema.clone(),
    };

    let stdin = io::stdin();
    let response = validate::run_with_stdin(&command_args, stdin.lock());
    let exit_code = emit_response("validate", &response);

    if emit_pipeline {
        let input_format =
            shapeq_io::resolve_input_format(command_args.from, command_args.input.as_deref()).ok();
        let schema_format = shapeq_io::resolve_schema_format(&args.schema).ok();
        let sources = vec![
            PipelineInputSource::path(
                "schema",
                args.schema.display().to_string(),
                format_label(schema_format),
            ),
            input_source("input", args.input.as_ref(), input_format),
        ];
        emit_pipeline_report(&PipelineReport::new(
            "validate",
            PipelineInput::new(sources),
            validate::pipeline_steps(),
            validate::deterministic_guards(),
        ));
    }
    exit_code
}

fn run_requests(args: RequestsArgs, emit_pipeline: bool) -> i32 {
    let explicit = args.from.map(Format::from);
    let command_args = requests::RequestsCommandArgs {
        collection: args.collection.clone(),
        from: explicit.or(if args.collection.is_some() {
            None
        } else {
            Some(Format::Json)
        }),
    };

    let stdin = io::stdin();
    let response = requests::run_with_stdin(&command_args, stdin.lock());
    let exit_code = emit_response("requests", &response);

    if emit_pipeline {
        let format = shapeq_io::resolve_input_format(
            command_args.from,
            command_args.collection.as_deref(),
        )
        .ok();
        emit_pipeline_report(&PipelineReport::new(
            "requests",
            PipelineInput::new(vec![input_source(
                "collection",
                args.collection.as_ref(),
                format,
            )]),
            requests::pipeline_steps(),
            requests::deterministic_guards(),
        ));
    }
    exit_code
}

fn run_scripts(args: ScriptsArgs, emit_pipeline: bool) -> i32 {
    let command_args = scripts::ScriptsCommandArgs {
        script: args.script.clone(),
        schema: args.schema.clone(),
    };

    let stdin = io::stdin();
    let response = scripts::run_with_stdin(&command_args, stdin.lock());
    let exit_code = emit_response("scripts", &response);

    if emit_pipeline {
        let mut sources = vec![input_source("script", args.script.as_ref(), None)];
        if let Some(schema) = &args.schema {
            sources.push(PipelineInputSource::path(
                "schema",
                schema.display().to_string(),
                format_label(shapeq_io::resolve_schema_format(schema).ok()),
            ));
        }
        emit_pipeline_report(&PipelineReport::new(
            "scripts",
            PipelineInput::new(sources),
            scripts::pipeline_steps(),
            scripts::deterministic_guards(),
        ));
    }
    exit_code
}

fn run_export(args: ExportArgs, emit_pipeline: bool) -> i32 {
    let command_args = export::ExportCommandArgs {
        schema: args.schema.clone(),
    };
    let response = export::run(&command_args);
    let exit_code = emit_response("export", &response);

    if emit_pipeline {
        let schema_format = shapeq_io::resolve_schema_format(&args.schema).ok();
        emit_pipeline_report(&PipelineReport::new(
            "export",
            PipelineInput::new(vec![PipelineInputSource::path(
                "schema",
                args.schema.display().to_string(),
                format_label(schema_format),
            )]),
            export::pipeline_steps(),
            export::deterministic_guards(),
        ));
    }
    exit_code
}

fn input_source(
    label: &str,
    path: Option<&PathBuf>,
    format: Option<Format>,
) -> PipelineInputSource {
    match path {
        Some(path) => {
            PipelineInputSource::path(label, path.display().to_string(), format_label(format))
        }
        None => PipelineInputSource::stdin(label, format_label(format)),
    }
}

fn format_label(format: Option<Format>) -> Option<&'static str> {
    format.map(Format::as_str)
}

/// Writes the payload to stdout (success, violations) or stderr (errors) and
/// returns the exit code to use.
fn emit_response(command: &str, response: &CommandResponse) -> i32 {
    let written = if response.is_error() {
        emit_json_stderr(&response.payload)
    } else {
        emit_json_stdout(&response.payload)
    };
    if written {
        response.exit_code
    } else {
        emit_error(
            "internal_error",
            format!("failed to serialize {command} response"),
            json!({"command": command}),
            1,
        );
        1
    }
}

fn emit_json_stdout(value: &Value) -> bool {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            println!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_json_stderr(value: &Value) -> bool {
    match serde_json::to_string(value) {
        Ok(serialized) => {
            eprintln!("{serialized}");
            true
        }
        Err(_) => false,
    }
}

fn emit_pipeline_report(report: &PipelineReport) {
    match serde_json::to_string(report) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(error) => emit_error(
            "internal_error",
            format!("failed to serialize pipeline report: {error}"),
            json!({"command": "emit_pipeline"}),
            1,
        ),
    }
}

fn emit_error(error: &'static str, message: String, details: Value, code: i32) {
    let payload = CliError {
        error,
        message,
        code,
        details,
    };
    match serde_json::to_string(&payload) {
        Ok(serialized) => eprintln!("{serialized}"),
        Err(_) => eprintln!(
            "{{\"error\":\"internal_error\",\"message\":\"failed to serialize error\",\"code\":1}}"
        ),
    }
}
