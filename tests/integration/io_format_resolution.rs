use std::path::Path;

use shapeq::io::{Format, IoError, resolve_input_format, resolve_schema_format};

#[test]
fn explicit_format_takes_priority() {
    let input =
        resolve_input_format(Some(Format::Jsonl), Some(Path::new("in.json"))).expect("input");
    assert_eq!(input, Format::Jsonl);
}

#[test]
fn extension_fallback_works() {
    assert_eq!(
        resolve_input_format(None, Some(Path::new("in.ndjson"))).expect("input"),
        Format::Jsonl
    );
    assert_eq!(
        resolve_schema_format(Path::new("shape.YML")).expect("schema"),
        Format::Yaml
    );
}

#[test]
fn schema_refuses_line_delimited_files() {
    let err = resolve_schema_format(Path::new("shape.jsonl")).expect_err("must fail");
    match err {
        IoError::UnsupportedPathExtension { kind, .. } => assert_eq!(kind, "schema"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_path_and_explicit_format_is_error() {
    let err = resolve_input_format(None, None).expect_err("must fail");
    match err {
        IoError::UnresolvedFormat { kind } => assert_eq!(kind, "input"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn format_names_parse_case_insensitively() {
    assert_eq!("YAML".parse::<Format>().expect("yaml"), Format::Yaml);
    assert!("csv".parse::<Format>().is_err());
}
