use std::path::Path;

use predicates::prelude::predicate;
use serde_json::{Value, json};

#[test]
fn exports_sample_schema_as_json_schema() {
    let schema = Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/patient-list.yaml");

    let output = assert_cmd::cargo::cargo_bin_cmd!("shapeq")
        .args(["export", "--schema", schema.to_str().expect("utf8 path")])
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(0));
    let stdout: Value = serde_json::from_slice(&output.stdout).expect("stdout json");
    assert_eq!(stdout["title"], json!("patient-list"));
    assert_eq!(
        stdout["items"]["properties"]["patient"]["properties"]["title"]["type"],
        json!(["number", "object", "null"])
    );
    assert_eq!(
        stdout["items"]["required"],
        json!(["id", "mc", "patient", "type"])
    );
}

#[test]
fn export_rejects_jsonl_schema_path() {
    assert_cmd::cargo::cargo_bin_cmd!("shapeq")
        .args(["export", "--schema", "shape.jsonl"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unable to resolve schema format"));
}
