use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::tempdir;

fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn fixture_script_matches_sample_schema() {
    let output = assert_cmd::cargo::cargo_bin_cmd!("shapeq")
        .args([
            "scripts",
            "--script",
            fixture("fixtures/patient-list.postman.js")
                .to_str()
                .expect("utf8 path"),
            "--schema",
            fixture("schemas/patient-list.yaml")
                .to_str()
                .expect("utf8 path"),
        ])
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(0));
    let stdout: Value = serde_json::from_slice(&output.stdout).expect("stdout json");
    assert_eq!(stdout["tests"].as_array().expect("tests").len(), 3);
    assert_eq!(stdout["unmatched_keys"], json!([]));
}

#[test]
fn undeclared_key_exits_two() {
    let dir = tempdir().expect("tempdir");
    let schema = dir.path().join("shape.yaml");
    fs::write(&schema, "fields:\n  - name: id\n    type: number\n").expect("write schema");

    let output = assert_cmd::cargo::cargo_bin_cmd!("shapeq")
        .args([
            "scripts",
            "--schema",
            schema.to_str().expect("utf8 path"),
        ])
        .write_stdin("pm.test(\"t\", () => {\n  pm.expect(obj.id).to.be.a(\"number\");\n  pm.expect(obj.mc).to.be.a(\"number\");\n});\n")
        .output()
        .expect("run command");

    assert_eq!(output.status.code(), Some(2));
    let stdout: Value = serde_json::from_slice(&output.stdout).expect("stdout json");
    assert_eq!(stdout["unmatched_keys"][0]["path"], json!("mc"));
    assert_eq!(stdout["unmatched_keys"][0]["line"], json!(3));
}
