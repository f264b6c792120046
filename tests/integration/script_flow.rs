use std::fs::{self, File};
use std::path::Path;

use shapeq::domain::shape::ShapeDocument;
use shapeq::engine::script::{parse_script, unmatched_keys};
use shapeq::io::{Format, reader};

fn fixture(relative: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn postman_fixture_groups_assertions_by_test() {
    let source = fs::read_to_string(fixture("fixtures/patient-list.postman.js")).expect("read");

    let parsed = parse_script(&source).expect("parse");
    assert_eq!(parsed.tests.len(), 3);
    assert_eq!(parsed.tests[1].description, "obj.patient is an object");
    let title_keys: Vec<&str> = parsed.tests[2]
        .assertions
        .iter()
        .map(|assertion| assertion.key.as_str())
        .collect();
    assert_eq!(
        title_keys,
        vec![
            "obj.patient.title",
            "obj.patient.title.id",
            "obj.patient.title.mc"
        ]
    );
    assert_eq!(
        parsed.tests[2].assertions[0].predicates,
        vec!["nullOrObject", "nullOrNumber"]
    );
}

#[test]
fn postman_fixture_keys_are_declared_by_sample_schema() {
    let source = fs::read_to_string(fixture("fixtures/patient-list.postman.js")).expect("read");
    let file = File::open(fixture("schemas/patient-list.yaml")).expect("open schema");
    let value = reader::read_document(file, Format::Yaml).expect("read schema");
    let document: ShapeDocument = serde_json::from_value(value).expect("decode schema");

    let parsed = parse_script(&source).expect("parse");
    assert!(unmatched_keys(&parsed, &document.fields).is_empty());
}
