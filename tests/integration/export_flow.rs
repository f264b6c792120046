use std::fs::File;
use std::path::Path;

use jsonschema::validator_for;
use serde_json::json;
use shapeq::domain::shape::ShapeDocument;
use shapeq::engine::export::to_json_schema;
use shapeq::engine::shape::execute_validate;
use shapeq::io::{Format, reader};

#[test]
fn exported_sample_schema_matches_validator_verdicts() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/patient-list.yaml");
    let value = reader::read_document(File::open(path).expect("open"), Format::Yaml).expect("read");
    let document: ShapeDocument = serde_json::from_value(value).expect("decode");

    let rendered = to_json_schema(&document);
    let validator = validator_for(&rendered).expect("compile");

    let samples = [
        json!([{"id":1,"mc":null,"patient":{"id":2,"mc":5,"title":3,"firstName":"Ann"},"type":"X"}]),
        json!([{"id":"bad","mc":null,"patient":null,"type":null}]),
        json!([{"id":1,"mc":null,"patient":{"id":2,"mc":null,"title":{"id":1,"mc":"x"},"firstName":null},"type":null}]),
        json!([{"id":1,"mc":null,"patient":{"id":2,"mc":null,"title":42,"firstName":null},"type":null}]),
        json!([{"id":1,"mc":null,"type":null}]),
        json!([]),
    ];
    for sample in samples {
        assert_eq!(
            validator.is_valid(&sample),
            execute_validate(&sample, &document.fields).conformant,
            "disagreement on {sample}"
        );
    }
}
