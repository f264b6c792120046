use std::fs::File;
use std::path::Path;

use serde_json::{Value, json};
use shapeq::domain::report::ViolationReason;
use shapeq::domain::shape::ShapeDocument;
use shapeq::engine::shape::execute_validate;
use shapeq::io::{Format, reader};

fn patient_list() -> ShapeDocument {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("schemas/patient-list.yaml");
    let file = File::open(path).expect("open sample schema");
    let value = reader::read_document(file, Format::Yaml).expect("read sample schema");
    let document: ShapeDocument = serde_json::from_value(value).expect("decode sample schema");
    document.fields.check().expect("sample schema is well formed");
    document
}

fn item(id: Value, mc: Value, patient: Value, kind: Value) -> Value {
    json!({"id": id, "mc": mc, "patient": patient, "type": kind})
}

#[test]
fn sample_schema_accepts_expanded_item() {
    let document = patient_list();
    let root = json!([{
        "id": 1,
        "mc": null,
        "patient": {"id": 2, "mc": 5, "title": 3, "firstName": "Ann"},
        "type": "X"
    }]);

    let result = execute_validate(&root, &document.fields);
    assert!(result.conformant);
    assert_eq!(
        serde_json::to_value(&result).expect("serialize"),
        json!({"conformant": true, "violation_count": 0, "violations": []})
    );
}

#[test]
fn sample_schema_reports_bad_id_only() {
    let document = patient_list();
    let root = json!([item(json!("bad"), json!(null), json!(null), json!(null))]);

    let result = execute_validate(&root, &document.fields);
    assert_eq!(
        serde_json::to_string(&result).expect("serialize"),
        r#"{"conformant":false,"violation_count":1,"violations":[{"index":0,"path":"id","reason":"kind_mismatch","actual":"string","message":"id must be a number"}]}"#
    );
}

#[test]
fn nullable_fields_accept_null_and_primary_kind() {
    let document = patient_list();
    let root = json!([
        item(json!(1), json!(null), json!(null), json!(null)),
        item(json!(2), json!(4), json!(7), json!("visit")),
    ]);

    assert!(execute_validate(&root, &document.fields).conformant);

    let wrong = json!([item(json!(3), json!(true), json!(null), json!(false))]);
    let result = execute_validate(&wrong, &document.fields);
    assert_eq!(result.violation_count, 2);
    assert!(
        result
            .violations
            .iter()
            .all(|violation| violation.reason == ViolationReason::KindMismatch)
    );
}

#[test]
fn title_as_number_is_not_descended_into() {
    let document = patient_list();
    let root = json!([item(
        json!(1),
        json!(null),
        json!({"id": 2, "mc": null, "title": 42, "firstName": null}),
        json!(null)
    )]);

    let result = execute_validate(&root, &document.fields);
    assert!(
        result
            .violations
            .iter()
            .all(|violation| !violation.path.starts_with("patient.title."))
    );
    assert!(result.conformant);
}

#[test]
fn title_as_object_is_descended_into() {
    let document = patient_list();
    let root = json!([item(
        json!(1),
        json!(null),
        json!({"id": 2, "mc": null, "title": {"id": "t", "mc": null}, "firstName": null}),
        json!(null)
    )]);

    let result = execute_validate(&root, &document.fields);
    assert_eq!(result.messages(), vec!["patient.title.id must be a number"]);
}

#[test]
fn repeated_validation_yields_identical_reports() {
    let document = patient_list();
    let root = json!([
        item(json!("a"), json!([]), json!({"id": null}), json!(1)),
        json!("not an object"),
    ]);

    let first = serde_json::to_string(&execute_validate(&root, &document.fields)).expect("first");
    let second = serde_json::to_string(&execute_validate(&root, &document.fields)).expect("second");
    assert_eq!(first, second);
}
