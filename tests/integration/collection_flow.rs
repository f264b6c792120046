use std::fs::File;
use std::path::Path;

use shapeq::domain::collection::{RequestSummary, Url};
use shapeq::engine::collection::load_requests;
use shapeq::io::{Format, reader};

#[test]
fn fixture_collection_lists_requests_in_document_order() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/clinic.postman_collection.json");
    let document =
        reader::read_document(File::open(path).expect("open fixture"), Format::Json).expect("read");

    let items = load_requests(&document).expect("requests");
    let summaries: Vec<RequestSummary> = items.iter().map(RequestSummary::from).collect();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "list encounters");
    assert_eq!(summaries[0].method, "GET");
    assert_eq!(
        summaries[0].url.as_deref(),
        Some("{{baseUrl}}/encounters?mc=:mc")
    );
    assert_eq!(summaries[1].name, "create patient");
    assert_eq!(summaries[1].method, "POST");

    assert!(matches!(items[1].request.url, Some(Url::Raw(_))));
    let body = items[1].request.body.as_ref().expect("body");
    assert_eq!(body.raw.as_deref(), Some(r#"{"firstName":"Ann"}"#));
}
