use serde_json::{Value, json};

use crate::domain::collection::{Request, RequestItem};
use crate::domain::error::CollectionError;

/// Finds request items (objects carrying a `request` member) in document order.
///
/// A request item is returned as-is and not searched further; other objects
/// are searched through their values, arrays through their elements.
pub fn find_requests(document: &Value) -> Vec<&Value> {
    let mut found = Vec::new();
    collect_requests(document, &mut found);
    found
}

fn collect_requests<'a>(value: &'a Value, found: &mut Vec<&'a Value>) {
    match value {
        Value::Object(map) if map.contains_key("request") => found.push(value),
        Value::Object(map) => {
            for inner in map.values() {
                collect_requests(inner, found);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_requests(item, found);
            }
        }
        _ => {}
    }
}

/// Decodes every request item in `document`.
pub fn load_requests(document: &Value) -> Result<Vec<RequestItem>, CollectionError> {
    find_requests(document)
        .into_iter()
        .enumerate()
        .map(|(index, item)| decode_item(index, item))
        .collect()
}

fn decode_item(index: usize, item: &Value) -> Result<RequestItem, CollectionError> {
    let name = item
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let raw_request = item.get("request").cloned().unwrap_or(Value::Null);
    let request = match raw_request {
        // Postman allows `"request": "<url>"` as a shorthand for a GET.
        Value::String(url) => serde_json::from_value::<Request>(json!({ "url": url })),
        other => serde_json::from_value::<Request>(other),
    }
    .map_err(|source| CollectionError::InvalidRequest {
        index,
        name: name.clone(),
        source,
    })?;
    Ok(RequestItem { name, request })
}
