use serde_json::{Map, Value, json};

use crate::domain::shape::{FieldSpec, Schema, ShapeDocument};

pub const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Renders a shape document as a JSON Schema for the whole response body:
/// an array whose items follow the declared object shape.
///
/// Extra keys stay allowed, and `properties`/`required` only constrain
/// object instances, so number-or-object unions keep their meaning.
pub fn to_json_schema(document: &ShapeDocument) -> Value {
    let mut root = Map::new();
    root.insert("$schema".to_string(), json!(JSON_SCHEMA_DIALECT));
    if let Some(name) = &document.name {
        root.insert("title".to_string(), json!(name));
    }
    root.insert("type".to_string(), json!("array"));
    root.insert("items".to_string(), object_schema(&document.fields));
    Value::Object(root)
}

fn object_schema(schema: &Schema) -> Value {
    let mut out = Map::new();
    out.insert("type".to_string(), json!("object"));
    insert_shape(&mut out, schema);
    Value::Object(out)
}

fn insert_shape(out: &mut Map<String, Value>, schema: &Schema) {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for field in schema.fields() {
        properties.insert(field.name.clone(), field_schema(field));
        if !field.optional {
            required.push(json!(field.name));
        }
    }
    out.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        out.insert("required".to_string(), Value::Array(required));
    }
}

fn field_schema(field: &FieldSpec) -> Value {
    let mut types: Vec<Value> = field
        .kinds
        .kinds()
        .iter()
        .map(|kind| json!(kind.as_str()))
        .collect();
    if field.nullable {
        types.push(json!("null"));
    }

    let mut out = Map::new();
    let type_value = match types.len() {
        1 => types.remove(0),
        _ => Value::Array(types),
    };
    out.insert("type".to_string(), type_value);
    if let Some(nested) = &field.fields {
        insert_shape(&mut out, nested);
    }
    Value::Object(out)
}
