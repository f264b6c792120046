use std::io::Read;

use serde_json::Value;

use crate::io::format::{json, jsonl, yaml};
use crate::io::{Format, IoError};

/// Reads a whole document as one value.
///
/// Line-delimited input has no single top-level value, so its lines are
/// collected into an array. A response body delivered as jsonl therefore
/// validates the same way as the equivalent JSON array.
pub fn read_document<R: Read>(reader: R, format: Format) -> Result<Value, IoError> {
    match format {
        Format::Json => json::read_json(reader),
        Format::Yaml => yaml::read_yaml(reader),
        Format::Jsonl => jsonl::read_jsonl(reader).map(Value::Array),
    }
}
