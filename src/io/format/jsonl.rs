use std::io::{BufRead, BufReader, Read};

use serde_json::Value;

use crate::io::IoError;

/// Reads one value per non-blank line.
pub fn read_jsonl<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut values = Vec::new();
    let reader = BufReader::new(reader);
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: Value = serde_json::from_str(trimmed)?;
        values.push(value);
    }
    Ok(values)
}
