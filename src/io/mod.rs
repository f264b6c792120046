pub mod error;
pub mod format;
pub mod reader;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use error::IoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    Jsonl,
}

impl Format {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Jsonl => "jsonl",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = IoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "jsonl" | "ndjson" => Ok(Self::Jsonl),
            other => Err(IoError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

pub fn resolve_input_format(
    explicit: Option<Format>,
    input: Option<&Path>,
) -> Result<Format, IoError> {
    resolve_format(explicit, input, "input")
}

/// Resolves a schema file format from its extension. Schemas are single
/// documents, so line-delimited JSON is refused.
pub fn resolve_schema_format(path: &Path) -> Result<Format, IoError> {
    match resolve_format(None, Some(path), "schema")? {
        Format::Jsonl => Err(IoError::UnsupportedPathExtension {
            kind: "schema",
            path: path.to_string_lossy().into_owned(),
        }),
        format => Ok(format),
    }
}

fn resolve_format(
    explicit: Option<Format>,
    path: Option<&Path>,
    kind: &'static str,
) -> Result<Format, IoError> {
    if let Some(format) = explicit {
        return Ok(format);
    }
    let Some(path) = path else {
        return Err(IoError::UnresolvedFormat { kind });
    };
    format_from_path(path).ok_or_else(|| IoError::UnsupportedPathExtension {
        kind,
        path: path.to_string_lossy().into_owned(),
    })
}

fn format_from_path(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(Format::Json),
        "yaml" | "yml" => Some(Format::Yaml),
        "jsonl" | "ndjson" => Some(Format::Jsonl),
        _ => None,
    }
}
