use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::SchemaError;

/// Runtime kind a field may take. `null` is expressed through
/// [`FieldSpec::nullable`] instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Number,
    Integer,
    String,
    Boolean,
    Object,
    Array,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    /// Name with its indefinite article, as used in violation messages.
    pub fn with_article(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::Integer => "an integer",
            Self::String => "a string",
            Self::Boolean => "a boolean",
            Self::Object => "an object",
            Self::Array => "an array",
        }
    }

    pub fn matches(self, value: &Value) -> bool {
        match self {
            Self::Number => value.is_number(),
            Self::Integer => value.as_i64().is_some() || value.as_u64().is_some(),
            Self::String => value.is_string(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// Non-empty, duplicate-free union of kinds in declaration order.
///
/// Written in schema files either as a single kind (`type: number`) or as a
/// list (`type: [number, object]`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "KindSetRepr", into = "KindSetRepr")]
pub struct KindSet(Vec<Kind>);

impl KindSet {
    pub fn new(kinds: impl IntoIterator<Item = Kind>) -> Result<Self, String> {
        let mut ordered = Vec::new();
        for kind in kinds {
            if !ordered.contains(&kind) {
                ordered.push(kind);
            }
        }
        if ordered.is_empty() {
            return Err("type list must not be empty".to_string());
        }
        Ok(Self(ordered))
    }

    pub fn one(kind: Kind) -> Self {
        Self(vec![kind])
    }

    pub fn kinds(&self) -> &[Kind] {
        &self.0
    }

    pub fn contains(&self, kind: Kind) -> bool {
        self.0.contains(&kind)
    }

    pub fn matches(&self, value: &Value) -> bool {
        self.0.iter().any(|kind| kind.matches(value))
    }

    /// `a number`, `a number or an object`, ...
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|kind| kind.with_article())
            .collect::<Vec<_>>()
            .join(" or ")
    }
}

impl From<Kind> for KindSet {
    fn from(value: Kind) -> Self {
        Self::one(value)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum KindSetRepr {
    One(Kind),
    Many(Vec<Kind>),
}

impl TryFrom<KindSetRepr> for KindSet {
    type Error = String;

    fn try_from(value: KindSetRepr) -> Result<Self, Self::Error> {
        match value {
            KindSetRepr::One(kind) => Ok(Self::one(kind)),
            KindSetRepr::Many(kinds) => Self::new(kinds),
        }
    }
}

impl From<KindSet> for KindSetRepr {
    fn from(value: KindSet) -> Self {
        if value.0.len() == 1 {
            Self::One(value.0[0])
        } else {
            Self::Many(value.0)
        }
    }
}

/// Validation rule for one field of an object shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub kinds: KindSet,
    /// Accept `null` regardless of `kinds`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub nullable: bool,
    /// Accept the key being absent.
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
    /// Shape checked when the runtime value is an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Schema>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kinds: impl Into<KindSet>) -> Self {
        Self {
            name: name.into(),
            kinds: kinds.into(),
            nullable: false,
            optional: false,
            fields: None,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn with_fields(mut self, fields: Schema) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Nested schema that applies to `value`, if any.
    pub fn nested_for(&self, value: &Value) -> Option<&Schema> {
        if value.is_object() && self.kinds.contains(Kind::Object) {
            self.fields.as_ref()
        } else {
            None
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Ordered list of field rules describing one object shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Whether a dotted field path (`patient.title.mc`) is declared,
    /// following nested shapes.
    pub fn contains_path(&self, path: &str) -> bool {
        let mut current = self;
        let mut segments = path.split('.').peekable();
        while let Some(segment) = segments.next() {
            let Some(field) = current.fields.iter().find(|field| field.name == segment) else {
                return false;
            };
            if segments.peek().is_none() {
                return true;
            }
            match &field.fields {
                Some(nested) => current = nested,
                None => return false,
            }
        }
        false
    }

    /// Checks the definition itself, recursing into nested shapes.
    pub fn check(&self) -> Result<(), SchemaError> {
        self.check_at("")
    }

    fn check_at(&self, prefix: &str) -> Result<(), SchemaError> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(SchemaError::EmptyFieldName {
                    parent: if prefix.is_empty() {
                        "$".to_string()
                    } else {
                        prefix.to_string()
                    },
                });
            }
            let path = join_path(prefix, &field.name);
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField { path });
            }
            if let Some(nested) = &field.fields {
                if !field.kinds.contains(Kind::Object) {
                    return Err(SchemaError::NestedWithoutObject { path });
                }
                nested.check_at(&path)?;
            }
        }
        Ok(())
    }
}

/// Top-level schema file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ShapeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub fields: Schema,
}

/// Joins a dotted field path.
pub fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
