use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Request item located inside a Postman collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestItem {
    pub name: String,
    pub request: Request,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Request {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub header: Vec<Header>,
    #[serde(default)]
    pub body: Option<Body>,
    #[serde(default)]
    pub url: Option<Url>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl Request {
    /// Raw URL, rebuilt from host and path when the export omits `raw`.
    pub fn url_raw(&self) -> Option<String> {
        match self.url.as_ref()? {
            Url::Raw(raw) => Some(raw.clone()),
            Url::Detailed(url) => url.raw.clone().or_else(|| url.rebuild()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Body {
    pub mode: String,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub options: Option<BodyOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BodyOptions {
    #[serde(default)]
    pub raw: Option<RawOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawOptions {
    #[serde(default)]
    pub language: Option<String>,
}

/// Postman accepts a bare string or a structured URL object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Url {
    Raw(String),
    Detailed(DetailedUrl),
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Branch on the JSON shape so the structured decode reports its own
        // failing field.
        match Value::deserialize(deserializer)? {
            Value::String(raw) => Ok(Self::Raw(raw)),
            object @ Value::Object(_) => serde_json::from_value(object)
                .map(Self::Detailed)
                .map_err(|err| de::Error::custom(format!("invalid url: {err}"))),
            other => Err(de::Error::invalid_type(
                unexpected(&other),
                &"a url string or object",
            )),
        }
    }
}

fn unexpected(value: &Value) -> de::Unexpected<'_> {
    match value {
        Value::Null => de::Unexpected::Unit,
        Value::Bool(flag) => de::Unexpected::Bool(*flag),
        Value::Number(_) => de::Unexpected::Other("number"),
        Value::String(text) => de::Unexpected::Str(text),
        Value::Array(_) => de::Unexpected::Seq,
        Value::Object(_) => de::Unexpected::Map,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailedUrl {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default, deserialize_with = "string_or_segments")]
    pub host: Vec<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default, deserialize_with = "string_or_segments")]
    pub path: Vec<String>,
    #[serde(default)]
    pub query: Vec<QueryParam>,
    #[serde(default)]
    pub variable: Vec<PathVariable>,
}

impl DetailedUrl {
    fn rebuild(&self) -> Option<String> {
        if self.host.is_empty() {
            return None;
        }
        let mut url = String::new();
        if let Some(protocol) = &self.protocol {
            url.push_str(protocol);
            url.push_str("://");
        }
        url.push_str(&self.host.join("."));
        if let Some(port) = &self.port {
            url.push(':');
            url.push_str(port);
        }
        for segment in &self.path {
            url.push('/');
            url.push_str(segment);
        }
        let pairs: Vec<String> = self
            .query
            .iter()
            .filter_map(|param| {
                let key = param.key.as_deref()?;
                Some(match &param.value {
                    Some(value) => format!("{key}={value}"),
                    None => key.to_string(),
                })
            })
            .collect();
        if !pairs.is_empty() {
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        Some(url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryParam {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub description: Option<Description>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathVariable {
    #[serde(default)]
    pub key: Option<String>,
    /// Postman stores variable values of any JSON type.
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub description: Option<Description>,
}

/// Description written as plain text or as `{content, type}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Description {
    Text(String),
    Rich {
        #[serde(default)]
        content: String,
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        content_type: Option<String>,
    },
}

impl Description {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Rich { content, .. } => content,
        }
    }
}

/// One line of `requests` command output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RequestSummary {
    pub name: String,
    pub method: String,
    pub url: Option<String>,
}

impl From<&RequestItem> for RequestSummary {
    fn from(item: &RequestItem) -> Self {
        Self {
            name: item.name.clone(),
            method: item.request.method.clone(),
            url: item.request.url_raw(),
        }
    }
}

fn string_or_segments<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Segments {
        Joined(String),
        Parts(Vec<String>),
    }

    Ok(match Segments::deserialize(deserializer)? {
        Segments::Joined(joined) => joined
            .split('/')
            .filter(|part| !part.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        Segments::Parts(parts) => parts,
    })
}
