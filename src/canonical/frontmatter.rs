//! Parse and serialize YAML front matter.
//!
//! Parsing follows the generator's historical contract rather than a strict
//! line-based reading: the closing delimiter is the next `---` anywhere after
//! the opening one. Serialization is intentionally asymmetric: booleans and
//! lists get explicit encodings, every other value is written in its natural
//! string form without quoting. A string such as `"true"` therefore comes back
//! as a boolean after a round trip.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::error::D3genError;

/// Front matter delimiter
pub const DELIMITER: &str = "---";

/// Ordered front matter mapping (declaration order is preserved)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrontMatter(Mapping);

impl FrontMatter {
    pub fn new() -> Self {
        Self(Mapping::new())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a scalar value by key rendered as a string
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.0.iter()
    }

    /// Key names in declaration order
    pub fn keys(&self) -> impl Iterator<Item = String> {
        self.0.keys().map(key_name)
    }

    /// Copy of this mapping with `key` set to `value`.
    ///
    /// An existing key keeps its position.
    #[must_use]
    pub fn with(&self, key: &str, value: impl Into<Value>) -> Self {
        let mut mapping = self.0.clone();
        mapping.insert(Value::String(key.to_string()), value.into());
        Self(mapping)
    }
}

impl FromIterator<(Value, Value)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Mapping> for FrontMatter {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

/// Why a front matter block could not be decoded
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("missing closing `---` delimiter")]
    Unterminated,

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping, found {0}")]
    NotAMapping(&'static str),
}

impl FrontMatterError {
    /// Attach the offending document path
    pub fn at(self, path: &Path) -> D3genError {
        D3genError::MalformedFrontMatter {
            path: path.display().to_string(),
            reason: self.to_string(),
        }
    }
}

/// Split content into front matter and body.
///
/// Content without a leading delimiter has empty front matter and is returned
/// unchanged as the body. Leading newlines of the body are stripped.
pub fn parse(content: &str) -> Result<(FrontMatter, String), FrontMatterError> {
    let Some(rest) = content.strip_prefix(DELIMITER) else {
        return Ok((FrontMatter::new(), content.to_string()));
    };

    let end = rest.find(DELIMITER).ok_or(FrontMatterError::Unterminated)?;
    let front_matter = decode(rest[..end].trim())?;
    let body = rest[end + DELIMITER.len()..].trim_start_matches('\n');

    Ok((front_matter, body.to_string()))
}

fn decode(block: &str) -> Result<FrontMatter, FrontMatterError> {
    if block.is_empty() {
        return Ok(FrontMatter::new());
    }
    match serde_yaml::from_str::<Value>(block)? {
        Value::Mapping(mapping) => Ok(FrontMatter(mapping)),
        Value::Null => Ok(FrontMatter::new()),
        Value::Bool(_) => Err(FrontMatterError::NotAMapping("a boolean")),
        Value::Number(_) => Err(FrontMatterError::NotAMapping("a number")),
        Value::String(_) => Err(FrontMatterError::NotAMapping("a string")),
        Value::Sequence(_) => Err(FrontMatterError::NotAMapping("a list")),
        Value::Tagged(_) => Err(FrontMatterError::NotAMapping("a tagged value")),
    }
}

/// Render a mapping as a delimited block, one `key: value` line per entry.
///
/// No trailing newline follows the closing delimiter.
pub fn serialize(front_matter: &FrontMatter) -> String {
    let mut lines = Vec::with_capacity(front_matter.len() + 2);
    lines.push(DELIMITER.to_string());
    for (key, value) in front_matter.iter() {
        lines.push(format!("{}: {}", key_name(key), render_value(value)));
    }
    lines.push(DELIMITER.to_string());
    lines.join("\n")
}

fn key_name(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => render_value(other),
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Bool(b) => b.to_string(),
        Value::Sequence(items) => {
            let items: Vec<String> = items.iter().map(json_inline).collect();
            format!("[{}]", items.join(", "))
        }
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        Value::Mapping(_) | Value::Tagged(_) => json_inline(value),
    }
}

fn json_inline(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
