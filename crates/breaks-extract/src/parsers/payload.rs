//! YAML payload parsing
//!
//! Annotation payloads and narrative front-matter are both restricted YAML
//! documents whose top level must be a mapping with string keys.

use indexmap::IndexMap;
use serde_yaml::Value;

/// Top-level keys of a payload, in document order
pub type Fields = IndexMap<String, Value>;

/// Why a payload could not be turned into [`Fields`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Not valid YAML
    Syntax(String),
    /// Valid YAML, but not a mapping with string keys
    Shape(String),
}

/// Parse a YAML document into its top-level fields
///
/// An empty document yields no fields.
///
/// # Errors
/// `PayloadError::Syntax` for invalid YAML, `PayloadError::Shape` when the
/// document is not a mapping or has non-string keys.
pub fn parse_fields(text: &str) -> Result<Fields, PayloadError> {
    if text.trim().is_empty() {
        return Ok(Fields::new());
    }
    let value: Value =
        serde_yaml::from_str(text).map_err(|e| PayloadError::Syntax(e.to_string()))?;
    into_fields(value)
}

/// Convert an already-parsed YAML value into fields
///
/// # Errors
/// `PayloadError::Shape` when `value` is not a mapping with string keys.
pub fn into_fields(value: Value) -> Result<Fields, PayloadError> {
    match value {
        Value::Null => Ok(Fields::new()),
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, value)| match key {
                Value::String(key) => Ok((key, value)),
                other => Err(PayloadError::Shape(format!(
                    "non-string key {}",
                    serde_yaml::to_string(&other)
                        .map(|s| s.trim_end().to_string())
                        .unwrap_or_default()
                ))),
            })
            .collect(),
        other => Err(PayloadError::Shape(format!(
            "expected a mapping, found {}",
            kind(&other)
        ))),
    }
}

/// Split leading `---` front-matter from a document
///
/// The opener must be the first non-blank line (an optional byte-order mark
/// is ignored) and the block ends at the next line that is exactly `---`.
/// Returns the YAML between the fences, or `None` when there is no
/// complete front-matter block.
#[must_use]
pub fn front_matter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut offset = 0;
    let mut opened_at = None;

    for line in content.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        match opened_at {
            None if bare.trim().is_empty() => {}
            None if bare.trim_end() == "---" => opened_at = Some(offset + line.len()),
            None => return None,
            Some(start) if bare.trim_end() == "---" => return Some(&content[start..offset]),
            Some(_) => {}
        }
        offset += line.len();
    }
    None
}

pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
