//! Narrative (markdown) source parser
//!
//! Breaks live in the front-matter as a `breaks` list. Each entry inherits
//! the file-level `breaklocation` unless it names its own `location`, and
//! gets id `{path}-{index}`.

use super::payload::{front_matter, into_fields, kind, parse_fields, Fields, PayloadError};
use super::{into_record, SourceParser};
use crate::error::ExtractError;
use breaks_model::{fields, RawBreakRecord};
use serde_yaml::Value;
use std::path::{Component, Path};

/// Front-matter key holding the break list
const BREAKS_KEY: &str = "breaks";
/// Front-matter key holding the file-level default location
const LOCATION_KEY: &str = "breaklocation";

/// Parser for markdown files with break front-matter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeParser {
    directory: String,
    extension: String,
}

impl Default for NarrativeParser {
    fn default() -> Self {
        Self::new("content", "md")
    }
}

impl NarrativeParser {
    /// Create parser for `*.{extension}` files below `directory`
    ///
    /// An empty `directory` accepts files anywhere under the source root.
    #[must_use]
    pub fn new(directory: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    fn in_directory(&self, path: &Path) -> bool {
        self.directory.is_empty()
            || matches!(
                path.components().next(),
                Some(Component::Normal(first)) if first.to_str() == Some(self.directory.as_str())
            )
    }
}

impl SourceParser for NarrativeParser {
    fn name(&self) -> &'static str {
        "narrative"
    }

    fn parse(&self, path: &str, content: &str) -> Result<Vec<RawBreakRecord>, ExtractError> {
        let Some(yaml) = front_matter(content) else {
            return Ok(Vec::new());
        };

        let mut matter = match parse_fields(yaml) {
            Ok(matter) => matter,
            Err(PayloadError::Syntax(message)) => {
                return Err(ExtractError::FrontMatter {
                    path: path.to_string(),
                    message,
                })
            }
            Err(PayloadError::Shape(message)) => {
                tracing::debug!("Skipping {}: front-matter {}", path, message);
                return Ok(Vec::new());
            }
        };

        let entries = match matter.shift_remove(BREAKS_KEY) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Sequence(entries)) => entries,
            Some(other) => {
                return Err(ExtractError::shape(
                    path,
                    BREAKS_KEY,
                    format!("expected a list, found {}", kind(&other)),
                ))
            }
        };
        let location = matter.shift_remove(LOCATION_KEY);

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let entry = into_fields(entry).map_err(|e| {
                let (PayloadError::Syntax(message) | PayloadError::Shape(message)) = e;
                ExtractError::shape(path, format!("{BREAKS_KEY}[{index}]"), message)
            })?;

            let mut merged = Fields::new();
            if let Some(loc) = &location {
                merged.insert(fields::LOCATION.to_string(), loc.clone());
            }
            merged.extend(entry);

            records.push(into_record(format!("{path}-{index}"), merged));
        }

        tracing::debug!("Extracted {} breaks from narrative {}", records.len(), path);
        Ok(records)
    }

    fn can_parse(&self, path: &Path) -> bool {
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| ext == self.extension);
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('_'));
        ext_matches && !hidden && self.in_directory(path)
    }

    fn extensions(&self) -> Vec<&str> {
        vec![self.extension.as_str()]
    }
}
