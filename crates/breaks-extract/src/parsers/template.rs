//! Template source parser
//!
//! A template may declare one default location with
//! `/** @breaklocation Area Name */` and any number of
//! `/** @break ... */` blocks whose body is a YAML mapping. Each block
//! becomes one record with id `{path}-{offset}`.

use super::blocks::{find_blocks, find_first, strip_continuation, BlockPattern};
use super::payload::{parse_fields, Fields, PayloadError};
use super::{into_record, SourceParser};
use crate::error::ExtractError;
use breaks_model::{fields, RawBreakRecord};
use serde_yaml::Value;

/// Parser for comment-annotated template files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateParser {
    extension: String,
    break_keyword: String,
    location_keyword: String,
}

impl Default for TemplateParser {
    fn default() -> Self {
        Self::new("astro", "break", "breaklocation")
    }
}

impl TemplateParser {
    /// Create parser for files with `extension` and the given block keywords
    #[must_use]
    pub fn new(
        extension: impl Into<String>,
        break_keyword: impl Into<String>,
        location_keyword: impl Into<String>,
    ) -> Self {
        Self {
            extension: extension.into(),
            break_keyword: break_keyword.into(),
            location_keyword: location_keyword.into(),
        }
    }

    /// Default location declared by the file, trimmed; blank counts as none
    #[must_use]
    pub fn default_location(&self, content: &str) -> Option<String> {
        find_first(content, BlockPattern::prefix(&self.location_keyword))
            .map(|block| block.body.trim())
            .filter(|loc| !loc.is_empty())
            .map(str::to_string)
    }
}

impl SourceParser for TemplateParser {
    fn name(&self) -> &'static str {
        "template"
    }

    fn parse(&self, path: &str, content: &str) -> Result<Vec<RawBreakRecord>, ExtractError> {
        let location = self.default_location(content);
        let mut records = Vec::new();

        for block in find_blocks(content, BlockPattern::word(&self.break_keyword)) {
            let yaml = strip_continuation(block.body);
            let payload = parse_fields(&yaml).map_err(|e| match e {
                PayloadError::Syntax(msg) => ExtractError::payload(path, block.offset, msg),
                PayloadError::Shape(msg) => {
                    ExtractError::shape(path, format!("offset {}", block.offset), msg)
                }
            })?;

            let mut merged = Fields::new();
            if let Some(loc) = &location {
                merged.insert(fields::LOCATION.to_string(), Value::String(loc.clone()));
            }
            merged.extend(payload);

            records.push(into_record(format!("{path}-{}", block.offset), merged));
        }

        tracing::debug!("Extracted {} breaks from template {}", records.len(), path);
        Ok(records)
    }

    fn extensions(&self) -> Vec<&str> {
        vec![self.extension.as_str()]
    }
}
