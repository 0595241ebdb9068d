//! Error types for the break model
//!
//! Provides error handling for:
//! - Record validation (raw record → `ValidatedBreak`)
//! - Catalog construction (WCAG-2 table, area catalog)

/// A single schema violation inside one record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required field absent
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// Field present with an unexpected YAML type
    #[error("field '{field}': expected {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: String,
    },

    /// List form given with no elements
    #[error("field '{field}': list must not be empty")]
    EmptyList { field: &'static str },

    /// WCAG-2 identifier not present in the criterion catalog
    #[error("field 'wcag2': unknown success criterion '{0}'")]
    UnknownCriterion(String),

    /// Neither `wcag2` nor `wcag3` given
    #[error("One or both of wcag2 and/or wcag3 must be set.")]
    NoWcagTags,

    /// Location does not name an area in the catalog
    #[error("field 'location': unknown area '{0}'")]
    UnknownArea(String),
}

impl ValidationError {
    /// Create wrong-type error, describing the value actually found
    pub fn wrong_type(
        field: &'static str,
        expected: &'static str,
        found: &serde_yaml::Value,
    ) -> Self {
        Self::WrongType {
            field,
            expected,
            found: describe(found).to_string(),
        }
    }
}

/// Validation failure tagged with the id of the offending record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid break '{id}': {error}")]
pub struct RecordError {
    /// Source id (`{path}-{offset}` or `{path}-{index}`)
    pub id: String,
    /// The violated rule
    #[source]
    pub error: ValidationError,
}

/// Every failing record of one validation run
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} invalid break record(s): {}", .0.len(), summarize(.0))]
pub struct ValidationErrors(pub Vec<RecordError>);

impl ValidationErrors {
    /// Ids of the failing records, in input order
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.id.as_str()).collect()
    }
}

fn summarize(errors: &[RecordError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors while building a catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog source is not valid JSON of the expected shape
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two entries share one id
    #[error("duplicate catalog id '{0}'")]
    DuplicateId(String),

    /// Area path must be empty or end with a slash
    #[error("area '{id}': non-empty path should end with a slash (got '{path}')")]
    InvalidPath { id: String, path: String },

    /// Keyed catalog entry names an id other than its key
    #[error("area keyed '{key}' declares a different id '{id}'")]
    KeyMismatch { key: String, id: String },

    /// WCAG-2 criterion id is not dot-separated numbers
    #[error("malformed success criterion id '{0}'")]
    InvalidCriterion(String),
}

/// Short human name for a YAML value's type
pub(crate) fn describe(value: &serde_yaml::Value) -> &'static str {
    use serde_yaml::Value;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wcag_tags_message_names_rule() {
        let err = ValidationError::NoWcagTags;
        assert_eq!(
            err.to_string(),
            "One or both of wcag2 and/or wcag3 must be set."
        );
    }

    #[test]
    fn record_error_includes_id() {
        let err = RecordError {
            id: "pages/index.astro-120".to_string(),
            error: ValidationError::MissingField {
                field: "description",
            },
        };
        let text = err.to_string();
        assert!(text.contains("pages/index.astro-120"));
        assert!(text.contains("description"));
    }

    #[test]
    fn wrong_type_describes_found_value() {
        let err = ValidationError::wrong_type(
            "photosensitivity",
            "boolean",
            &serde_yaml::Value::String("yes".into()),
        );
        assert_eq!(
            err.to_string(),
            "field 'photosensitivity': expected boolean, found string"
        );
    }

    #[test]
    fn aggregated_ids_preserve_order() {
        let errs = ValidationErrors(vec![
            RecordError {
                id: "b".into(),
                error: ValidationError::NoWcagTags,
            },
            RecordError {
                id: "a".into(),
                error: ValidationError::NoWcagTags,
            },
        ]);
        assert_eq!(errs.ids(), vec!["b", "a"]);
        assert!(errs.to_string().starts_with("2 invalid break record(s)"));
    }
}
