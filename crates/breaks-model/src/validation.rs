//! Normalization and validation of raw break records
//!
//! Every record either validates completely or fails with the rule it
//! violated. Multi-valued fields accept a single value or a non-empty list
//! and always come out as lists.

use crate::area::{AreaCatalog, AreaId};
use crate::error::{describe, RecordError, ValidationError, ValidationErrors};
use crate::record::{fields, RawBreakRecord, ValidatedBreak};
use crate::wcag::{Wcag2Catalog, Wcag2Criterion};
use serde_yaml::Value;

/// Validates raw records against the break schema
///
/// Holds the WCAG-2 catalog used for criterion membership and, optionally,
/// an area catalog to resolve locations eagerly instead of at render time.
#[derive(Debug, Clone, Copy)]
pub struct BreakValidator<'a> {
    wcag2: &'a Wcag2Catalog,
    areas: Option<&'a AreaCatalog>,
}

impl<'a> BreakValidator<'a> {
    /// Create validator over a criterion catalog
    #[inline]
    #[must_use]
    pub fn new(wcag2: &'a Wcag2Catalog) -> Self {
        Self { wcag2, areas: None }
    }

    /// Also require every location to exist in `areas`
    #[inline]
    #[must_use]
    pub fn with_areas(mut self, areas: &'a AreaCatalog) -> Self {
        self.areas = Some(areas);
        self
    }

    /// Validate one record
    ///
    /// # Errors
    /// `RecordError` carrying the record id and the first violated rule.
    pub fn validate(&self, raw: &RawBreakRecord) -> Result<ValidatedBreak, RecordError> {
        self.validate_fields(raw).map_err(|error| RecordError {
            id: raw.id.clone(),
            error,
        })
    }

    /// Validate every record, failing if any record is invalid
    ///
    /// All failures are collected so one run reports every broken fixture.
    ///
    /// # Errors
    /// `ValidationErrors` listing each invalid record in input order.
    pub fn validate_all(
        &self,
        raws: &[RawBreakRecord],
    ) -> Result<Vec<ValidatedBreak>, ValidationErrors> {
        let mut valid = Vec::with_capacity(raws.len());
        let mut failures = Vec::new();

        for raw in raws {
            match self.validate(raw) {
                Ok(brk) => valid.push(brk),
                Err(err) => {
                    tracing::debug!("Rejected {}: {}", err.id, err.error);
                    failures.push(err);
                }
            }
        }

        if failures.is_empty() {
            tracing::info!("Validated {} breaks", valid.len());
            Ok(valid)
        } else {
            Err(ValidationErrors(failures))
        }
    }

    fn validate_fields(&self, raw: &RawBreakRecord) -> Result<ValidatedBreak, ValidationError> {
        let unknown: Vec<&str> = raw.unknown_keys().collect();
        if !unknown.is_empty() {
            tracing::warn!("Ignoring unknown keys on {}: {}", raw.id, unknown.join(", "));
        }

        let description = match raw.get(fields::DESCRIPTION) {
            Some(value) => single_or_list(fields::DESCRIPTION, value)?,
            None => {
                return Err(ValidationError::MissingField {
                    field: fields::DESCRIPTION,
                })
            }
        };

        let discussion_items = raw
            .get(fields::DISCUSSION_ITEMS)
            .map(|value| string_list(fields::DISCUSSION_ITEMS, value))
            .transpose()?;

        let location = match raw.get(fields::LOCATION) {
            Some(Value::String(id)) => self.location(id)?,
            Some(other) => {
                return Err(ValidationError::wrong_type(
                    fields::LOCATION,
                    "string",
                    other,
                ))
            }
            None => {
                return Err(ValidationError::MissingField {
                    field: fields::LOCATION,
                })
            }
        };

        let photosensitivity = match raw.get(fields::PHOTOSENSITIVITY) {
            Some(Value::Bool(flag)) => Some(*flag),
            Some(other) => {
                return Err(ValidationError::wrong_type(
                    fields::PHOTOSENSITIVITY,
                    "boolean",
                    other,
                ))
            }
            None => None,
        };

        let wcag2 = raw
            .get(fields::WCAG2)
            .map(|value| self.criteria(value))
            .transpose()?;

        let wcag3 = raw
            .get(fields::WCAG3)
            .map(|value| single_or_list(fields::WCAG3, value))
            .transpose()?;

        if wcag2.is_none() && wcag3.is_none() {
            return Err(ValidationError::NoWcagTags);
        }

        Ok(ValidatedBreak {
            id: raw.id.clone(),
            description,
            location,
            wcag2,
            wcag3,
            photosensitivity,
            discussion_items,
        })
    }

    fn location(&self, id: &str) -> Result<AreaId, ValidationError> {
        match self.areas {
            Some(areas) if !areas.contains(id) => Err(ValidationError::UnknownArea(id.to_string())),
            _ => Ok(AreaId::new(id)),
        }
    }

    fn criteria(&self, value: &Value) -> Result<Vec<Wcag2Criterion>, ValidationError> {
        single_or_list(fields::WCAG2, value)?
            .into_iter()
            .map(|id| {
                self.wcag2
                    .criterion(&id)
                    .ok_or(ValidationError::UnknownCriterion(id))
            })
            .collect()
    }
}

/// A string, or a non-empty list of strings, normalized to a list
fn single_or_list(field: &'static str, value: &Value) -> Result<Vec<String>, ValidationError> {
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Sequence(_) => {
            let items = string_list(field, value)?;
            if items.is_empty() {
                Err(ValidationError::EmptyList { field })
            } else {
                Ok(items)
            }
        }
        other => Err(ValidationError::wrong_type(
            field,
            "string or list of strings",
            other,
        )),
    }
}

/// A list of strings, possibly empty
fn string_list(field: &'static str, value: &Value) -> Result<Vec<String>, ValidationError> {
    let Value::Sequence(items) = value else {
        return Err(ValidationError::wrong_type(field, "list of strings", value));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(ValidationError::WrongType {
                field,
                expected: "string list item",
                found: describe(other).to_string(),
            }),
        })
        .collect()
}
