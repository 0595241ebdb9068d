//! Break records before and after validation

use crate::area::AreaId;
use crate::error::ValidationError;
use crate::wcag::{Wcag2Criterion, WcagVersion};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

/// Field names shared by the extractor and the validator
pub mod fields {
    /// Free-text description(s)
    pub const DESCRIPTION: &str = "description";
    /// Optional discussion notes
    pub const DISCUSSION_ITEMS: &str = "discussionItems";
    /// Area reference
    pub const LOCATION: &str = "location";
    /// Photosensitivity warning flag
    pub const PHOTOSENSITIVITY: &str = "photosensitivity";
    /// WCAG-2 success criteria
    pub const WCAG2: &str = "wcag2";
    /// WCAG-3 requirements
    pub const WCAG3: &str = "wcag3";

    /// Every field the validator reads
    pub const KNOWN: &[&str] = &[
        DESCRIPTION,
        DISCUSSION_ITEMS,
        LOCATION,
        PHOTOSENSITIVITY,
        WCAG2,
        WCAG3,
    ];
}

/// Untrusted record produced by the extractor
///
/// `fields` holds whatever keys the annotation carried, merged with any
/// inherited default location. Nothing about their types is known yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawBreakRecord {
    /// `{path}-{offset}` for template blocks, `{path}-{index}` for front-matter entries
    pub id: String,
    /// Annotation payload keys
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
}

impl RawBreakRecord {
    /// Create record with no fields
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// With a field set (overwrites)
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Field value by key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Keys the validator does not read
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.fields
            .keys()
            .map(String::as_str)
            .filter(|k| !fields::KNOWN.contains(k))
    }
}

/// Canonical, validated break
///
/// Multi-valued fields are always non-empty lists; `wcag2` and `wcag3` are
/// never both absent. Fields are read through accessors so those rules hold
/// for every instance, not only for [`BreakValidator`](crate::BreakValidator)
/// output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedBreak {
    pub(crate) id: String,
    pub(crate) description: Vec<String>,
    pub(crate) location: AreaId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) wcag2: Option<Vec<Wcag2Criterion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) wcag3: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) photosensitivity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) discussion_items: Option<Vec<String>>,
}

impl ValidatedBreak {
    /// Assemble a break from already-typed parts
    ///
    /// # Errors
    /// - `ValidationError::EmptyList` for an empty description or tag list
    /// - `ValidationError::NoWcagTags` when both tag lists are absent
    pub fn new(
        id: impl Into<String>,
        description: Vec<String>,
        location: AreaId,
        wcag2: Option<Vec<Wcag2Criterion>>,
        wcag3: Option<Vec<String>>,
    ) -> Result<Self, ValidationError> {
        if description.is_empty() {
            return Err(ValidationError::EmptyList {
                field: fields::DESCRIPTION,
            });
        }
        if wcag2.as_ref().is_some_and(Vec::is_empty) {
            return Err(ValidationError::EmptyList {
                field: fields::WCAG2,
            });
        }
        if wcag3.as_ref().is_some_and(Vec::is_empty) {
            return Err(ValidationError::EmptyList {
                field: fields::WCAG3,
            });
        }
        if wcag2.is_none() && wcag3.is_none() {
            return Err(ValidationError::NoWcagTags);
        }
        Ok(Self {
            id: id.into(),
            description,
            location,
            wcag2,
            wcag3,
            photosensitivity: None,
            discussion_items: None,
        })
    }

    /// With photosensitivity flag
    #[must_use]
    pub fn with_photosensitivity(mut self, flag: bool) -> Self {
        self.photosensitivity = Some(flag);
        self
    }

    /// With discussion notes
    ///
    /// # Errors
    /// `ValidationError::EmptyList` when `items` is empty.
    pub fn with_discussion_items(mut self, items: Vec<String>) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::EmptyList {
                field: fields::DISCUSSION_ITEMS,
            });
        }
        self.discussion_items = Some(items);
        Ok(self)
    }

    /// Stable source id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// One or more description paragraphs
    #[inline]
    #[must_use]
    pub fn description(&self) -> &[String] {
        &self.description
    }

    /// Area the break lives in
    #[inline]
    #[must_use]
    pub fn location(&self) -> &AreaId {
        &self.location
    }

    /// WCAG-2 success criteria
    #[inline]
    #[must_use]
    pub fn wcag2(&self) -> Option<&[Wcag2Criterion]> {
        self.wcag2.as_deref()
    }

    /// WCAG-3 requirements
    #[inline]
    #[must_use]
    pub fn wcag3(&self) -> Option<&[String]> {
        self.wcag3.as_deref()
    }

    /// Photosensitivity flag as given, `None` when absent
    #[inline]
    #[must_use]
    pub fn photosensitivity(&self) -> Option<bool> {
        self.photosensitivity
    }

    /// Discussion notes
    #[inline]
    #[must_use]
    pub fn discussion_items(&self) -> Option<&[String]> {
        self.discussion_items.as_deref()
    }

    /// Whether the break carries tags for `version`
    #[must_use]
    pub fn has_tags(&self, version: WcagVersion) -> bool {
        match version {
            WcagVersion::V2 => self.wcag2.is_some(),
            WcagVersion::V3 => self.wcag3.is_some(),
        }
    }

    /// Whether the photosensitivity flag is set
    #[inline]
    #[must_use]
    pub fn is_photosensitive(&self) -> bool {
        self.photosensitivity.unwrap_or(false)
    }

    /// Back to an untrusted record in list form
    ///
    /// Validating the result yields `self` again.
    #[must_use]
    pub fn to_raw(&self) -> RawBreakRecord {
        fn list<T: AsRef<str>>(items: &[T]) -> Value {
            Value::Sequence(
                items
                    .iter()
                    .map(|s| Value::String(s.as_ref().to_string()))
                    .collect(),
            )
        }

        let mut raw = RawBreakRecord::new(&self.id)
            .with_field(fields::DESCRIPTION, list(&self.description))
            .with_field(fields::LOCATION, self.location.as_str());
        if let Some(wcag2) = &self.wcag2 {
            let ids: Vec<&str> = wcag2.iter().map(Wcag2Criterion::as_str).collect();
            raw = raw.with_field(fields::WCAG2, list(&ids));
        }
        if let Some(wcag3) = &self.wcag3 {
            raw = raw.with_field(fields::WCAG3, list(wcag3));
        }
        if let Some(flag) = self.photosensitivity {
            raw = raw.with_field(fields::PHOTOSENSITIVITY, flag);
        }
        if let Some(items) = &self.discussion_items {
            raw = raw.with_field(fields::DISCUSSION_ITEMS, list(items));
        }
        raw
    }
}
