//! WCAG versions and the WCAG-2 success criterion catalog
//!
//! The catalog is an explicit read-only table. The validator uses it for
//! membership checks and the presenter uses it for labels, so both take it
//! by reference instead of reaching for a global.

use crate::error::CatalogError;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// WCAG major version a break is tagged against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WcagVersion {
    /// WCAG 2.x success criteria
    #[default]
    V2,
    /// WCAG 3 draft requirements
    V3,
}

impl WcagVersion {
    /// Query-string form (`"2"` or `"3"`)
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2 => "2",
            Self::V3 => "3",
        }
    }
}

impl fmt::Display for WcagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WcagVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2" => Ok(Self::V2),
            "3" => Ok(Self::V3),
            other => Err(format!("unknown WCAG version '{other}'")),
        }
    }
}

/// A success criterion id known to a [`Wcag2Catalog`]
///
/// Only obtainable through [`Wcag2Catalog::criterion`], so holding one
/// means the id passed a membership check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Wcag2Criterion(String);

impl Wcag2Criterion {
    /// Dotted id, e.g. `"1.4.3"`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric encoding that sorts criteria in document order
    ///
    /// Each dot-separated component occupies two decimal digits, lowest-order
    /// component last: `1.2.1` → `10201`, `2.4.11` → `20411`.
    #[must_use]
    pub fn sort_key(&self) -> u64 {
        sort_key(&self.0)
    }
}

impl fmt::Display for Wcag2Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Wcag2Criterion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

fn sort_key(id: &str) -> u64 {
    id.split('.')
        .rev()
        .enumerate()
        .map(|(i, n)| n.parse::<u64>().unwrap_or(0) * 100u64.pow(i as u32))
        .sum()
}

/// At most `principle.guideline.criterion`
const MAX_ID_COMPONENTS: usize = 3;

fn is_criterion_id(id: &str) -> bool {
    !id.is_empty()
        && id.split('.').count() <= MAX_ID_COMPONENTS
        && id
            .split('.')
            .all(|part| !part.is_empty() && part.len() <= 2 && part.bytes().all(|b| b.is_ascii_digit()))
}

/// Read-only table of WCAG-2 success criteria and their titles
#[derive(Debug, Clone, Default)]
pub struct Wcag2Catalog {
    entries: IndexMap<String, String>,
}

impl Wcag2Catalog {
    /// Build a catalog from `(id, title)` pairs
    ///
    /// # Errors
    /// - `CatalogError::InvalidCriterion` if an id is not dotted numbers
    /// - `CatalogError::DuplicateId` if an id repeats
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = IndexMap::new();
        for (id, title) in entries {
            let id = id.into();
            if !is_criterion_id(&id) {
                return Err(CatalogError::InvalidCriterion(id));
            }
            if map.contains_key(&id) {
                return Err(CatalogError::DuplicateId(id));
            }
            map.insert(id, title.into());
        }
        Ok(Self { entries: map })
    }

    /// WCAG 2.2 level A and AA success criteria
    #[must_use]
    pub fn standard() -> Self {
        let entries = STANDARD_CRITERIA
            .iter()
            .map(|(id, title)| ((*id).to_string(), (*title).to_string()))
            .collect();
        Self { entries }
    }

    /// Look up a criterion by id
    #[must_use]
    pub fn criterion(&self, id: &str) -> Option<Wcag2Criterion> {
        self.entries
            .contains_key(id)
            .then(|| Wcag2Criterion(id.to_string()))
    }

    /// Title for a criterion id
    #[must_use]
    pub fn title(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    /// Display label, `"{id}: {title}"`
    #[must_use]
    pub fn label(&self, criterion: &Wcag2Criterion) -> String {
        match self.title(criterion.as_str()) {
            Some(title) => format!("{criterion}: {title}"),
            None => criterion.to_string(),
        }
    }

    /// Number of criteria
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no criteria
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Criteria ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

const STANDARD_CRITERIA: &[(&str, &str)] = &[
    ("1.1.1", "Non-text Content"),
    ("1.2.1", "Audio-only and Video-only (Prerecorded)"),
    ("1.2.2", "Captions (Prerecorded)"),
    ("1.2.3", "Audio Description or Media Alternative (Prerecorded)"),
    ("1.2.4", "Captions (Live)"),
    ("1.2.5", "Audio Description (Prerecorded)"),
    ("1.3.1", "Info and Relationships"),
    ("1.3.2", "Meaningful Sequence"),
    ("1.3.3", "Sensory Characteristics"),
    ("1.3.4", "Orientation"),
    ("1.3.5", "Identify Input Purpose"),
    ("1.4.1", "Use of Color"),
    ("1.4.2", "Audio Control"),
    ("1.4.3", "Contrast (Minimum)"),
    ("1.4.4", "Resize Text"),
    ("1.4.5", "Images of Text"),
    ("1.4.10", "Reflow"),
    ("1.4.11", "Non-text Contrast"),
    ("1.4.12", "Text Spacing"),
    ("1.4.13", "Content on Hover or Focus"),
    ("2.1.1", "Keyboard"),
    ("2.1.2", "No Keyboard Trap"),
    ("2.1.4", "Character Key Shortcuts"),
    ("2.2.1", "Timing Adjustable"),
    ("2.2.2", "Pause, Stop, Hide"),
    ("2.3.1", "Three Flashes or Below Threshold"),
    ("2.4.1", "Bypass Blocks"),
    ("2.4.2", "Page Titled"),
    ("2.4.3", "Focus Order"),
    ("2.4.4", "Link Purpose (In Context)"),
    ("2.4.5", "Multiple Ways"),
    ("2.4.6", "Headings and Labels"),
    ("2.4.7", "Focus Visible"),
    ("2.4.11", "Focus Not Obscured (Minimum)"),
    ("2.5.1", "Pointer Gestures"),
    ("2.5.2", "Pointer Cancellation"),
    ("2.5.3", "Label in Name"),
    ("2.5.4", "Motion Actuation"),
    ("2.5.7", "Dragging Movements"),
    ("2.5.8", "Target Size (Minimum)"),
    ("3.1.1", "Language of Page"),
    ("3.1.2", "Language of Parts"),
    ("3.2.1", "On Focus"),
    ("3.2.2", "On Input"),
    ("3.2.3", "Consistent Navigation"),
    ("3.2.4", "Consistent Identification"),
    ("3.2.6", "Consistent Help"),
    ("3.3.1", "Error Identification"),
    ("3.3.2", "Labels or Instructions"),
    ("3.3.3", "Error Suggestion"),
    ("3.3.4", "Error Prevention (Legal, Financial, Data)"),
    ("3.3.7", "Redundant Entry"),
    ("3.3.8", "Accessible Authentication (Minimum)"),
    ("4.1.2", "Name, Role, Value"),
    ("4.1.3", "Status Messages"),
];
