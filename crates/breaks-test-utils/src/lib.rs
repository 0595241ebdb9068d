//! Testing utilities for the breaks workspace
//!
//! Shared fixtures: WCAG-2 catalogs, a small area catalog, and builders
//! for raw and validated breaks.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use breaks_model::{
    Area, AreaCatalog, AreaId, RawBreakRecord, ValidatedBreak, Wcag2Catalog, Wcag2Criterion,
};

pub const BASE_URL: &str = "/museum/";

pub fn wcag2_catalog() -> Wcag2Catalog {
    Wcag2Catalog::standard()
}

/// Just enough criteria for label tests
pub fn minimal_wcag2_catalog() -> Wcag2Catalog {
    Wcag2Catalog::from_entries([
        ("1.1.1", "Non-text Content"),
        ("1.4.3", "Contrast (Minimum)"),
    ])
    .unwrap()
}

pub fn area_catalog() -> AreaCatalog {
    AreaCatalog::from_areas([
        Area::new("Home", ""),
        Area::new("Exhibits", "exhibits/").with_description("Permanent and rotating collections."),
        Area::new("Gift Shop", "gift-shop/"),
        Area::new("Navigation", "navigation/"),
    ])
    .unwrap()
}

pub fn criterion(id: &str) -> Wcag2Criterion {
    wcag2_catalog()
        .criterion(id)
        .unwrap_or_else(|| panic!("{id} is not a WCAG 2 criterion"))
}

pub fn raw_break(id: &str, location: &str, description: &str) -> RawBreakRecord {
    RawBreakRecord::new(id)
        .with_field("location", location)
        .with_field("description", description)
}

/// Builder for a validated break with sensible defaults
#[derive(Debug, Clone)]
pub struct BreakBuilder {
    id: String,
    location: String,
    description: Vec<String>,
    wcag2: Option<Vec<Wcag2Criterion>>,
    wcag3: Option<Vec<String>>,
    photosensitive: bool,
    discussion: Option<Vec<String>>,
}

impl BreakBuilder {
    pub fn new(id: &str, location: &str) -> Self {
        Self {
            id: id.to_string(),
            location: location.to_string(),
            description: vec![format!("Break {id}")],
            wcag2: None,
            wcag3: None,
            photosensitive: false,
            discussion: None,
        }
    }

    pub fn description(mut self, lines: &[&str]) -> Self {
        self.description = lines.iter().map(ToString::to_string).collect();
        self
    }

    pub fn wcag2(mut self, ids: &[&str]) -> Self {
        self.wcag2 = Some(ids.iter().map(|id| criterion(id)).collect());
        self
    }

    pub fn wcag3(mut self, items: &[&str]) -> Self {
        self.wcag3 = Some(items.iter().map(ToString::to_string).collect());
        self
    }

    pub fn photosensitive(mut self) -> Self {
        self.photosensitive = true;
        self
    }

    pub fn discussion(mut self, items: &[&str]) -> Self {
        self.discussion = Some(items.iter().map(ToString::to_string).collect());
        self
    }

    pub fn build(self) -> ValidatedBreak {
        let mut brk = ValidatedBreak::new(
            self.id,
            self.description,
            AreaId::new(self.location),
            self.wcag2,
            self.wcag3,
        )
        .unwrap();
        if self.photosensitive {
            brk = brk.with_photosensitivity(true);
        }
        if let Some(items) = self.discussion {
            brk = brk.with_discussion_items(items).unwrap();
        }
        brk
    }
}
