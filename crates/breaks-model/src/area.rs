//! Site areas a break can be located in
//!
//! Loaded once from a JSON file (an array of `{id, path, description?}`
//! objects, or an object keyed by id) and read-only afterwards.

use crate::error::CatalogError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key naming a site area
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AreaId(String);

impl AreaId {
    /// Wrap a raw area key
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Key as string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AreaId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Metadata for one site area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Display id (also the catalog key)
    pub id: AreaId,
    /// Optional blurb shown under the area heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path fragment relative to the museum base url; empty for home
    pub path: String,
}

impl Area {
    /// Create area with no description
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: AreaId::new(id),
            description: None,
            path: path.into(),
        }
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Link target for this area under `base_url`
    #[must_use]
    pub fn href(&self, base_url: &str) -> String {
        format!("{base_url}{}", self.path)
    }

    fn check_path(&self) -> Result<(), CatalogError> {
        if self.path.is_empty() || self.path.ends_with('/') {
            Ok(())
        } else {
            Err(CatalogError::InvalidPath {
                id: self.id.to_string(),
                path: self.path.clone(),
            })
        }
    }
}

#[derive(Deserialize)]
struct KeyedArea {
    #[serde(default)]
    id: Option<AreaId>,
    #[serde(default)]
    description: Option<String>,
    path: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogSource {
    List(Vec<Area>),
    Keyed(IndexMap<String, KeyedArea>),
}

/// Lookup table from area key to area metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaCatalog {
    areas: IndexMap<AreaId, Area>,
}

impl AreaCatalog {
    /// Build from areas, preserving order
    ///
    /// # Errors
    /// - `CatalogError::DuplicateId` if two areas share an id
    /// - `CatalogError::InvalidPath` if a non-empty path lacks a trailing slash
    pub fn from_areas(areas: impl IntoIterator<Item = Area>) -> Result<Self, CatalogError> {
        let mut map = IndexMap::new();
        for area in areas {
            area.check_path()?;
            if map.contains_key(&area.id) {
                return Err(CatalogError::DuplicateId(area.id.to_string()));
            }
            map.insert(area.id.clone(), area);
        }
        Ok(Self { areas: map })
    }

    /// Parse catalog JSON
    ///
    /// Accepts an array of areas or an object keyed by area id. In the keyed
    /// form the key is the id; an entry may repeat it but not contradict it.
    ///
    /// # Errors
    /// `CatalogError::Malformed` for bad JSON, `CatalogError::KeyMismatch`
    /// when a keyed entry declares another id, plus everything
    /// [`AreaCatalog::from_areas`] rejects.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let areas = match serde_json::from_str::<CatalogSource>(json)? {
            CatalogSource::List(areas) => areas,
            CatalogSource::Keyed(map) => map
                .into_iter()
                .map(|(key, entry)| match entry.id {
                    Some(id) if id.as_str() != key => Err(CatalogError::KeyMismatch {
                        key,
                        id: id.to_string(),
                    }),
                    _ => Ok(Area {
                        id: AreaId::new(key),
                        description: entry.description,
                        path: entry.path,
                    }),
                })
                .collect::<Result<Vec<_>, _>>()?,
        };
        let catalog = Self::from_areas(areas)?;
        tracing::debug!("Loaded area catalog with {} areas", catalog.len());
        Ok(catalog)
    }

    /// Look up an area by key
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Area> {
        self.areas.get(&AreaId::new(id))
    }

    /// Whether the key names a known area
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of areas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Whether the catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Areas in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Area> {
        self.areas.values()
    }
}
