//! View-model derivation
//!
//! Runs on every state change, in five stages:
//! - **filter**: drop breaks without tags for the active version, then apply the query
//! - **explode**: one [`SingleBreak`] per tag of the active version
//! - **sort**: stable, by (section key, row key)
//! - **merge**: adjacent rows with equal keys concatenate their descriptions
//! - **group**: partition by section key in first-encounter order

use crate::state::{Arrangement, ListState};
use breaks_model::{AreaId, ValidatedBreak, Wcag2Catalog, Wcag2Criterion, WcagVersion};
use indexmap::IndexMap;

/// The one requirement a [`SingleBreak`] is tagged with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag<'a> {
    /// WCAG-2 success criterion
    Wcag2(&'a Wcag2Criterion),
    /// WCAG-3 requirement
    Wcag3(&'a str),
}

impl<'a> Tag<'a> {
    /// Sort key: numeric encoding for WCAG-2, raw text for WCAG-3
    #[must_use]
    pub fn sort_key(self) -> SortKey<'a> {
        match self {
            Self::Wcag2(criterion) => SortKey::Number(criterion.sort_key()),
            Self::Wcag3(requirement) => SortKey::Text(requirement),
        }
    }

    /// Version this tag belongs to
    #[must_use]
    pub fn version(self) -> WcagVersion {
        match self {
            Self::Wcag2(_) => WcagVersion::V2,
            Self::Wcag3(_) => WcagVersion::V3,
        }
    }
}

/// Ordering and identity key of a section or row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SortKey<'a> {
    /// Encoded WCAG-2 criterion
    Number(u64),
    /// Area id or WCAG-3 requirement
    Text(&'a str),
}

/// A break narrowed to a single tag of the active version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleBreak<'a> {
    /// Id of the source break (the first one, after merging)
    pub id: &'a str,
    /// Area the break lives in
    pub location: &'a AreaId,
    /// The one tag
    pub tag: Tag<'a>,
    /// Description paragraphs, concatenated across merged rows
    pub description: Vec<&'a str>,
    /// Photosensitivity flag of the source break
    pub photosensitivity: bool,
    /// Discussion notes of the source break
    pub discussion_items: Option<&'a [String]>,
}

impl<'a> SingleBreak<'a> {
    fn area_key(&self) -> SortKey<'a> {
        SortKey::Text(self.location.as_str())
    }
}

/// One outer section of the view model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    /// Section key shared by every row
    pub key: SortKey<'a>,
    /// Rows in display order; never empty
    pub rows: Vec<SingleBreak<'a>>,
}

impl<'a> Group<'a> {
    /// First row, which supplies the section label
    #[must_use]
    pub fn head(&self) -> &SingleBreak<'a> {
        &self.rows[0]
    }
}

/// Derivation pipeline for one list state
#[derive(Debug, Clone, Copy)]
pub struct BreakPipeline<'s> {
    wcag2: &'s Wcag2Catalog,
    arrangement: Arrangement,
    version: WcagVersion,
    query: &'s str,
}

impl<'s> BreakPipeline<'s> {
    /// Create pipeline for `state`, using `wcag2` for title matching
    #[must_use]
    pub fn new(wcag2: &'s Wcag2Catalog, state: &'s ListState) -> Self {
        Self {
            wcag2,
            arrangement: state.arrangement,
            version: state.version,
            query: &state.query,
        }
    }

    /// Run every stage
    #[must_use]
    pub fn derive<'a>(&self, breaks: &'a [ValidatedBreak]) -> Vec<Group<'a>> {
        let kept: Vec<&ValidatedBreak> = breaks.iter().filter(|b| self.matches(b)).collect();
        let mut rows = self.explode(&kept);
        self.sort(&mut rows);
        let rows = self.merge_adjacent(rows);
        let groups = self.group(rows);

        tracing::debug!(
            "Derived {} sections from {} of {} breaks ({} {}, query '{}')",
            groups.len(),
            kept.len(),
            breaks.len(),
            self.arrangement,
            self.version,
            self.query
        );
        groups
    }

    /// Whether a break survives the filter stage
    #[must_use]
    pub fn matches(&self, brk: &ValidatedBreak) -> bool {
        if !brk.has_tags(self.version) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }

        let query = self.query.to_lowercase();
        let contains = |text: &str| text.to_lowercase().contains(&query);

        if contains(brk.location().as_str()) || brk.description().iter().any(|d| contains(d)) {
            return true;
        }
        match self.version {
            WcagVersion::V2 => brk.wcag2().into_iter().flatten().any(|c| {
                c.as_str().contains(self.query)
                    || self.wcag2.title(c.as_str()).is_some_and(|t| contains(t))
            }),
            WcagVersion::V3 => brk.wcag3().into_iter().flatten().any(|r| contains(r)),
        }
    }

    /// One row per tag of the active version, in break then tag order
    #[must_use]
    pub fn explode<'a>(&self, breaks: &[&'a ValidatedBreak]) -> Vec<SingleBreak<'a>> {
        let mut rows = Vec::new();
        for &brk in breaks {
            let tags: Vec<Tag<'a>> = match self.version {
                WcagVersion::V2 => brk.wcag2().into_iter().flatten().map(Tag::Wcag2).collect(),
                WcagVersion::V3 => brk
                    .wcag3()
                    .into_iter()
                    .flatten()
                    .map(|r| Tag::Wcag3(r.as_str()))
                    .collect(),
            };
            for tag in tags {
                rows.push(SingleBreak {
                    id: brk.id(),
                    location: brk.location(),
                    tag,
                    description: brk.description().iter().map(String::as_str).collect(),
                    photosensitivity: brk.is_photosensitive(),
                    discussion_items: brk.discussion_items(),
                });
            }
        }
        rows
    }

    /// Section key of a row under the active arrangement
    #[must_use]
    pub fn section_key<'a>(&self, row: &SingleBreak<'a>) -> SortKey<'a> {
        match self.arrangement {
            Arrangement::Area => row.area_key(),
            Arrangement::Failure => row.tag.sort_key(),
        }
    }

    /// Row key (the complementary field) under the active arrangement
    #[must_use]
    pub fn row_key<'a>(&self, row: &SingleBreak<'a>) -> SortKey<'a> {
        match self.arrangement {
            Arrangement::Area => row.tag.sort_key(),
            Arrangement::Failure => row.area_key(),
        }
    }

    /// Stable ascending sort by (section key, row key)
    pub fn sort(&self, rows: &mut [SingleBreak<'_>]) {
        rows.sort_by(|a, b| {
            self.section_key(a)
                .cmp(&self.section_key(b))
                .then_with(|| self.row_key(a).cmp(&self.row_key(b)))
        });
    }

    /// Fold each row into its predecessor when both keys match
    #[must_use]
    pub fn merge_adjacent<'a>(&self, rows: Vec<SingleBreak<'a>>) -> Vec<SingleBreak<'a>> {
        let mut merged: Vec<SingleBreak<'a>> = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(prev) = merged.last_mut() {
                if self.section_key(prev) == self.section_key(&row)
                    && self.row_key(prev) == self.row_key(&row)
                {
                    prev.description.extend(row.description);
                    continue;
                }
            }
            merged.push(row);
        }
        merged
    }

    /// Partition by section key, keeping first-encounter order
    #[must_use]
    pub fn group<'a>(&self, rows: Vec<SingleBreak<'a>>) -> Vec<Group<'a>> {
        let mut sections: IndexMap<SortKey<'a>, Vec<SingleBreak<'a>>> = IndexMap::new();
        for row in rows {
            sections.entry(self.section_key(&row)).or_default().push(row);
        }
        sections
            .into_iter()
            .map(|(key, rows)| Group { key, rows })
            .collect()
    }
}
