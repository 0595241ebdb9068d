//! Command implementations
//!
//! Each command runs a prefix of the pipeline and returns its result; the
//! binary decides how to print it.

use crate::config::SiteConfig;
use anyhow::Context;
use breaks_extract::Extractor;
use breaks_model::{AreaCatalog, BreakValidator, RawBreakRecord, ValidatedBreak, Wcag2Catalog};
use breaks_present::{BreakPipeline, HtmlRenderer, ListState};
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt::Write as _;

/// Extract raw records from the configured source root
///
/// # Errors
/// Unreadable sources or malformed annotations.
pub fn scan(config: &SiteConfig) -> anyhow::Result<Vec<RawBreakRecord>> {
    Extractor::new(&config.extract)
        .scan_dir(&config.source_root)
        .with_context(|| format!("scanning {}", config.source_root.display()))
}

/// Extract and validate
///
/// # Errors
/// Any scan error, or every record that fails validation.
pub fn validate(config: &SiteConfig, wcag2: &Wcag2Catalog) -> anyhow::Result<Vec<ValidatedBreak>> {
    let raw = scan(config)?;
    let breaks = BreakValidator::new(wcag2)
        .validate_all(&raw)
        .context("validating breaks")?;
    Ok(breaks)
}

/// Load the area catalog
///
/// # Errors
/// Unreadable or malformed catalog file.
pub fn load_areas(config: &SiteConfig) -> anyhow::Result<AreaCatalog> {
    let path = &config.sections_file;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading area catalog {}", path.display()))?;
    let areas = AreaCatalog::from_json_str(&json)
        .with_context(|| format!("loading area catalog {}", path.display()))?;
    tracing::info!("Loaded {} areas from {}", areas.len(), path.display());
    Ok(areas)
}

/// Break counts from a full consistency check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Validated breaks
    pub breaks: usize,
    /// Breaks per area, in catalog order (zero counts included)
    pub areas: IndexMap<String, usize>,
    /// Breaks per WCAG-2 criterion, in criterion order
    pub wcag2: IndexMap<String, usize>,
    /// Breaks per WCAG-3 requirement, alphabetical
    pub wcag3: IndexMap<String, usize>,
}

impl CheckReport {
    /// Tally validated breaks against the area catalog
    #[must_use]
    pub fn new(breaks: &[ValidatedBreak], areas: &AreaCatalog) -> Self {
        let mut per_area: IndexMap<String, usize> =
            areas.iter().map(|a| (a.id.to_string(), 0)).collect();
        let mut wcag2 = Vec::new();
        let mut wcag3: IndexMap<String, usize> = IndexMap::new();

        for brk in breaks {
            *per_area.entry(brk.location().to_string()).or_default() += 1;
            wcag2.extend(brk.wcag2().into_iter().flatten());
            for requirement in brk.wcag3().into_iter().flatten() {
                *wcag3.entry(requirement.clone()).or_default() += 1;
            }
        }

        wcag2.sort_by_key(|c| c.sort_key());
        let mut per_criterion: IndexMap<String, usize> = IndexMap::new();
        for criterion in wcag2 {
            *per_criterion.entry(criterion.to_string()).or_default() += 1;
        }
        wcag3.sort_keys();

        Self {
            breaks: breaks.len(),
            areas: per_area,
            wcag2: per_criterion,
            wcag3,
        }
    }

    /// Human-readable report
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("Breaks: {}\n", self.breaks);
        for (title, counts) in [
            ("Areas", &self.areas),
            ("WCAG 2", &self.wcag2),
            ("WCAG 3", &self.wcag3),
        ] {
            let _ = writeln!(out, "{title}:");
            for (key, count) in counts {
                let _ = writeln!(out, "  {key}: {count}");
            }
        }
        out
    }
}

/// Extract, validate and resolve every area reference
///
/// # Errors
/// Any scan, catalog or validation error, including unknown areas.
pub fn check(config: &SiteConfig, wcag2: &Wcag2Catalog) -> anyhow::Result<CheckReport> {
    let areas = load_areas(config)?;
    let raw = scan(config)?;
    let breaks = BreakValidator::new(wcag2)
        .with_areas(&areas)
        .validate_all(&raw)
        .context("checking breaks")?;
    let report = CheckReport::new(&breaks, &areas);
    tracing::info!(
        "{} breaks across {} areas check out",
        report.breaks,
        report.areas.values().filter(|n| **n > 0).count()
    );
    Ok(report)
}

/// Full pipeline: HTML form and list for a query string (`a=..&q=..&v=..`)
///
/// # Errors
/// Any scan, catalog, validation or render error.
pub fn render(config: &SiteConfig, wcag2: &Wcag2Catalog, query: &str) -> anyhow::Result<String> {
    let areas = load_areas(config)?;
    let breaks = validate(config, wcag2)?;
    let state = ListState::from_query(query);
    let groups = BreakPipeline::new(wcag2, &state).derive(&breaks);
    let html = HtmlRenderer::new(wcag2, &areas, &config.museum_base_url)
        .render(&state, &groups)
        .context("rendering break list")?;
    Ok(html)
}
