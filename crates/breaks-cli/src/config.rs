//! Site configuration
//!
//! Read from `breaks.toml` when present; every field has a default so an
//! empty or missing file describes the standard site layout.

use anyhow::Context;
use breaks_extract::ExtractConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "breaks.toml";

/// Configuration for one site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory scanned for templates and narratives
    pub source_root: PathBuf,
    /// Area catalog (JSON)
    pub sections_file: PathBuf,
    /// Prefix joined with an area path to form its link
    pub museum_base_url: String,
    /// Source formats and annotation keywords
    pub extract: ExtractConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            sections_file: PathBuf::from("src/content/sections.json"),
            museum_base_url: "/wai-conformance-model-test/museum/".to_string(),
            extract: ExtractConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With source root
    #[inline]
    #[must_use]
    pub fn with_source_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.source_root = root.into();
        self
    }

    /// With area catalog file
    #[inline]
    #[must_use]
    pub fn with_sections_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.sections_file = file.into();
        self
    }

    /// With link prefix for areas
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.museum_base_url = url.into();
        self
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Invalid TOML or unknown settings.
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid site configuration")
    }

    /// Load `path`, or `breaks.toml` in the working directory if it exists,
    /// or the defaults
    ///
    /// # Errors
    /// An explicit `path` that cannot be read, or any file that does not parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !explicit && !path.exists() {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("loading config {}", path.display()))?;
        tracing::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(SiteConfig::from_toml_str("").unwrap(), SiteConfig::default());
    }

    #[test]
    fn nested_extract_settings() {
        let config = SiteConfig::from_toml_str(
            r#"
source_root = "site/src"
museum_base_url = "/museum/"

[extract]
narrative_dir = "stories"
"#,
        )
        .unwrap();
        assert_eq!(config.source_root, PathBuf::from("site/src"));
        assert_eq!(config.museum_base_url, "/museum/");
        assert_eq!(config.extract.narrative_dir, "stories");
        assert_eq!(config.extract.template_extension, "astro");
    }

    #[test]
    fn unknown_settings_are_rejected() {
        assert!(SiteConfig::from_toml_str("sorce_root = \"x\"").is_err());
        assert!(SiteConfig::from_toml_str("[extract]\nkeyword = \"x\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn explicit_file_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        std::fs::write(&path, "sections_file = \"areas.json\"\n").unwrap();
        let config = SiteConfig::load(Some(&path)).unwrap();
        assert_eq!(config.sections_file, PathBuf::from("areas.json"));
    }

    #[test]
    fn builders_override() {
        let config = SiteConfig::new()
            .with_source_root("fixtures")
            .with_sections_file("fixtures/areas.json")
            .with_base_url("/");
        assert_eq!(config.source_root, PathBuf::from("fixtures"));
        assert_eq!(config.museum_base_url, "/");
    }
}
