//! Extraction settings
//!
//! Which files count as templates or narratives, and which keywords
//! introduce annotation blocks.

use crate::parsers::{NarrativeParser, ParserRegistry, TemplateParser};
use serde::{Deserialize, Serialize};

/// Extraction configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractConfig {
    /// Extension of template files (without dot)
    pub template_extension: String,
    /// Directory below the source root holding narrative files
    pub narrative_dir: String,
    /// Extension of narrative files (without dot)
    pub narrative_extension: String,
    /// Keyword introducing a break block (`@break`)
    pub break_keyword: String,
    /// Keyword introducing the default location block (`@breaklocation`)
    pub location_keyword: String,
}

impl ExtractConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With template extension
    #[inline]
    #[must_use]
    pub fn with_template_extension(mut self, ext: impl Into<String>) -> Self {
        self.template_extension = ext.into();
        self
    }

    /// With narrative directory
    #[inline]
    #[must_use]
    pub fn with_narrative_dir(mut self, dir: impl Into<String>) -> Self {
        self.narrative_dir = dir.into();
        self
    }

    /// Parsers for this configuration
    #[must_use]
    pub fn registry(&self) -> ParserRegistry {
        let mut registry = ParserRegistry::new();
        registry.register(TemplateParser::new(
            &self.template_extension,
            &self.break_keyword,
            &self.location_keyword,
        ));
        registry.register(NarrativeParser::new(
            &self.narrative_dir,
            &self.narrative_extension,
        ));
        registry
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            template_extension: "astro".to_string(),
            narrative_dir: "content".to_string(),
            narrative_extension: "md".to_string(),
            break_keyword: "break".to_string(),
            location_keyword: "breaklocation".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ExtractConfig = serde_yaml::from_str("narrative_dir: stories").unwrap();
        assert_eq!(config.narrative_dir, "stories");
        assert_eq!(config.template_extension, "astro");
    }

    #[test]
    fn unknown_settings_are_rejected() {
        assert!(serde_yaml::from_str::<ExtractConfig>("narative_dir: typo").is_err());
    }

    #[test]
    fn builder_overrides() {
        let config = ExtractConfig::new()
            .with_template_extension("html")
            .with_narrative_dir("");
        assert_eq!(config.template_extension, "html");
        assert!(config.narrative_dir.is_empty());
    }
}
