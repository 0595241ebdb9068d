//! Source parsers for break annotations
//!
//! Provides extraction from the two source formats that carry breaks:
//! - Template files: `/** @break ... */` comment blocks with a YAML payload
//! - Narrative files: a `breaks` list in leading YAML front-matter
//!
//! Extraction is two composable stages, block location ([`blocks`]) and
//! payload parsing ([`payload`]), so both can be exercised without file I/O.

use crate::error::ExtractError;
use breaks_model::RawBreakRecord;
use std::path::Path;

pub mod blocks;
pub mod payload;

mod narrative;
mod template;

pub use narrative::NarrativeParser;
pub use template::TemplateParser;

/// Parser trait for turning one source file into raw break records
///
/// Implement this trait to add support for new source formats.
pub trait SourceParser: Send + Sync + 'static {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Extract raw records from `content`
    ///
    /// `path` is the source-root-relative path used to build record ids.
    ///
    /// # Errors
    /// `ExtractError` when an annotation is present but malformed.
    fn parse(&self, path: &str, content: &str) -> Result<Vec<RawBreakRecord>, ExtractError>;

    /// Check if this parser handles the given relative path
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions().contains(&ext))
    }

    /// Supported file extensions (without dot)
    fn extensions(&self) -> Vec<&str>;

    /// Parser priority (higher = tried first when multiple parsers match)
    fn priority(&self) -> i32 {
        0
    }
}

/// Ordered set of parsers, consulted by path
pub struct ParserRegistry {
    parsers: Vec<Box<dyn SourceParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field(
                "parsers",
                &self.parsers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("extensions", &self.all_extensions())
            .finish()
    }
}

impl ParserRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parsers: Vec::new(),
        }
    }

    /// Register a parser
    pub fn register<P: SourceParser>(&mut self, parser: P) {
        self.parsers.push(Box::new(parser));
        // Sort by priority (higher first)
        self.parsers
            .sort_by_key(|p| std::cmp::Reverse(p.priority()));
    }

    /// Find parser for a relative path
    #[must_use]
    pub fn find_for_path(&self, path: &Path) -> Option<&dyn SourceParser> {
        self.parsers.iter().find(|p| p.can_parse(path)).map(|p| &**p)
    }

    /// Get all registered extensions
    #[must_use]
    pub fn all_extensions(&self) -> Vec<&str> {
        self.parsers
            .iter()
            .flat_map(|p| p.extensions())
            .collect()
    }

    /// Number of registered parsers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Whether no parser is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

/// Remove the generated-id key a payload may carry and attach the real id
pub(crate) fn into_record(id: String, mut fields: payload::Fields) -> RawBreakRecord {
    fields.shift_remove("id");
    RawBreakRecord { id, fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractConfig;

    struct TestParser;

    impl SourceParser for TestParser {
        fn name(&self) -> &'static str {
            "test"
        }

        fn parse(&self, path: &str, _content: &str) -> Result<Vec<RawBreakRecord>, ExtractError> {
            Ok(vec![RawBreakRecord::new(format!("{path}-0"))])
        }

        fn extensions(&self) -> Vec<&str> {
            vec!["test"]
        }
    }

    #[test]
    fn parser_can_parse_by_extension() {
        let parser = TestParser;

        assert!(parser.can_parse(Path::new("file.test")));
        assert!(parser.can_parse(Path::new("pages/file.test")));
        assert!(!parser.can_parse(Path::new("file.txt")));
        assert!(!parser.can_parse(Path::new("file")));
    }

    #[test]
    fn registry_find_parser() {
        let mut registry = ParserRegistry::new();
        registry.register(TestParser);

        let found = registry.find_for_path(Path::new("file.test"));
        assert_eq!(found.map(|p| p.name()), Some("test"));
        assert!(registry.find_for_path(Path::new("file.txt")).is_none());
    }

    #[test]
    fn default_registry_covers_both_formats() {
        let registry = ExtractConfig::default().registry();
        assert_eq!(registry.len(), 2);
        let exts = registry.all_extensions();
        assert!(exts.contains(&"astro"));
        assert!(exts.contains(&"md"));
    }

    #[test]
    fn registry_debug() {
        let registry = ExtractConfig::default().registry();
        let debug_str = format!("{registry:?}");
        assert!(debug_str.contains("ParserRegistry"));
        assert!(debug_str.contains("template"));
    }

    #[test]
    fn generated_id_overrides_payload_id() {
        let mut fields = payload::Fields::new();
        fields.insert("id".into(), "spoofed".into());
        fields.insert("location".into(), "Home".into());
        let record = into_record("pages/a.astro-0".into(), fields);
        assert_eq!(record.id, "pages/a.astro-0");
        assert!(record.get("id").is_none());
    }
}
