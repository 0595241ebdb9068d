//! Source scanner - Main entry point
//!
//! Provides:
//! - Source discovery under a root directory
//! - Dispatch of each source to the parser registered for its path
//! - Ordered, deterministic collection of raw records

use crate::config::ExtractConfig;
use crate::error::{ExtractError, ExtractResult};
use crate::parsers::ParserRegistry;
use breaks_model::RawBreakRecord;
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};

/// One source file, already read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path relative to the source root, `/`-separated
    pub path: String,
    /// File contents
    pub content: String,
}

impl SourceFile {
    /// Create source from a relative path and its text
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Break extractor over a set of source files
///
/// Files no parser claims produce no records. Sources are scanned in
/// parallel, but records always come back in source order, then block or
/// entry order within each file.
#[derive(Debug)]
pub struct Extractor {
    parsers: ParserRegistry,
}

impl Extractor {
    /// Create extractor for a configuration
    #[must_use]
    pub fn new(config: &ExtractConfig) -> Self {
        Self::with_registry(config.registry())
    }

    /// Create extractor over explicit parsers
    #[must_use]
    pub fn with_registry(parsers: ParserRegistry) -> Self {
        Self { parsers }
    }

    /// Extract raw records from in-memory sources
    ///
    /// # Errors
    /// The first `ExtractError` in source order, if any source is malformed.
    pub fn extract(&self, sources: &[SourceFile]) -> ExtractResult<Vec<RawBreakRecord>> {
        let per_file: Vec<ExtractResult<Vec<RawBreakRecord>>> = sources
            .par_iter()
            .map(|source| self.extract_one(source))
            .collect();

        let mut records = Vec::new();
        for result in per_file {
            records.extend(result?);
        }

        tracing::info!(
            "Extracted {} raw breaks from {} sources",
            records.len(),
            sources.len()
        );
        Ok(records)
    }

    fn extract_one(&self, source: &SourceFile) -> ExtractResult<Vec<RawBreakRecord>> {
        match self.parsers.find_for_path(Path::new(&source.path)) {
            Some(parser) => parser.parse(&source.path, &source.content),
            None => {
                tracing::debug!("No parser for {}, skipping", source.path);
                Ok(Vec::new())
            }
        }
    }

    /// Relative paths of every parseable file under `root`, sorted
    ///
    /// # Errors
    /// `ExtractError::Io` if a directory cannot be listed.
    pub fn discover(&self, root: &Path) -> ExtractResult<Vec<String>> {
        let mut found = Vec::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            let entries = std::fs::read_dir(&dir).map_err(|e| ExtractError::io_error(&dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| ExtractError::io_error(&dir, e))?;
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .map_err(|e| ExtractError::io_error(&path, e))?;

                if file_type.is_dir() {
                    pending.push(path);
                } else if let Some(relative) = relative_path(root, &path) {
                    if self.parsers.find_for_path(Path::new(&relative)).is_some() {
                        found.push(relative);
                    }
                }
            }
        }

        found.sort();
        tracing::debug!("Discovered {} sources under {}", found.len(), root.display());
        Ok(found)
    }

    /// Discover and read every parseable file under `root`
    ///
    /// # Errors
    /// `ExtractError::Io` on discovery or read failure.
    pub fn read_sources(&self, root: &Path) -> ExtractResult<Vec<SourceFile>> {
        self.discover(root)?
            .into_iter()
            .map(|relative| {
                let full: PathBuf = root.join(&relative);
                let content =
                    std::fs::read_to_string(&full).map_err(|e| ExtractError::io_error(&full, e))?;
                Ok(SourceFile::new(relative, content))
            })
            .collect()
    }

    /// Discover, read and extract every source under `root`
    ///
    /// # Errors
    /// Any `ExtractError` from reading or parsing.
    pub fn scan_dir(&self, root: &Path) -> ExtractResult<Vec<RawBreakRecord>> {
        let sources = self.read_sources(root)?;
        self.extract(&sources)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(&ExtractConfig::default())
    }
}

/// `path` relative to `root` with `/` separators
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();
    parts.map(|p| p.join("/"))
}
