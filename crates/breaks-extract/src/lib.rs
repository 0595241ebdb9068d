//! Break Extraction
//!
//! Locates break annotations in site sources and turns each into a
//! [`RawBreakRecord`](breaks_model::RawBreakRecord).
//!
//! # Supported Sources
//!
//! - **Templates** (`.astro`): `/** @break ... */` comment blocks, with an
//!   optional `/** @breaklocation Area */` default
//! - **Narratives** (`content/**/*.md`): a `breaks` list in the front-matter,
//!   with an optional file-level `breaklocation`
//!
//! # Example
//!
//! ```rust
//! use breaks_extract::{Extractor, SourceFile};
//!
//! let extractor = Extractor::default();
//! let records = extractor
//!     .extract(&[SourceFile::new(
//!         "pages/index.astro",
//!         "/** @breaklocation Home */\n/** @break wcag3: Alt text */",
//!     )])
//!     .unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].id, "pages/index.astro-27");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod parsers;
pub mod scanner;

// Re-exports
pub use config::ExtractConfig;
pub use error::{ExtractError, ExtractResult};
pub use parsers::{NarrativeParser, ParserRegistry, SourceParser, TemplateParser};
pub use scanner::{Extractor, SourceFile};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for extraction
    pub use crate::{ExtractConfig, ExtractError, Extractor, SourceFile, SourceParser};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
