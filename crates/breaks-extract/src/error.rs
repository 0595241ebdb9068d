//! Error types for break extraction
//!
//! Every variant names the source file, and payload errors also carry the
//! match offset, so a broken fixture can be found without re-running.

use std::path::PathBuf;

/// Errors while scanning sources for break annotations
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// IO error during file discovery or read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Annotation block payload is not valid YAML
    #[error("malformed break payload in {path} at offset {offset}: {message}")]
    Payload {
        path: String,
        offset: usize,
        message: String,
    },

    /// Narrative front-matter is not valid YAML
    #[error("malformed front-matter in {path}: {message}")]
    FrontMatter { path: String, message: String },

    /// Valid YAML of the wrong shape (payload not a mapping, `breaks` not a list)
    #[error("unexpected payload shape in {path} at {position}: {message}")]
    Shape {
        path: String,
        position: String,
        message: String,
    },
}

impl ExtractError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create payload syntax error for a template block
    pub fn payload(path: impl Into<String>, offset: usize, message: impl Into<String>) -> Self {
        Self::Payload {
            path: path.into(),
            offset,
            message: message.into(),
        }
    }

    /// Create shape error at a described position (`offset 12`, `breaks[3]`)
    pub fn shape(
        path: impl Into<String>,
        position: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Shape {
            path: path.into(),
            position: position.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;
