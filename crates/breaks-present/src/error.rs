//! Error types for rendering

use breaks_model::WcagVersion;

/// Errors while rendering the break list
///
/// Rendering fails closed: a break that cannot be labelled aborts the whole
/// render instead of being omitted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Break location is not in the area catalog
    #[error("break '{id}': area '{area}' is not in the area catalog")]
    UnresolvedArea { id: String, area: String },

    /// Renderer's WCAG-2 catalog has no title for a tag
    #[error("break '{id}': no title for success criterion '{criterion}'")]
    UnknownCriterion { id: String, criterion: String },

    /// Row carries a tag for a different version than the list state
    #[error("break '{id}': no WCAG {version} tag")]
    MissingTag { id: String, version: WcagVersion },
}

impl RenderError {
    /// Create unresolved area error
    pub fn unresolved_area(id: impl Into<String>, area: impl Into<String>) -> Self {
        Self::UnresolvedArea {
            id: id.into(),
            area: area.into(),
        }
    }
}
