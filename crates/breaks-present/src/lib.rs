//! Break List Presenter
//!
//! Turns validated breaks into the interactive list: UI state synced with
//! the URL, the filter/explode/sort/merge/group derivation, and HTML output.
//!
//! # Overview
//!
//! - **ListState**: `{arrangement, version, query}`, parsed leniently from
//!   `a`, `v` and `q` query parameters
//! - **ListController**: owns the state, pushes a complete URL on submit and
//!   re-reads it on history navigation
//! - **BreakPipeline**: derives the grouped view model for one state
//! - **HtmlRenderer**: renders the form and the grouped list
//!
//! # Example
//!
//! ```rust
//! use breaks_model::{Area, AreaCatalog, RawBreakRecord, BreakValidator, Wcag2Catalog};
//! use breaks_present::{BreakPipeline, HtmlRenderer, ListState};
//!
//! let wcag2 = Wcag2Catalog::standard();
//! let areas = AreaCatalog::from_areas([Area::new("Home", "")]).unwrap();
//! let raw = RawBreakRecord::new("pages/index.astro-0")
//!     .with_field("description", "Logo has no alt text")
//!     .with_field("location", "Home")
//!     .with_field("wcag2", "1.1.1");
//! let breaks = vec![BreakValidator::new(&wcag2).validate(&raw).unwrap()];
//!
//! let state = ListState::from_query("?a=failure&v=2");
//! let groups = BreakPipeline::new(&wcag2, &state).derive(&breaks);
//! let html = HtmlRenderer::new(&wcag2, &areas, "/museum/")
//!     .render(&state, &groups)
//!     .unwrap();
//! assert!(html.contains("<h3>1.1.1: Non-text Content</h3>"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod history;
pub mod pipeline;
pub mod render;
pub mod state;

// Re-exports
pub use error::RenderError;
pub use history::{History, InMemoryHistory, ListController, ListenerId, Location, PopState};
pub use pipeline::{BreakPipeline, Group, SingleBreak, SortKey, Tag};
pub use render::{render_form, HtmlRenderer};
pub use state::{Arrangement, ListState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for presenting breaks
    pub use crate::{
        Arrangement, BreakPipeline, HtmlRenderer, ListController, ListState, RenderError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
