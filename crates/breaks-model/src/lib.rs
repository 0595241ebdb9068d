//! Break Model
//!
//! Domain types for documented accessibility breaks and the schema that
//! turns untrusted annotation payloads into canonical records.
//!
//! # Overview
//!
//! - **RawBreakRecord**: loosely-typed record straight from the extractor
//! - **BreakValidator**: normalizes single-or-list fields, checks WCAG-2
//!   membership and the "at least one WCAG version" rule
//! - **ValidatedBreak**: canonical, immutable break
//! - **Wcag2Catalog** / **AreaCatalog**: read-only lookup tables injected
//!   into the validator and the presenter
//!
//! # Example
//!
//! ```rust
//! use breaks_model::{BreakValidator, RawBreakRecord, Wcag2Catalog};
//!
//! let catalog = Wcag2Catalog::standard();
//! let raw = RawBreakRecord::new("pages/index.astro-42")
//!     .with_field("description", "Logo has no alt text")
//!     .with_field("location", "Home")
//!     .with_field("wcag2", "1.1.1");
//!
//! let brk = BreakValidator::new(&catalog).validate(&raw).unwrap();
//! assert_eq!(brk.description(), ["Logo has no alt text".to_string()]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod area;
pub mod error;
pub mod record;
pub mod validation;
pub mod wcag;

// Re-exports
pub use area::{Area, AreaCatalog, AreaId};
pub use error::{CatalogError, RecordError, ValidationError, ValidationErrors};
pub use record::{fields, RawBreakRecord, ValidatedBreak};
pub use validation::BreakValidator;
pub use wcag::{Wcag2Catalog, Wcag2Criterion, WcagVersion};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with break records
    pub use crate::{
        Area, AreaCatalog, AreaId, BreakValidator, RawBreakRecord, ValidatedBreak, Wcag2Catalog,
        Wcag2Criterion, WcagVersion,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
