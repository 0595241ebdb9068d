//! Breaks command-line front end
//!
//! Configuration loading, logging setup and the command implementations
//! behind the `breaks` binary.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::CheckReport;
pub use config::SiteConfig;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
