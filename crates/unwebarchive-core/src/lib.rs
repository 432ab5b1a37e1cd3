//! Web archive extraction library with safe path resolution and offline
//! link rewriting.
//!
//! `unwebarchive-core` decodes a saved web page container (a property-list
//! document holding an HTML page and its linked resources) and materializes
//! it as a standalone directory tree, rewriting textual resources so the
//! page renders offline. Hostile locators (traversal attempts, unsupported
//! schemes, path collisions) skip the single resource and are reported;
//! they never abort the run.
//!
//! # Examples
//!
//! ```no_run
//! use unwebarchive_core::ExtractConfig;
//! use unwebarchive_core::extract_webarchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ExtractConfig::default();
//! let report = extract_webarchive("page.webarchive", "page", &config)?;
//! println!(
//!     "wrote {} resources, skipped {}",
//!     report.resources_written, report.resources_skipped
//! );
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod error;
pub mod materialize;
pub mod report;
pub mod resolve;
pub mod rewrite;
pub mod types;

// Re-export main API types
pub use api::extract_webarchive;
pub use api::extract_webarchive_with_events;
pub use archive::ArchiveDocument;
pub use archive::ResourceRecord;
pub use config::ExtractConfig;
pub use error::ExtractError;
pub use error::Result;
pub use error::SkipReason;
pub use materialize::Materializer;
pub use report::EventSink;
pub use report::MaterializeReport;
pub use report::NoopEvents;
pub use report::SkipRecord;
pub use resolve::MAIN_RESOURCE_NAME;
pub use resolve::PathPlanner;
pub use resolve::ResourceRole;
pub use rewrite::RewriteKind;

// Re-export types module for easier access
pub use types::DestDir;
pub use types::OutputPath;
