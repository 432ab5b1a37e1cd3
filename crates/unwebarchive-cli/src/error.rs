//! Error conversion utilities for CLI.
//!
//! Converts unwebarchive-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use unwebarchive_core::ExtractError;

/// Converts `ExtractError` to a user-friendly anyhow error with context.
pub fn convert_extract_error(err: ExtractError, archive: &Path) -> anyhow::Error {
    match err {
        ExtractError::Decode(e) => {
            anyhow!(
                "Failed to decode '{}': {e}\n\
                 HINT: The file must be a web archive container (binary or XML property list).",
                archive.display()
            )
        }
        ExtractError::MalformedArchive(reason) => {
            anyhow!(
                "Invalid web archive '{}': {reason}\n\
                 HINT: A web archive must hold a WebMainResource entry with a URL and payload.",
                archive.display()
            )
        }
        ExtractError::ResourceLimit { count, max } => {
            anyhow!(
                "Archive '{}' lists {count} resources, limit is {max}\n\
                 HINT: Use --max-resources to raise the limit if the archive is trusted.",
                archive.display()
            )
        }
        ExtractError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a core result about archive operations.
pub fn add_archive_context<T>(
    result: Result<T, ExtractError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extract_error(e, archive))
}
