//! High-level public API for web archive extraction.

use std::fs;
use std::path::Path;

use crate::ArchiveDocument;
use crate::DestDir;
use crate::EventSink;
use crate::ExtractConfig;
use crate::MaterializeReport;
use crate::Materializer;
use crate::NoopEvents;
use crate::Result;

/// Extracts a web archive container into the given output directory.
///
/// Convenience wrapper over [`ArchiveDocument::open`] and
/// [`Materializer::materialize`]: the output directory is created if
/// missing, then validated into a [`DestDir`].
///
/// # Errors
///
/// Returns an error if the container cannot be read or decoded, does not
/// match the archive schema, exceeds the configured resource count, or if
/// writing to the destination fails.
///
/// # Examples
///
/// ```no_run
/// use unwebarchive_core::ExtractConfig;
/// use unwebarchive_core::extract_webarchive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ExtractConfig::default();
/// let report = extract_webarchive("page.webarchive", "page", &config)?;
/// println!("wrote {} resources", report.resources_written);
/// # Ok(())
/// # }
/// ```
pub fn extract_webarchive<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
) -> Result<MaterializeReport> {
    extract_webarchive_with_events(archive_path, output_dir, config, &mut NoopEvents)
}

/// Like [`extract_webarchive`], with a caller-supplied [`EventSink`] for
/// per-resource progress and skip reporting.
pub fn extract_webarchive_with_events<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_dir: Q,
    config: &ExtractConfig,
    events: &mut dyn EventSink,
) -> Result<MaterializeReport> {
    let doc = ArchiveDocument::open(archive_path)?;

    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let dest = DestDir::new(output_dir)?;

    Materializer::new(config).materialize(doc, &dest, events)
}
