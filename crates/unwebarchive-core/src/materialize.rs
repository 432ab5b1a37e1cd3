//! Per-resource orchestration: resolve, rewrite, write.

use crate::ArchiveDocument;
use crate::DestDir;
use crate::EventSink;
use crate::ExtractConfig;
use crate::ExtractError;
use crate::MaterializeReport;
use crate::ResourceRecord;
use crate::Result;
use crate::resolve::PathPlanner;
use crate::resolve::ResourceRole;
use crate::rewrite;
use crate::rewrite::RewriteKind;
use std::fs;
use std::time::Instant;

/// Drives one extraction run over a decoded [`ArchiveDocument`].
///
/// Resources are processed strictly in container order, entry page first,
/// for deterministic and diffable output. A per-resource anomaly becomes a
/// reported skip; only document-level and I/O failures abort the run.
#[derive(Debug)]
pub struct Materializer<'a> {
    config: &'a ExtractConfig,
}

impl<'a> Materializer<'a> {
    /// Creates a materializer with the given limits.
    #[must_use]
    pub fn new(config: &'a ExtractConfig) -> Self {
        Self { config }
    }

    /// Writes the document's resources under `dest`, emitting per-resource
    /// events, and returns the run report.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::ResourceLimit`] if the document exceeds the
    /// configured resource count, or [`ExtractError::Io`] if a write to the
    /// prepared destination fails.
    pub fn materialize(
        &self,
        doc: ArchiveDocument,
        dest: &DestDir,
        events: &mut dyn EventSink,
    ) -> Result<MaterializeReport> {
        let started = Instant::now();
        let total = doc.resource_count();

        if total > self.config.max_resource_count {
            return Err(ExtractError::ResourceLimit {
                count: total,
                max: self.config.max_resource_count,
            });
        }

        let mut planner = PathPlanner::new(self.config);
        let mut report = MaterializeReport::new();

        self.write_resource(
            doc.main,
            ResourceRole::Main,
            &mut planner,
            dest,
            events,
            &mut report,
            total,
            1,
        )?;

        for (index, record) in doc.subresources.into_iter().enumerate() {
            self.write_resource(
                record,
                ResourceRole::Subresource,
                &mut planner,
                dest,
                events,
                &mut report,
                total,
                index + 2,
            )?;
        }

        events.on_complete();
        report.duration = started.elapsed();
        Ok(report)
    }

    #[allow(clippy::too_many_arguments)]
    fn write_resource(
        &self,
        record: ResourceRecord,
        role: ResourceRole,
        planner: &mut PathPlanner<'_>,
        dest: &DestDir,
        events: &mut dyn EventSink,
        report: &mut MaterializeReport,
        total: usize,
        current: usize,
    ) -> Result<()> {
        events.on_resource_start(&record.locator, total, current);

        let path = match planner.plan(role, &record.locator) {
            Ok(path) => path,
            Err(reason) => {
                tracing::warn!(locator = %record.locator, %reason, "skipping resource");
                events.on_skipped(&record.locator, reason);
                report.record_skip(record.locator, reason);
                return Ok(());
            }
        };

        let mut payload = record.payload;
        let mut fixed = false;

        // The entry page references its own assets through the local-file
        // scheme; relativize those before the extension-based pass.
        if role == ResourceRole::Main {
            let (relativized, changed) = rewrite::relativize_local_refs(payload);
            payload = relativized;
            fixed |= changed;
        }

        let kind = rewrite::kind_for(&path);
        match kind {
            RewriteKind::Markup | RewriteKind::Stylesheet => {
                let (rewritten, changed) = rewrite::rewrite(kind, payload);
                payload = rewritten;
                fixed |= changed;
            }
            RewriteKind::Asset => {}
            RewriteKind::Opaque => {
                tracing::warn!(
                    path = %path,
                    "unrecognized extension, payload written without link analysis"
                );
            }
        }

        if fixed {
            report.paths_rewritten += 1;
            events.on_paths_fixed(path.as_path());
        }

        let target = dest.join(&path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, &payload)?;

        let bytes = payload.len() as u64;
        report.resources_written += 1;
        report.bytes_written += bytes;
        events.on_written(path.as_path(), bytes);
        tracing::debug!(path = %path, bytes, "wrote resource");

        Ok(())
    }
}
