//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use unwebarchive_core::ArchiveDocument;
use unwebarchive_core::MaterializeReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extract_result(&self, export_dir: &Path, report: &MaterializeReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Extraction complete: {}",
                style("✓").green().bold(),
                export_dir.display()
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Extraction complete: {}", export_dir.display()));
        }

        let _ = self
            .term
            .write_line(&format!("  Resources written: {}", report.resources_written));
        let _ = self
            .term
            .write_line(&format!("  Links rewritten:   {}", report.paths_rewritten));
        let _ = self.term.write_line(&format!(
            "  Total size:        {}",
            Self::format_size(report.bytes_written)
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration:          {:?}", report.duration));
        }

        if report.has_skips() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self.term.write_line(&format!(
                    "{} Skipped {} resources:",
                    style("⚠").yellow().bold(),
                    report.resources_skipped
                ));
            } else {
                let _ = self
                    .term
                    .write_line(&format!("Skipped {} resources:", report.resources_skipped));
            }
            for skip in &report.skips {
                let _ = self
                    .term
                    .write_line(&format!("  - {} ({})", skip.locator, skip.reason));
            }
        }

        Ok(())
    }

    fn format_resource_list(
        &self,
        doc: &ArchiveDocument,
        long: bool,
        human_readable: bool,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut total_size: u64 = 0;
        for resource in doc.resources() {
            let size = resource.payload.len() as u64;
            total_size += size;

            if long {
                let size_str = if human_readable {
                    Self::format_size(size)
                } else {
                    size.to_string()
                };
                let mime = resource.mime_type.as_deref().unwrap_or("-");
                let _ = self.term.write_line(&format!(
                    "{size_str:>10}  {mime:<24}  {}",
                    resource.locator
                ));
            } else {
                let _ = self.term.write_line(&resource.locator);
            }
        }

        if long {
            let _ = self.term.write_line("");
            let _ = self.term.write_line(&format!(
                "Total: {} resources, {}",
                doc.resource_count(),
                Self::format_size(total_size)
            ));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.term.write_line(&format!("ERROR: {error:?}"));
        }
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}
