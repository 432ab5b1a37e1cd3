//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use console::Term;
use std::path::Path;
use std::path::PathBuf;
use unwebarchive_core::ExtractConfig;
use unwebarchive_core::NoopEvents;
use unwebarchive_core::extract_webarchive_with_events;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter, quiet: bool) -> Result<()> {
    let export_dir = match &args.output_dir {
        Some(dir) => dir.clone(),
        None => default_export_dir(&args.archive),
    };

    if export_dir.exists() && !args.force {
        confirm_overwrite(&export_dir)?;
    }

    let config = ExtractConfig {
        max_path_depth: args.max_path_depth,
        max_resource_count: args.max_resources,
    };

    // Progress bar only when attached to a terminal and not silenced.
    let report = if CliProgress::should_show() && !quiet {
        let mut progress = CliProgress::new("Extracting");
        add_archive_context(
            extract_webarchive_with_events(&args.archive, &export_dir, &config, &mut progress),
            &args.archive,
        )?
    } else {
        let mut noop = NoopEvents;
        add_archive_context(
            extract_webarchive_with_events(&args.archive, &export_dir, &config, &mut noop),
            &args.archive,
        )?
    };

    formatter.format_extract_result(&export_dir, &report)?;

    Ok(())
}

/// Derives the export directory from the archive base name with its
/// extension stripped, resolved relative to the current directory.
fn default_export_dir(archive: &Path) -> PathBuf {
    archive
        .file_stem()
        .map_or_else(|| PathBuf::from("export"), PathBuf::from)
}

fn confirm_overwrite(dir: &Path) -> Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        bail!(
            "output directory '{}' already exists (use --force to overwrite)",
            dir.display()
        );
    }

    term.write_str(&format!(
        "Overwrite existing export directory '{}' [y/N]? ",
        dir.display()
    ))?;
    let answer = term.read_line().context("failed to read confirmation")?;

    if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
        bail!(
            "aborted: output directory '{}' left untouched",
            dir.display()
        );
    }

    Ok(())
}
