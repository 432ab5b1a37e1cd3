//! List command implementation.

use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use unwebarchive_core::ArchiveDocument;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let doc = add_archive_context(ArchiveDocument::open(&args.archive), &args.archive)?;

    formatter.format_resource_list(&doc, args.long, args.human_readable)?;

    Ok(())
}
