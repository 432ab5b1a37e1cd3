//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use unwebarchive_core::ArchiveDocument;
use unwebarchive_core::MaterializeReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extract_result(&self, export_dir: &Path, report: &MaterializeReport) -> Result<()> {
        #[derive(Serialize)]
        struct SkipOutput {
            locator: String,
            reason: &'static str,
        }

        #[derive(Serialize)]
        struct ExtractOutput {
            export_dir: String,
            resources_written: usize,
            resources_skipped: usize,
            paths_rewritten: usize,
            bytes_written: u64,
            duration_ms: u128,
            skips: Vec<SkipOutput>,
        }

        let data = ExtractOutput {
            export_dir: export_dir.display().to_string(),
            resources_written: report.resources_written,
            resources_skipped: report.resources_skipped,
            paths_rewritten: report.paths_rewritten,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            skips: report
                .skips
                .iter()
                .map(|skip| SkipOutput {
                    locator: skip.locator.clone(),
                    reason: skip.reason.as_str(),
                })
                .collect(),
        };

        let output = JsonOutput::success("extract", data);
        Self::output(&output)
    }

    fn format_resource_list(
        &self,
        doc: &ArchiveDocument,
        _long: bool,
        _human_readable: bool,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct ResourceOutput {
            locator: String,
            size: u64,
            #[serde(skip_serializing_if = "Option::is_none")]
            mime_type: Option<String>,
        }

        #[derive(Serialize)]
        struct ListOutput {
            total_resources: usize,
            total_size: u64,
            resources: Vec<ResourceOutput>,
        }

        let resources: Vec<ResourceOutput> = doc
            .resources()
            .map(|resource| ResourceOutput {
                locator: resource.locator.clone(),
                size: resource.payload.len() as u64,
                mime_type: resource.mime_type.clone(),
            })
            .collect();

        let data = ListOutput {
            total_resources: doc.resource_count(),
            total_size: resources.iter().map(|r| r.size).sum(),
            resources,
        };

        let output = JsonOutput::success("list", data);
        Self::output(&output)
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("unknown", format!("{error:?}"));
        let _ = Self::output(&output);
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_formatter_output_structure() {
        #[derive(Serialize)]
        struct TestData {
            value: String,
        }

        let data = TestData {
            value: "test".to_string(),
        };

        let json = serde_json::to_string(&data).unwrap();
        assert!(json.contains("\"value\""));
        assert!(json.contains("\"test\""));
    }
}
