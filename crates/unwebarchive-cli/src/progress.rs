//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::path::Path;
use unwebarchive_core::EventSink;
use unwebarchive_core::SkipReason;

/// CLI progress bar wrapper implementing [`EventSink`].
///
/// Displays a per-resource progress bar when running in a TTY and cleans
/// up on drop. Written and skipped resources both advance the bar; the
/// final report accounts for the difference.
pub struct CliProgress {
    bar: ProgressBar,
    length_set: bool,
}

impl CliProgress {
    /// Creates a new CLI progress bar. The length is learned from the
    /// first `on_resource_start` event.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new(0);

        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} resources")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        bar.set_message(message.to_string());

        Self {
            bar,
            length_set: false,
        }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

impl EventSink for CliProgress {
    fn on_resource_start(&mut self, _locator: &str, total: usize, _current: usize) {
        if !self.length_set {
            self.bar.set_length(total as u64);
            self.length_set = true;
        }
    }

    fn on_written(&mut self, _path: &Path, _bytes: u64) {
        self.bar.inc(1);
    }

    fn on_skipped(&mut self, _locator: &str, _reason: SkipReason) {
        self.bar.inc(1);
    }

    fn on_paths_fixed(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {
        self.bar.finish_and_clear();
    }
}
