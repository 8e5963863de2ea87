//! Progress reporting for CLI

use crate::application::dto::FileOutcome;
use crate::presentation::cli::format_outcome;
use indicatif::{ProgressBar, ProgressStyle};

/// Spinner that counts processed files and prints one line per file
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Creates a reporter for a directory batch
    pub fn for_batch() -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {pos} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_message("Stripping headers...");
        Self { bar }
    }

    /// Creates a reporter that prints lines without drawing a spinner
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Gets a callback that reports each finished file
    pub fn outcome_callback(&self) -> impl Fn(&FileOutcome) + Send + Sync + use<> {
        let bar = self.bar.clone();
        move |outcome: &FileOutcome| {
            let line = format_outcome(outcome);
            bar.suspend(|| println!("{}", line));
            bar.inc(1);
        }
    }

    /// Clears the spinner
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
