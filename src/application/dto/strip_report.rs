//! Strip report DTO

use crate::domain::entities::HeaderFormat;
use crate::error::StripError;
use crate::utils::format_bytes;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Terminal state of one file's pipeline
#[derive(Debug)]
pub enum FileStatus {
    /// Probed, no signature matched; nothing was written
    NoHeader,
    /// Header detected and every requested output written
    Stripped {
        format: HeaderFormat,
        header_length: usize,
        header_file: Option<PathBuf>,
        payload_file: PathBuf,
        payload_bytes: u64,
    },
    /// The file could not be probed (`format` is `None`) or split
    Failed {
        format: Option<HeaderFormat>,
        header_file: Option<PathBuf>,
        payload_file: Option<PathBuf>,
        errors: Vec<StripError>,
    },
}

/// Outcome of the single-file pipeline
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn new(path: &Path, status: FileStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            status,
        }
    }

    pub fn failed(path: &Path, format: Option<HeaderFormat>, error: StripError) -> Self {
        Self::new(
            path,
            FileStatus::Failed {
                format,
                header_file: None,
                payload_file: None,
                errors: vec![error],
            },
        )
    }

    /// Format detected in the file, if any
    pub fn format(&self) -> Option<HeaderFormat> {
        match &self.status {
            FileStatus::NoHeader => None,
            FileStatus::Stripped { format, .. } => Some(*format),
            FileStatus::Failed { format, .. } => *format,
        }
    }

    pub fn is_detected(&self) -> bool {
        self.format().is_some()
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }

    /// The `.header` file, when one was written
    pub fn header_file(&self) -> Option<&Path> {
        match &self.status {
            FileStatus::Stripped { header_file, .. } | FileStatus::Failed { header_file, .. } => {
                header_file.as_deref()
            }
            FileStatus::NoHeader => None,
        }
    }

    /// The `.new` file, when one was written
    pub fn payload_file(&self) -> Option<&Path> {
        match &self.status {
            FileStatus::Stripped { payload_file, .. } => Some(payload_file),
            FileStatus::Failed { payload_file, .. } => payload_file.as_deref(),
            FileStatus::NoHeader => None,
        }
    }

    pub fn errors(&self) -> &[StripError] {
        match &self.status {
            FileStatus::Failed { errors, .. } => errors,
            _ => &[],
        }
    }
}

/// Result of a run over one file or one directory
#[derive(Debug, Default)]
pub struct StripReport {
    /// One entry per processed file, in processing order
    pub outcomes: Vec<FileOutcome>,
    /// Duration of the run
    pub duration: Duration,
}

impl StripReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn scanned(&self) -> usize {
        self.outcomes.len()
    }

    pub fn detected(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_detected()).count()
    }

    pub fn stripped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, FileStatus::Stripped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Total payload bytes written by successful splits
    pub fn payload_bytes(&self) -> u64 {
        self.outcomes
            .iter()
            .map(|o| match o.status {
                FileStatus::Stripped { payload_bytes, .. } => payload_bytes,
                _ => 0,
            })
            .sum()
    }

    /// Returns a summary string
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Scanned {} file(s) in {:.2}s: {} with header, {} stripped ({})\n",
            self.scanned(),
            self.duration.as_secs_f64(),
            self.detected(),
            self.stripped(),
            format_bytes(self.payload_bytes())
        );

        for format in HeaderFormat::ALL {
            let count = self
                .outcomes
                .iter()
                .filter(|o| o.format() == Some(format))
                .count();
            if count > 0 {
                summary.push_str(&format!("  - {}: {}\n", format, count));
            }
        }

        if self.failed() > 0 {
            summary.push_str(&format!("{} file(s) failed\n", self.failed()));
        }

        summary
    }
}
