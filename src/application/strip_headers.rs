//! Strip headers use case
//!
//! Runs probe and split over a single file or over the immediate files of a
//! directory. Per-file failures are recorded in the report and never stop the
//! batch.

use crate::application::dto::{FileOutcome, FileStatus, StripOptions, StripReport};
use crate::domain::entities::{HeaderFormat, HeaderMatch, SplitOutcome};
use crate::domain::repositories::SplitWriter;
use crate::domain::services::{HeaderSniffer, SignatureRegistry};
use crate::error::StripError;
use rayon::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Called once per finished file
pub type ProgressCallback<'a> = dyn Fn(&FileOutcome) + Send + Sync + 'a;

/// Strip headers use case
pub struct StripHeadersUseCase<W: SplitWriter> {
    registry: SignatureRegistry,
    writer: W,
}

impl<W: SplitWriter> StripHeadersUseCase<W> {
    pub fn new(registry: SignatureRegistry, writer: W) -> Self {
        Self { registry, writer }
    }

    pub fn registry(&self) -> &SignatureRegistry {
        &self.registry
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Processes a file, or every regular file directly inside a directory.
    ///
    /// Returns `StripError::InvalidPath` when `path` is neither, and an I/O
    /// error only if the directory itself cannot be listed.
    pub fn process(
        &self,
        path: &Path,
        options: &StripOptions,
        progress: Option<&ProgressCallback<'_>>,
    ) -> Result<StripReport, StripError> {
        let start_time = Instant::now();

        let mut report = if path.is_file() {
            let outcome = self.process_file(path, options);
            if let Some(callback) = progress {
                callback(&outcome);
            }
            let mut report = StripReport::new();
            report.push(outcome);
            report
        } else if path.is_dir() {
            self.process_directory(path, options, progress)?
        } else {
            return Err(StripError::InvalidPath(path.to_path_buf()));
        };

        report.duration = start_time.elapsed();

        tracing::info!(
            scanned = report.scanned(),
            detected = report.detected(),
            stripped = report.stripped(),
            failed = report.failed(),
            "run complete"
        );

        Ok(report)
    }

    /// Runs the single-file pipeline: probe, then split if a header is found
    pub fn process_file(&self, path: &Path, options: &StripOptions) -> FileOutcome {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => return Self::fail(path, None, StripError::io(path, e)),
        };

        let sniffer = HeaderSniffer::new(&self.registry);
        let (window, probe) = match sniffer.probe_reader(&mut file) {
            Ok(probed) => probed,
            Err(e) => return Self::fail(path, None, StripError::io(path, e)),
        };

        let Some(matched) = probe.header_match().copied() else {
            tracing::debug!(path = %path.display(), window = window.len(), "no header detected");
            return FileOutcome::new(path, FileStatus::NoHeader);
        };

        tracing::debug!(
            path = %path.display(),
            format = %matched.format(),
            rule = matched.rule_index(),
            "header detected"
        );

        match self.writer.split(
            path,
            &window,
            file,
            matched.header_length(),
            options.save_header,
        ) {
            Ok(outcome) => Self::finish(path, matched, outcome),
            Err(e) => Self::fail(path, Some(matched.format()), e),
        }
    }

    fn process_directory(
        &self,
        dir: &Path,
        options: &StripOptions,
        progress: Option<&ProgressCallback<'_>>,
    ) -> Result<StripReport, StripError> {
        let files = list_files(dir)?;

        tracing::info!(
            directory = %dir.display(),
            files = files.len(),
            parallel = options.parallel,
            "processing directory"
        );

        let run = |path: &PathBuf| {
            let outcome = self.process_file(path, options);
            if let Some(callback) = progress {
                callback(&outcome);
            }
            outcome
        };

        let outcomes: Vec<FileOutcome> = if options.parallel {
            files.par_iter().map(|p| run(p)).collect()
        } else {
            files.iter().map(|p| run(p)).collect()
        };

        Ok(StripReport {
            outcomes,
            ..Default::default()
        })
    }

    fn finish(path: &Path, matched: HeaderMatch, outcome: SplitOutcome) -> FileOutcome {
        let payload_bytes = outcome.payload_byte_count();
        let (header_status, payload_status) = outcome.into_files();

        let mut errors = Vec::new();
        let header_file = match header_status {
            None => None,
            Some(Ok(p)) => Some(p),
            Some(Err(e)) => {
                errors.push(e);
                None
            }
        };
        let payload_file = match payload_status {
            Ok(p) => Some(p),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        match payload_file {
            Some(payload_file) if errors.is_empty() => {
                tracing::info!(
                    path = %path.display(),
                    format = %matched.format(),
                    header_length = matched.header_length(),
                    payload_bytes,
                    "header stripped"
                );
                FileOutcome::new(
                    path,
                    FileStatus::Stripped {
                        format: matched.format(),
                        header_length: matched.header_length(),
                        header_file,
                        payload_file,
                        payload_bytes,
                    },
                )
            }
            payload_file => {
                tracing::warn!(
                    path = %path.display(),
                    format = %matched.format(),
                    errors = errors.len(),
                    "split incomplete"
                );
                FileOutcome::new(
                    path,
                    FileStatus::Failed {
                        format: Some(matched.format()),
                        header_file,
                        payload_file,
                        errors,
                    },
                )
            }
        }
    }

    fn fail(path: &Path, format: Option<HeaderFormat>, error: StripError) -> FileOutcome {
        tracing::warn!(path = %path.display(), error = %error, "file failed");
        FileOutcome::failed(path, format, error)
    }
}

/// Regular files directly inside `dir`, sorted by path.
///
/// Entries that cannot be read are skipped with a warning.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, StripError> {
    let entries = fs::read_dir(dir).map_err(|e| StripError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                tracing::warn!(directory = %dir.display(), error = %e, "skipping unreadable entry");
            }
        }
    }

    files.sort();
    Ok(files)
}
