//! Local split writer implementation
//!
//! Writes the header sidecar and the stripped payload next to the source
//! file. The payload is streamed through a fixed buffer so large images are
//! never held in memory.

use crate::domain::entities::{
    sibling_path, ProbeWindow, SplitOutcome, WriteStatus, HEADER_SUFFIX, PAYLOAD_SUFFIX,
};
use crate::domain::repositories::SplitWriter;
use crate::error::StripError;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Local file system split writer
///
/// Outputs are `<source>.header` and `<source>.new`; existing files at those
/// paths are overwritten.
#[derive(Debug, Default)]
pub struct LocalSplitWriter {
    files_written: AtomicUsize,
    bytes_written: AtomicU64,
}

impl LocalSplitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of output files written so far
    pub fn files_written(&self) -> usize {
        self.files_written.load(Ordering::Relaxed)
    }

    /// Returns the total bytes written so far
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    fn record(&self, bytes: u64) {
        self.files_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    fn write_header(&self, path: PathBuf, header: &[u8]) -> WriteStatus {
        let result = File::create(&path).and_then(|mut out| {
            out.write_all(header)?;
            out.sync_all()
        });

        match result {
            Ok(()) => {
                self.record(header.len() as u64);
                Ok(path)
            }
            Err(e) => Err(StripError::io(&path, e)),
        }
    }

    /// Writes `leftover` then everything remaining in `rest`.
    ///
    /// Returns the bytes written alongside the status, so a failed copy still
    /// reports how far it got.
    fn write_payload<R: Read>(
        &self,
        source: &Path,
        path: PathBuf,
        leftover: &[u8],
        mut rest: R,
    ) -> (u64, WriteStatus) {
        let file = match File::create(&path) {
            Ok(f) => f,
            Err(e) => return (0, Err(StripError::io(&path, e))),
        };
        let mut out = BufWriter::with_capacity(COPY_BUFFER_SIZE, file);

        if let Err(e) = out.write_all(leftover) {
            return (0, Err(StripError::io(&path, e)));
        }
        let mut written = leftover.len() as u64;

        let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
        loop {
            let n = match rest.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return (written, Err(StripError::io(source, e))),
            };

            if let Err(e) = out.write_all(&buffer[..n]) {
                return (written, Err(StripError::io(&path, e)));
            }
            written += n as u64;
        }

        let finished = out
            .into_inner()
            .map_err(|e| e.into_error())
            .and_then(|file| file.sync_all());
        if let Err(e) = finished {
            return (written, Err(StripError::io(&path, e)));
        }

        self.record(written);
        (written, Ok(path))
    }
}

impl SplitWriter for LocalSplitWriter {
    fn split<R: Read>(
        &self,
        source: &Path,
        window: &ProbeWindow,
        mut rest: R,
        header_length: usize,
        save_header: bool,
    ) -> Result<SplitOutcome, StripError> {
        let bytes = window.as_bytes();
        let from_window = header_length.min(bytes.len());

        let mut header = Vec::with_capacity(header_length);
        header.extend_from_slice(&bytes[..from_window]);

        // Headers longer than the window continue in the stream
        if header.len() < header_length {
            let missing = (header_length - header.len()) as u64;
            rest.by_ref()
                .take(missing)
                .read_to_end(&mut header)
                .map_err(|e| StripError::io(source, e))?;
        }

        if header.len() < header_length {
            return Err(StripError::HeaderTooLarge {
                header_length,
                file_length: header.len() as u64,
            });
        }

        let header_file = if save_header {
            let path = sibling_path(source, HEADER_SUFFIX);
            let status = self.write_header(path, &header);
            match &status {
                Ok(path) => tracing::debug!(path = %path.display(), "header written"),
                Err(e) => tracing::warn!(source = %source.display(), error = %e, "header write failed"),
            }
            Some(status)
        } else {
            None
        };

        let payload_path = sibling_path(source, PAYLOAD_SUFFIX);
        let (payload_byte_count, payload_file) =
            self.write_payload(source, payload_path, &bytes[from_window..], rest);
        match &payload_file {
            Ok(path) => tracing::debug!(
                path = %path.display(),
                bytes = payload_byte_count,
                "payload written"
            ),
            Err(e) => tracing::warn!(source = %source.display(), error = %e, "payload write failed"),
        }

        Ok(SplitOutcome::new(
            header,
            payload_byte_count,
            header_file,
            payload_file,
        ))
    }
}
