//! Split outcome entity
//!
//! What a split produced for one file: the header bytes that were removed,
//! the payload size, and how each output file fared.

use crate::error::StripError;
use std::path::{Path, PathBuf};

/// Suffix of the sidecar file holding the extracted header
pub const HEADER_SUFFIX: &str = ".header";
/// Suffix of the header-free copy of the payload
pub const PAYLOAD_SUFFIX: &str = ".new";

/// The written path, or the error that stopped that output
pub type WriteStatus = Result<PathBuf, StripError>;

/// Returns `source` with `suffix` appended to its file name
pub fn sibling_path(source: &Path, suffix: &str) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// Result of splitting one file into header and payload
#[derive(Debug)]
pub struct SplitOutcome {
    header_bytes: Vec<u8>,
    payload_byte_count: u64,
    header_file: Option<WriteStatus>,
    payload_file: WriteStatus,
}

impl SplitOutcome {
    pub fn new(
        header_bytes: Vec<u8>,
        payload_byte_count: u64,
        header_file: Option<WriteStatus>,
        payload_file: WriteStatus,
    ) -> Self {
        Self {
            header_bytes,
            payload_byte_count,
            header_file,
            payload_file,
        }
    }

    /// The removed header, exactly `header_length` bytes
    pub fn header_bytes(&self) -> &[u8] {
        &self.header_bytes
    }

    /// Bytes written to the payload file
    pub fn payload_byte_count(&self) -> u64 {
        self.payload_byte_count
    }

    /// `None` when the header was not requested
    pub fn header_file(&self) -> Option<&WriteStatus> {
        self.header_file.as_ref()
    }

    pub fn payload_file(&self) -> &WriteStatus {
        &self.payload_file
    }

    /// True when every requested output was written
    pub fn is_complete(&self) -> bool {
        self.payload_file.is_ok() && self.header_file.as_ref().is_none_or(|s| s.is_ok())
    }

    /// Splits into the owned write statuses
    pub fn into_files(self) -> (Option<WriteStatus>, WriteStatus) {
        (self.header_file, self.payload_file)
    }
}
