//! Probe window and probe result entities

use super::header_signature::HeaderFormat;
use std::io::{self, Read};

/// Maximum number of leading bytes examined for a signature
pub const PROBE_WINDOW_SIZE: usize = 1024;

/// The leading bytes of a file, at most [`PROBE_WINDOW_SIZE`] long
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeWindow {
    bytes: Vec<u8>,
}

impl ProbeWindow {
    /// Reads up to [`PROBE_WINDOW_SIZE`] bytes, stopping early only at EOF.
    ///
    /// The reader is left positioned right after the window.
    pub fn read_from<R: Read>(reader: &mut R) -> io::Result<Self> {
        let mut bytes = Vec::with_capacity(PROBE_WINDOW_SIZE);
        reader
            .by_ref()
            .take(PROBE_WINDOW_SIZE as u64)
            .read_to_end(&mut bytes)?;
        Ok(Self { bytes })
    }

    /// Wraps already-read bytes, truncating anything past the window size
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let end = bytes.len().min(PROBE_WINDOW_SIZE);
        Self {
            bytes: bytes[..end].to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the source ended inside the window
    pub fn is_whole_file(&self) -> bool {
        self.bytes.len() < PROBE_WINDOW_SIZE
    }
}

/// A successful signature match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMatch {
    format: HeaderFormat,
    header_length: usize,
    rule_index: usize,
}

impl HeaderMatch {
    pub fn new(format: HeaderFormat, header_length: usize, rule_index: usize) -> Self {
        Self {
            format,
            header_length,
            rule_index,
        }
    }

    pub fn format(&self) -> HeaderFormat {
        self.format
    }

    pub fn header_length(&self) -> usize {
        self.header_length
    }

    /// Index of the rule that fired within its format's rule list
    pub fn rule_index(&self) -> usize {
        self.rule_index
    }
}

/// Outcome of probing a window. No match is a normal result, not an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeResult {
    matched: Option<HeaderMatch>,
}

impl ProbeResult {
    pub fn detected(matched: HeaderMatch) -> Self {
        Self {
            matched: Some(matched),
        }
    }

    pub fn none() -> Self {
        Self { matched: None }
    }

    pub fn is_detected(&self) -> bool {
        self.matched.is_some()
    }

    pub fn format(&self) -> Option<HeaderFormat> {
        self.matched.map(|m| m.format())
    }

    pub fn header_match(&self) -> Option<&HeaderMatch> {
        self.matched.as_ref()
    }
}
