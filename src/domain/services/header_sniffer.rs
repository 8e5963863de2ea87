//! Header sniffer service
//!
//! Classifies a file prefix against the signature registry.

use crate::domain::entities::{HeaderMatch, ProbeResult, ProbeWindow};
use crate::domain::services::SignatureRegistry;
use std::io::{self, Read};

/// Evaluates probe windows against a registry in its fixed order
#[derive(Debug, Clone, Copy)]
pub struct HeaderSniffer<'a> {
    registry: &'a SignatureRegistry,
}

impl<'a> HeaderSniffer<'a> {
    pub fn new(registry: &'a SignatureRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'a SignatureRegistry {
        self.registry
    }

    /// Returns the first format with a satisfied rule.
    ///
    /// Formats are tried in registry order and each format's rules in listed
    /// order. Only `bytes` is inspected: a rule reaching past its end fails.
    pub fn probe(&self, bytes: &[u8]) -> ProbeResult {
        for signature in self.registry.lookup() {
            if let Some(rule_index) = signature.first_matching_rule(bytes) {
                return ProbeResult::detected(HeaderMatch::new(
                    signature.format(),
                    signature.header_length(),
                    rule_index,
                ));
            }
        }
        ProbeResult::none()
    }

    /// Reads a probe window from `reader` and probes it.
    ///
    /// The window is returned so the caller can reuse it without rereading.
    pub fn probe_reader<R: Read>(&self, reader: &mut R) -> io::Result<(ProbeWindow, ProbeResult)> {
        let window = ProbeWindow::read_from(reader)?;
        let result = self.probe(window.as_bytes());
        Ok((window, result))
    }
}
