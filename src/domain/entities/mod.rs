//! Domain entities
//!
//! Core objects of the header-stripping domain: signatures, probe windows
//! and the results of probing and splitting.

mod header_signature;
mod probe;
mod split_outcome;

pub use header_signature::{FormatSignature, HeaderFormat, PatternRule, Segment};
pub use probe::{HeaderMatch, ProbeResult, ProbeWindow, PROBE_WINDOW_SIZE};
pub use split_outcome::{
    sibling_path, SplitOutcome, WriteStatus, HEADER_SUFFIX, PAYLOAD_SUFFIX,
};
