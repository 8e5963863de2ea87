//! Detects console copier headers on game images and splits them off.
//!
//! A file is classified by its first bytes against a fixed catalog of
//! signatures. When a header is found it can be written to `<file>.header`,
//! and the payload without it is written to `<file>.new`, so that the two
//! concatenated reproduce the original exactly.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod utils;

pub use application::dto::{FileOutcome, FileStatus, StripOptions, StripReport};
pub use application::StripHeadersUseCase;
pub use domain::entities::{HeaderFormat, ProbeResult, ProbeWindow};
pub use domain::services::{HeaderSniffer, SignatureRegistry};
pub use error::{Result, StripError};
pub use infrastructure::persistence::LocalSplitWriter;
