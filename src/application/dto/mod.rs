//! Data Transfer Objects

mod strip_options;
mod strip_report;

pub use strip_options::{StripOptions, PARALLEL_ENV};
pub use strip_report::{FileOutcome, FileStatus, StripReport};
