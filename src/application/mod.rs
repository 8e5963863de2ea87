//! Application layer
//!
//! Use cases that orchestrate the domain services over files on disk.

pub mod dto;
mod strip_headers;

pub use strip_headers::{ProgressCallback, StripHeadersUseCase};
