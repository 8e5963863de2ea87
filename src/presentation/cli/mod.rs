//! CLI module

mod commands;
mod progress;
mod report;

pub use commands::Cli;
pub use progress::ProgressReporter;
pub use report::{format_outcome, print_summary};
