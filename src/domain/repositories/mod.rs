//! Repository traits (interfaces)
//!
//! Contracts for the side-effecting parts of the pipeline.

mod split_writer;

pub use split_writer::SplitWriter;
