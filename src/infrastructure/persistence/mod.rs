//! Persistence adapters

mod local_split_writer;

pub use local_split_writer::{LocalSplitWriter, COPY_BUFFER_SIZE};
