use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while probing or splitting a single file
#[derive(Error, Debug)]
pub enum StripError {
    #[error("{0} is neither a file nor a directory")]
    InvalidPath(PathBuf),

    #[error("Header length {header_length} exceeds file length {file_length}")]
    HeaderTooLarge { header_length: usize, file_length: u64 },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StripError {
    /// Tags an I/O error with the path it concerns
    pub fn io(path: &Path, source: io::Error) -> Self {
        StripError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true for errors that stop a run before any file is touched
    pub fn is_usage(&self) -> bool {
        matches!(self, StripError::InvalidPath(_))
    }
}

pub type Result<T> = std::result::Result<T, StripError>;
