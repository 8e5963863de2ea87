//! Split writer trait
//!
//! Defines the interface for separating a detected header from its payload.

use crate::domain::entities::{ProbeWindow, SplitOutcome};
use crate::error::StripError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Trait for writing the header sidecar and the header-free payload
///
/// Implementations must attempt the payload output even when the header
/// output fails, and must never modify `source`. Concatenating the header
/// output with the payload output reproduces the source byte for byte.
///
/// # Example
///
/// ```ignore
/// let writer = LocalSplitWriter::new();
/// let outcome = writer.split_path(Path::new("game.nes"), 16, true)?;
/// assert_eq!(outcome.header_bytes().len(), 16);
/// ```
pub trait SplitWriter: Send + Sync {
    /// Splits a file whose probe window has already been read.
    ///
    /// # Arguments
    ///
    /// * `source` - Path of the file being split; outputs are named after it
    /// * `window` - The first bytes of the file, as read by the sniffer
    /// * `rest` - The file's bytes after the window
    /// * `header_length` - Number of leading bytes to remove
    /// * `save_header` - Whether to write the `.header` sidecar
    ///
    /// # Returns
    ///
    /// The split outcome, or an error if the header could not be read in
    /// full. Output write failures are recorded in the outcome instead.
    fn split<R: Read>(
        &self,
        source: &Path,
        window: &ProbeWindow,
        rest: R,
        header_length: usize,
        save_header: bool,
    ) -> Result<SplitOutcome, StripError>;

    /// Opens `source`, reads its probe window, and splits it
    fn split_path(
        &self,
        source: &Path,
        header_length: usize,
        save_header: bool,
    ) -> Result<SplitOutcome, StripError> {
        let mut file = File::open(source).map_err(|e| StripError::io(source, e))?;
        let window = ProbeWindow::read_from(&mut file).map_err(|e| StripError::io(source, e))?;
        self.split(source, &window, file, header_length, save_header)
    }
}
