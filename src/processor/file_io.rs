//! # File I/O Module
//!
//! Reading and writing of whole files for the processor. Each call opens,
//! uses, and closes its own handle, so nothing stays open across files or on
//! error paths.

use std::path::Path;

use tracing::debug;

use crate::error::StampError;
use crate::processor::content::FileContent;

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the full file as UTF-8 text.
  ///
  /// # Errors
  ///
  /// Returns [`StampError::NotUtf8`] for binary or otherwise non-UTF-8 files,
  /// and the classified I/O error if the file cannot be read.
  pub fn read_text(path: &Path) -> Result<String, StampError> {
    let bytes = std::fs::read(path).map_err(|e| StampError::from_io(path, e))?;
    String::from_utf8(bytes).map_err(|e| {
      debug!("{} is not UTF-8: {}", path.display(), e.utf8_error());
      StampError::NotUtf8 {
        path: path.to_path_buf(),
      }
    })
  }

  /// Reads and parses a file into lines.
  pub fn read_content(path: &Path) -> Result<(String, FileContent), StampError> {
    let text = Self::read_text(path)?;
    let content = FileContent::parse(&text);
    Ok((text, content))
  }

  /// Overwrites the file with `content`.
  pub fn write_text(path: &Path, content: &str) -> Result<(), StampError> {
    std::fs::write(path, content).map_err(|e| StampError::from_io(path, e))
  }
}
