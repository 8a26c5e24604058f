//! # Error Module
//!
//! Error types surfaced by the stamping core.
//!
//! [`StampError::InvalidInput`] is fatal and raised before any file is touched.
//! Every other variant is scoped to a single file: the processor reports it and
//! moves on to the next file.

use std::io;
use std::path::{Path, PathBuf};

/// Errors raised while canonicalizing the copyright text or stamping a file.
#[derive(Debug, thiserror::Error)]
pub enum StampError {
  /// The copyright text or comment marker cannot produce a usable canonical line.
  #[error("Invalid input: {0}")]
  InvalidInput(String),

  /// The path does not exist (or vanished mid-run).
  #[error("Path not found: {}", path.display())]
  PathNotFound { path: PathBuf },

  /// The file exists but cannot be read or written with the current permissions.
  #[error("Permission denied: {}: {source}", path.display())]
  PermissionDenied { path: PathBuf, source: io::Error },

  /// Any other read or write failure.
  #[error("I/O error on {}: {source}", path.display())]
  Io { path: PathBuf, source: io::Error },

  /// The file is not valid UTF-8 text and is left untouched.
  #[error("Not a UTF-8 text file: {}", path.display())]
  NotUtf8 { path: PathBuf },
}

impl StampError {
  /// Classifies an I/O error for `path` into the most specific variant.
  pub fn from_io(path: &Path, source: io::Error) -> Self {
    match source.kind() {
      io::ErrorKind::NotFound => StampError::PathNotFound {
        path: path.to_path_buf(),
      },
      io::ErrorKind::PermissionDenied => StampError::PermissionDenied {
        path: path.to_path_buf(),
        source,
      },
      _ => StampError::Io {
        path: path.to_path_buf(),
        source,
      },
    }
  }

  /// The file the error is about, if any.
  pub fn path(&self) -> Option<&Path> {
    match self {
      StampError::InvalidInput(_) => None,
      StampError::PathNotFound { path }
      | StampError::PermissionDenied { path, .. }
      | StampError::Io { path, .. }
      | StampError::NotUtf8 { path } => Some(path),
    }
  }
}
