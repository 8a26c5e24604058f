//! # Canonical Line Module
//!
//! Turns free-form copyright text into the single comment-prefixed line that
//! is both compared against and inserted into every file.
//!
//! ```rust
//! use copyrighter::canonical::{CommentMarker, canonicalize};
//!
//! let line = canonicalize("  Copyright 2026 Acme  ", &CommentMarker::default()).unwrap();
//! assert_eq!(line.as_str(), "// Copyright 2026 Acme");
//! ```

use std::fmt;

use crate::error::StampError;

/// The default comment marker.
pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// Prefix that marks a line as a single-line comment (e.g. `//` or `#`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentMarker(String);

impl CommentMarker {
  /// Creates a marker, rejecting empty markers and markers containing whitespace.
  pub fn new(marker: impl Into<String>) -> Result<Self, StampError> {
    let marker = marker.into();
    if marker.is_empty() {
      return Err(StampError::InvalidInput("comment marker cannot be empty".to_string()));
    }
    if marker.chars().any(char::is_whitespace) {
      return Err(StampError::InvalidInput(format!(
        "comment marker cannot contain whitespace: {marker:?}"
      )));
    }
    Ok(Self(marker))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Whether `line` begins with this marker.
  pub fn is_comment(&self, line: &str) -> bool {
    line.starts_with(&self.0)
  }
}

impl Default for CommentMarker {
  fn default() -> Self {
    Self(DEFAULT_COMMENT_MARKER.to_string())
  }
}

impl fmt::Display for CommentMarker {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A normalized, comment-prefixed copyright line.
///
/// Only [`canonicalize`] constructs one, so every value starts with its marker
/// and holds a single non-blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLine {
  line: String,
  marker: CommentMarker,
}

impl CanonicalLine {
  pub fn as_str(&self) -> &str {
    &self.line
  }

  pub const fn marker(&self) -> &CommentMarker {
    &self.marker
  }
}

impl fmt::Display for CanonicalLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.line)
  }
}

/// Produces the canonical line for `copyright_text`.
///
/// The text is trimmed, then prefixed with `marker` and a space unless it
/// already starts with the marker. Applying this to its own output returns
/// the same line.
///
/// # Errors
///
/// Returns [`StampError::InvalidInput`] if the trimmed text is empty or spans
/// more than one line.
pub fn canonicalize(copyright_text: &str, marker: &CommentMarker) -> Result<CanonicalLine, StampError> {
  let trimmed = copyright_text.trim();
  if trimmed.is_empty() {
    return Err(StampError::InvalidInput("copyright text cannot be empty".to_string()));
  }
  if trimmed.contains(['\n', '\r']) {
    return Err(StampError::InvalidInput(
      "copyright text must be a single line".to_string(),
    ));
  }

  let line = if marker.is_comment(trimmed) {
    trimmed.to_string()
  } else {
    format!("{marker} {trimmed}")
  };

  Ok(CanonicalLine {
    line,
    marker: marker.clone(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn slashes() -> CommentMarker {
    CommentMarker::default()
  }

  #[test]
  fn test_canonicalize_adds_marker() {
    let line = canonicalize("Copyright 2026 Acme", &slashes()).unwrap();
    assert_eq!(line.as_str(), "// Copyright 2026 Acme");
  }

  #[test]
  fn test_canonicalize_trims_whitespace() {
    let line = canonicalize("\t  Copyright 2026 Acme \n", &slashes()).unwrap();
    assert_eq!(line.as_str(), "// Copyright 2026 Acme");
  }

  #[test]
  fn test_canonicalize_keeps_existing_marker() {
    let line = canonicalize("  // Copyright 2026 Acme", &slashes()).unwrap();
    assert_eq!(line.as_str(), "// Copyright 2026 Acme");

    // Marker without a following space is kept as-is
    let line = canonicalize("//Copyright", &slashes()).unwrap();
    assert_eq!(line.as_str(), "//Copyright");
  }

  #[test]
  fn test_canonicalize_is_stable() {
    let once = canonicalize("NOTICE", &slashes()).unwrap();
    let twice = canonicalize(once.as_str(), &slashes()).unwrap();
    assert_eq!(once, twice);
  }

  #[test]
  fn test_canonicalize_rejects_blank() {
    assert!(matches!(
      canonicalize("", &slashes()),
      Err(StampError::InvalidInput(_))
    ));
    assert!(matches!(
      canonicalize("   \t\n", &slashes()),
      Err(StampError::InvalidInput(_))
    ));
  }

  #[test]
  fn test_canonicalize_rejects_multiline() {
    let result = canonicalize("Copyright 2026\nAll rights reserved", &slashes());
    assert!(matches!(result, Err(StampError::InvalidInput(_))));
  }

  #[test]
  fn test_canonicalize_custom_marker() {
    let hash = CommentMarker::new("#").unwrap();
    let line = canonicalize("Copyright 2026 Acme", &hash).unwrap();
    assert_eq!(line.as_str(), "# Copyright 2026 Acme");
    assert_eq!(line.marker().as_str(), "#");
  }

  #[test]
  fn test_comment_marker_validation() {
    assert!(CommentMarker::new("").is_err());
    assert!(CommentMarker::new("/ /").is_err());
    assert!(CommentMarker::new("--").is_ok());
  }

  #[test]
  fn test_comment_marker_is_comment() {
    let marker = slashes();
    assert!(marker.is_comment("// hello"));
    assert!(marker.is_comment("//"));
    assert!(!marker.is_comment(" // indented"));
    assert!(!marker.is_comment("/* block */"));
  }
}
