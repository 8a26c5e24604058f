//! # Detection Module
//!
//! Decides whether the first or last line of a file is a replaceable
//! copyright candidate. The transformer only depends on the
//! [`CommentDetector`] trait so the policy can be swapped without touching
//! the stamping algorithm.

use crate::canonical::CommentMarker;

/// Trait for header/footer candidate detection.
pub trait CommentDetector: Send + Sync {
  /// Returns `true` if `line` may be superseded by the canonical copyright line.
  fn is_candidate(&self, line: &str) -> bool;
}

/// Treats any line starting with the comment marker as a candidate.
///
/// This is a syntactic test only. It assumes the first and last lines of a
/// tracked file are blank, a copyright notice, or some other single-line
/// comment that the notice may replace.
pub struct MarkerDetector {
  marker: CommentMarker,
}

impl MarkerDetector {
  pub const fn new(marker: CommentMarker) -> Self {
    Self { marker }
  }
}

impl Default for MarkerDetector {
  fn default() -> Self {
    Self::new(CommentMarker::default())
  }
}

impl CommentDetector for MarkerDetector {
  fn is_candidate(&self, line: &str) -> bool {
    self.marker.is_comment(line)
  }
}
