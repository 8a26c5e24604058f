//! # Transformer Module
//!
//! The header/footer convergence algorithm. [`StampTransformer::transform`]
//! is a pure function from a file's lines to its stamped lines; reading and
//! writing files is left to the processor.
//!
//! The algorithm runs once per file (it is not iterated to a fixed point) and
//! is constructed so that its own output is always a fixed point: running it
//! again reports `changed == false` and returns the content untouched.

use serde::{Deserialize, Serialize};

use crate::canonical::CanonicalLine;
use crate::detection::{CommentDetector, MarkerDetector};
use crate::processor::content::FileContent;

/// Which lines of a file receive the copyright notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StampMode {
  /// Only the first line.
  HeaderOnly,
  /// The first and the last line.
  #[default]
  HeaderAndFooter,
}

impl StampMode {
  pub const fn from_footer_flag(footer: bool) -> Self {
    if footer {
      StampMode::HeaderAndFooter
    } else {
      StampMode::HeaderOnly
    }
  }

  pub const fn has_footer(self) -> bool {
    matches!(self, StampMode::HeaderAndFooter)
  }
}

/// What happened to the header or footer line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineAction {
  /// Already equal to the canonical line.
  UpToDate,
  /// No candidate line existed; the canonical line was inserted.
  Added,
  /// A stale comment line was replaced with the canonical line.
  Updated,
}

impl LineAction {
  pub const fn is_change(self) -> bool {
    !matches!(self, LineAction::UpToDate)
  }
}

/// Output of [`StampTransformer::transform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
  /// The stamped content. Identical to the input when `changed` is false.
  pub content: FileContent,
  pub header: LineAction,
  /// `None` in header-only mode.
  pub footer: Option<LineAction>,
  pub changed: bool,
}

/// Applies the canonical copyright line to file content.
pub struct StampTransformer {
  canonical: CanonicalLine,
  mode: StampMode,
  detector: Box<dyn CommentDetector>,
}

impl StampTransformer {
  /// Creates a transformer that treats any line starting with the canonical
  /// line's comment marker as a replaceable header/footer.
  pub fn new(canonical: CanonicalLine, mode: StampMode) -> Self {
    let detector = MarkerDetector::new(canonical.marker().clone());
    Self {
      canonical,
      mode,
      detector: Box::new(detector),
    }
  }

  /// Replaces the candidate detection policy.
  pub fn with_detector(mut self, detector: Box<dyn CommentDetector>) -> Self {
    self.detector = detector;
    self
  }

  /// Stamps the header (and footer, if enabled) onto `content`.
  pub fn transform(&self, content: FileContent) -> TransformResult {
    let mut content = content;
    if content.is_empty() {
      return self.stamp_empty(content);
    }

    let header = self.stamp_header(&mut content);
    let footer = if self.mode.has_footer() {
      Some(self.stamp_footer(&mut content))
    } else {
      None
    };

    let changed = header.is_change() || footer.is_some_and(LineAction::is_change);

    TransformResult {
      content,
      header,
      footer,
      changed,
    }
  }

  /// An empty file becomes the header, one blank line, and the footer.
  fn stamp_empty(&self, mut content: FileContent) -> TransformResult {
    let line = self.canonical.as_str();
    content.push_line(line);
    content.push_line("");

    let footer = if self.mode.has_footer() {
      content.push_line(line);
      Some(LineAction::Added)
    } else {
      None
    };
    content.set_trailing_newline(true);

    TransformResult {
      content,
      header: LineAction::Added,
      footer,
      changed: true,
    }
  }

  /// `content` must be non-empty.
  ///
  /// The trailing-newline flag is left alone unless the separator inserted
  /// after an updated header becomes the last line; it is then terminated so
  /// the blank line survives rendering.
  fn stamp_header(&self, content: &mut FileContent) -> LineAction {
    let line = self.canonical.as_str();

    if content.lines()[0] == line {
      return LineAction::UpToDate;
    }

    if self.detector.is_candidate(&content.lines()[0]) {
      content.replace_line(0, line);
      // Keep an existing separator rather than adding a second one
      if content.lines().get(1).is_none_or(|next| !next.is_empty()) {
        content.insert_line(1, "");
        if content.len() == 2 {
          content.set_trailing_newline(true);
        }
      }
      return LineAction::Updated;
    }

    content.insert_line(0, "");
    content.insert_line(0, line);
    LineAction::Added
  }

  /// `content` must be non-empty.
  ///
  /// Updating a footer in place keeps the file's trailing-newline state as it
  /// was; adding a new footer always ends the file with a newline.
  fn stamp_footer(&self, content: &mut FileContent) -> LineAction {
    let line = self.canonical.as_str();
    let last = content.len() - 1;

    if content.lines()[last] == line {
      return LineAction::UpToDate;
    }

    if self.detector.is_candidate(&content.lines()[last]) {
      content.replace_line(last, line);
      if last > 0 && !content.lines()[last - 1].is_empty() {
        content.insert_line(last, "");
      }
      return LineAction::Updated;
    }

    content.push_line("");
    content.push_line(line);
    content.set_trailing_newline(true);
    LineAction::Added
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::canonical::{CommentMarker, canonicalize};

  const NOTICE: &str = "// NOTICE";

  fn transformer(mode: StampMode) -> StampTransformer {
    let canonical = canonicalize("NOTICE", &CommentMarker::default()).unwrap();
    StampTransformer::new(canonical, mode)
  }

  fn stamp(text: &str, mode: StampMode) -> (String, TransformResult) {
    let result = transformer(mode).transform(FileContent::parse(text));
    (result.content.render(), result)
  }

  // === Empty files ===

  #[test]
  fn test_empty_file_header_and_footer() {
    let (output, result) = stamp("", StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\n// NOTICE\n");
    assert!(result.changed);
    assert_eq!(result.header, LineAction::Added);
    assert_eq!(result.footer, Some(LineAction::Added));
  }

  #[test]
  fn test_empty_file_header_only() {
    let (output, result) = stamp("", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\n\n");
    assert!(result.changed);
    assert_eq!(result.footer, None);
  }

  #[test]
  fn test_empty_file_output_is_fixed_point() {
    for mode in [StampMode::HeaderOnly, StampMode::HeaderAndFooter] {
      let (output, _) = stamp("", mode);
      let (again, result) = stamp(&output, mode);
      assert!(!result.changed, "mode {:?}", mode);
      assert_eq!(again, output);
    }
  }

  // === Headers ===

  #[test]
  fn test_adds_header_and_footer() {
    let (output, result) = stamp("package main\nfunc main() {}\n", StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\npackage main\nfunc main() {}\n\n// NOTICE\n");
    assert_eq!(result.header, LineAction::Added);
    assert_eq!(result.footer, Some(LineAction::Added));
    assert!(result.changed);
  }

  #[test]
  fn test_up_to_date_is_unchanged() {
    let input = "// NOTICE\n\npackage main\nfunc main() {}\n\n// NOTICE\n";
    let (output, result) = stamp(input, StampMode::HeaderAndFooter);
    assert!(!result.changed);
    assert_eq!(result.header, LineAction::UpToDate);
    assert_eq!(result.footer, Some(LineAction::UpToDate));
    assert_eq!(output, input);
  }

  #[test]
  fn test_updates_stale_header() {
    let (output, result) = stamp("// Old notice\npackage main\n", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\n\npackage main\n");
    assert_eq!(result.header, LineAction::Updated);
  }

  #[test]
  fn test_updates_stale_header_keeps_single_blank_line() {
    let (output, result) = stamp("// Old notice\n\npackage main\n", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\n\npackage main\n");
    assert_eq!(result.header, LineAction::Updated);
  }

  #[test]
  fn test_stale_header_with_footer_mode() {
    let (output, result) = stamp("// Old notice\npackage main\n", StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\npackage main\n\n// NOTICE\n");
    assert_eq!(result.header, LineAction::Updated);
    assert_eq!(result.footer, Some(LineAction::Added));
  }

  #[test]
  fn test_header_only_preserves_missing_trailing_newline() {
    let (output, _) = stamp("package main", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\n\npackage main");
  }

  #[test]
  fn test_updates_lone_header_without_trailing_newline() {
    let (output, result) = stamp("// Old", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\n\n");
    assert_eq!(result.header, LineAction::Updated);

    let (again, result) = stamp(&output, StampMode::HeaderOnly);
    assert!(!result.changed);
    assert_eq!(again, output);
  }

  #[test]
  fn test_updates_lone_header_crlf() {
    let (output, _) = stamp("// Old\r\n", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\r\n\r\n");
  }

  #[test]
  fn test_first_line_blank_is_not_a_candidate() {
    let (output, result) = stamp("\npackage main\n", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\n\n\npackage main\n");
    assert_eq!(result.header, LineAction::Added);
  }

  #[test]
  fn test_any_comment_is_replaced() {
    let (output, result) = stamp("// Package foo does things.\npackage foo\n", StampMode::HeaderOnly);
    assert_eq!(output, "// NOTICE\n\npackage foo\n");
    assert_eq!(result.header, LineAction::Updated);
  }

  // === Footers ===

  #[test]
  fn test_update_footer_without_trailing_newline() {
    let input = "// NOTICE\n\npackage main\n\n// Old";
    let (output, result) = stamp(input, StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\npackage main\n\n// NOTICE");
    assert_eq!(result.header, LineAction::UpToDate);
    assert_eq!(result.footer, Some(LineAction::Updated));
  }

  #[test]
  fn test_update_footer_with_trailing_newline() {
    let input = "// NOTICE\n\npackage main\n\n// Old\n";
    let (output, _) = stamp(input, StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\npackage main\n\n// NOTICE\n");
  }

  #[test]
  fn test_update_footer_inserts_missing_blank_line() {
    let input = "// NOTICE\n\npackage main\n// Old\n";
    let (output, result) = stamp(input, StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\npackage main\n\n// NOTICE\n");
    assert_eq!(result.footer, Some(LineAction::Updated));
  }

  #[test]
  fn test_new_footer_always_ends_with_newline() {
    let (output, result) = stamp("// NOTICE\n\npackage main", StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\npackage main\n\n// NOTICE\n");
    assert_eq!(result.header, LineAction::UpToDate);
    assert_eq!(result.footer, Some(LineAction::Added));
  }

  #[test]
  fn test_single_canonical_line_is_header_and_footer() {
    let (output, result) = stamp("// NOTICE\n", StampMode::HeaderAndFooter);
    assert!(!result.changed);
    assert_eq!(output, "// NOTICE\n");
  }

  #[test]
  fn test_single_stale_comment_line() {
    let (output, result) = stamp("// Old\n", StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\n\n// NOTICE\n");
    assert!(result.changed);

    let (_, again) = stamp(&output, StampMode::HeaderAndFooter);
    assert!(!again.changed);
  }

  #[test]
  fn test_footer_directly_after_header() {
    let (output, result) = stamp("// NOTICE\n// Old\n", StampMode::HeaderAndFooter);
    assert_eq!(output, "// NOTICE\n\n// NOTICE\n");
    assert_eq!(result.footer, Some(LineAction::Updated));
  }

  // === Line endings ===

  #[test]
  fn test_crlf_is_preserved() {
    let (output, _) = stamp("package main\r\nfunc main() {}\r\n", StampMode::HeaderAndFooter);
    assert_eq!(
      output,
      "// NOTICE\r\n\r\npackage main\r\nfunc main() {}\r\n\r\n// NOTICE\r\n"
    );
  }

  #[test]
  fn test_mixed_endings_keep_body_lines() {
    let (output, result) = stamp("// doc\npackage main\r\nfunc main() {}\r\n", StampMode::HeaderOnly);
    assert_eq!(result.header, LineAction::Updated);
    assert_eq!(output, "// NOTICE\n\r\npackage main\r\nfunc main() {}\r\n");
  }

  #[test]
  fn test_mixed_endings_footer_added_after_body() {
    let (output, _) = stamp("package main\r\n// trailing note\n}\n", StampMode::HeaderAndFooter);
    assert_eq!(
      output,
      "// NOTICE\n\npackage main\r\n// trailing note\n}\n\n// NOTICE\n"
    );
  }

  #[test]
  fn test_mixed_endings_footer_update_keeps_trailing_newline() {
    let (output, result) = stamp("package main\nx := 1\r\n// end\n", StampMode::HeaderAndFooter);
    assert_eq!(result.footer, Some(LineAction::Updated));
    assert_eq!(output, "// NOTICE\n\npackage main\nx := 1\r\n\n// NOTICE\n");
  }

  #[test]
  fn test_trailing_whitespace_makes_header_stale() {
    let (output, result) = stamp("// NOTICE  \n\ncode\n", StampMode::HeaderOnly);
    assert_eq!(result.header, LineAction::Updated);
    assert_eq!(output, format!("{NOTICE}\n\ncode\n"));
  }

  // === Detection policy ===

  #[test]
  fn test_custom_detector() {
    struct CopyrightOnly;
    impl CommentDetector for CopyrightOnly {
      fn is_candidate(&self, line: &str) -> bool {
        line.starts_with("// Copyright")
      }
    }

    let transformer = transformer(StampMode::HeaderOnly).with_detector(Box::new(CopyrightOnly));
    let result = transformer.transform(FileContent::parse("// Package doc\npackage foo\n"));
    assert_eq!(result.header, LineAction::Added);
    assert_eq!(result.content.render(), "// NOTICE\n\n// Package doc\npackage foo\n");
  }
}
