//! # Diff Module
//!
//! Renders line diffs between a file's current content and its stamped
//! content. Used in check mode to show or save pending changes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use similar::{ChangeTag, TextDiff};

/// Shows pending copyright changes on stderr and/or appends them to a file.
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that diffs are appended to
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Truncates the save file so that a run starts with an empty diff.
  pub fn init(&self) -> Result<()> {
    if let Some(ref diff_path) = self.save_diff_path {
      std::fs::write(diff_path, "")
        .with_context(|| format!("Failed to create diff file: {}", diff_path.display()))?;
    }
    Ok(())
  }

  /// Whether any diff output is requested at all.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Displays and/or saves the diff between `original` and `new`.
  ///
  /// Diffs for several files are appended to the same save file, producing
  /// one consolidated diff per run.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let diff_content = render_diff(path, original, new);

    if self.show_diff {
      for line in diff_content.lines() {
        match line.chars().next() {
          Some('+') => eprintln!("{}", line.if_supports_color(Stream::Stderr, |s| s.green())),
          Some('-') => eprintln!("{}", line.if_supports_color(Stream::Stderr, |s| s.red())),
          _ => eprintln!("{}", line),
        }
      }
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(diff_content.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Renders a line diff with a `Diff for <path>:` heading.
///
/// Every change line is terminated, even when the input lacks a trailing
/// newline, and the block ends with an empty line.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);
  let mut out = format!("Diff for {}:\n", path.display());

  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    out.push_str(sign);
    out.push_str(change.value().trim_end_matches(['\r', '\n']));
    out.push('\n');
  }

  out.push('\n');
  out
}
