//! # Output Module
//!
//! Centralizes user-facing console output: one line per stamped file, error
//! lines on stderr, and the closing summary.
//!
//! Stdout carries per-file outcomes and the summary so that hooks can grep
//! them; `-q` silences stdout but never the error lines.

use std::path::{Component, Path};

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::processor::transformer::LineAction;
use crate::report::{FileReport, FileStatus, ProcessingSummary};

/// Which stamped line a message talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
  Header,
  Footer,
}

impl Position {
  const fn as_str(self) -> &'static str {
    match self {
      Position::Header => "header",
      Position::Footer => "footer",
    }
  }
}

/// Builds the stdout lines describing one file's outcome.
///
/// Skipped and failed files produce no stdout lines.
pub fn file_messages(report: &FileReport, workspace_root: Option<&Path>, check_only: bool) -> Vec<String> {
  let display_path = make_relative_path(&report.path, workspace_root);

  match report.status {
    FileStatus::UpToDate => vec![format!("Copyright already up to date in: {}", display_path)],
    FileStatus::Changed => {
      let mut lines = Vec::new();
      if let Some(message) = action_message(report.header, Position::Header, &display_path, check_only) {
        lines.push(message);
      }
      if let Some(message) = action_message(report.footer, Position::Footer, &display_path, check_only) {
        lines.push(message);
      }
      lines
    }
    FileStatus::Skipped | FileStatus::Failed => Vec::new(),
  }
}

fn action_message(action: Option<LineAction>, position: Position, path: &str, check_only: bool) -> Option<String> {
  let what = position.as_str();
  let message = match (action?, check_only) {
    (LineAction::UpToDate, _) => return None,
    (LineAction::Added, false) => format!("Added copyright {} to: {}", what, path),
    (LineAction::Added, true) => format!("Would add copyright {} to: {}", what, path),
    (LineAction::Updated, false) => format!("Updated copyright {} in: {}", what, path),
    (LineAction::Updated, true) => format!("Would update copyright {} in: {}", what, path),
  };
  Some(message)
}

/// Prints the outcome of one file.
///
/// Failures go to stderr regardless of quiet mode; skipped files are only
/// mentioned in verbose mode.
pub fn print_file_report(report: &FileReport, workspace_root: Option<&Path>, check_only: bool) {
  match report.status {
    FileStatus::Failed => {
      print_error(report, workspace_root);
    }
    FileStatus::Skipped => {
      if is_verbose() {
        eprintln!(
          "Skipping: {} ({})",
          make_relative_path(&report.path, workspace_root),
          report.reason.as_deref().unwrap_or("filtered")
        );
      }
    }
    FileStatus::UpToDate | FileStatus::Changed => {
      if is_quiet() {
        return;
      }
      for message in file_messages(report, workspace_root, check_only) {
        if report.is_changed() {
          println!("{}", message.if_supports_color(Stream::Stdout, |s| s.green()));
        } else {
          println!("{}", message);
        }
      }
    }
  }
}

fn print_error(report: &FileReport, workspace_root: Option<&Path>) {
  let message = format!(
    "Error processing {}: {}",
    make_relative_path(&report.path, workspace_root),
    report.reason.as_deref().unwrap_or("unknown error")
  );
  eprintln!("{}", message.if_supports_color(Stream::Stderr, |s| s.red()));
}

/// Formats the summary line: "Summary: N up to date, M changed, K failed, S skipped".
pub fn summary_line(summary: &ProcessingSummary) -> String {
  format!(
    "Summary: {} up to date, {} changed, {} failed, {} skipped",
    summary.up_to_date, summary.changed, summary.failed, summary.skipped
  )
}

/// Print the processing summary.
///
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let mut line = summary_line(summary);
  if is_verbose() {
    line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  if summary.failed > 0 {
    println!("{}", line.if_supports_color(Stream::Stdout, |s| s.red()));
  } else {
    println!("{}", line.if_supports_color(Stream::Stdout, |s| s.cyan()));
  }
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

/// Make a path relative to the workspace root for display.
///
/// Relative paths are shown as given. Absolute paths outside the root keep
/// their absolute form.
fn make_relative_path(path: &Path, workspace_root: Option<&Path>) -> String {
  let relative = match workspace_root {
    Some(root) if path.is_absolute() => pathdiff::diff_paths(path, root)
      .filter(|rel| !rel.components().any(|c| matches!(c, Component::ParentDir))),
    _ => None,
  };

  relative
    .as_deref()
    .unwrap_or(path)
    .to_string_lossy()
    .to_string()
}
