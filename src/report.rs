//! # Report Module
//!
//! Per-file outcomes of a run, the summary derived from them, and JSON/CSV
//! report generation for CI systems that want more than console output.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StampError;
use crate::processor::transformer::{LineAction, TransformResult};

/// Overall outcome for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
  /// Header (and footer) already matched the canonical line.
  UpToDate,
  /// The file was rewritten, or would be in check mode.
  Changed,
  /// Filtered out before being read.
  Skipped,
  /// Reading, writing or locating the file failed.
  Failed,
}

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  pub status: FileStatus,
  /// What happened to the first line, if the file was transformed
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub header: Option<LineAction>,
  /// What happened to the last line, if footer stamping is enabled
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub footer: Option<LineAction>,
  /// Skip reason or error message
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

impl FileReport {
  /// Report for a file that went through the transformer.
  pub fn stamped(path: &Path, result: &TransformResult) -> Self {
    Self {
      path: path.to_path_buf(),
      status: if result.changed {
        FileStatus::Changed
      } else {
        FileStatus::UpToDate
      },
      header: Some(result.header),
      footer: result.footer,
      reason: None,
    }
  }

  pub fn skipped(path: &Path, reason: impl Into<String>) -> Self {
    Self {
      path: path.to_path_buf(),
      status: FileStatus::Skipped,
      header: None,
      footer: None,
      reason: Some(reason.into()),
    }
  }

  pub fn failed(path: &Path, error: &StampError) -> Self {
    Self {
      path: path.to_path_buf(),
      status: FileStatus::Failed,
      header: None,
      footer: None,
      reason: Some(error.to_string()),
    }
  }

  pub fn is_changed(&self) -> bool {
    self.status == FileStatus::Changed
  }
}

/// Helper module for serializing/deserializing PathBuf
mod path_serialization {
  use std::path::PathBuf;

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &std::path::Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingSummary {
  /// Number of files reported on, including skipped and failed ones
  pub total_files: usize,
  pub up_to_date: usize,
  pub changed: usize,
  pub skipped: usize,
  pub failed: usize,
  pub headers_added: usize,
  pub headers_updated: usize,
  pub footers_added: usize,
  pub footers_updated: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: files.len(),
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
      ..Self::default()
    };

    for file in files {
      match file.status {
        FileStatus::UpToDate => summary.up_to_date += 1,
        FileStatus::Changed => summary.changed += 1,
        FileStatus::Skipped => summary.skipped += 1,
        FileStatus::Failed => summary.failed += 1,
      }

      match file.header {
        Some(LineAction::Added) => summary.headers_added += 1,
        Some(LineAction::Updated) => summary.headers_updated += 1,
        _ => {}
      }
      match file.footer {
        Some(LineAction::Added) => summary.footers_added += 1,
        Some(LineAction::Updated) => summary.footers_updated += 1,
        _ => {}
      }
    }

    summary
  }
}

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
  /// JSON format for machine readability
  Json,
  /// CSV format for spreadsheet compatibility
  Csv,
}

impl std::fmt::Display for ReportFormat {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ReportFormat::Json => write!(f, "JSON"),
      ReportFormat::Csv => write!(f, "CSV"),
    }
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Report Generator for writing run reports to disk
pub struct ReportGenerator<'a> {
  format: ReportFormat,
  output_path: &'a Path,
}

impl<'a> ReportGenerator<'a> {
  pub const fn new(format: ReportFormat, output_path: &'a Path) -> Self {
    Self { format, output_path }
  }

  /// Renders the report and writes it to the output path.
  pub fn generate(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
    let content = self.render(files, summary)?;
    fs::write(self.output_path, content)
      .with_context(|| format!("Failed to write {} report to {}", self.format, self.output_path.display()))
  }

  /// Renders the report content without writing it.
  pub fn render(&self, files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    match self.format {
      ReportFormat::Json => Self::render_json(files, summary),
      ReportFormat::Csv => Ok(Self::render_csv(files, summary)),
    }
  }

  fn render_json(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
    let report = JsonReport { summary, files };
    serde_json::to_string_pretty(&report).with_context(|| "Failed to serialize JSON report")
  }

  fn render_csv(files: &[FileReport], summary: &ProcessingSummary) -> String {
    let mut csv = String::from("path,status,header,footer,reason\n");

    for file in files {
      csv.push_str(&format!(
        "{},{},{},{},{}\n",
        csv_field(&file.path.to_string_lossy()),
        status_label(file.status),
        file.header.map_or("", action_label),
        file.footer.map_or("", action_label),
        csv_field(file.reason.as_deref().unwrap_or("")),
      ));
    }

    csv.push_str("\n# Summary\n");
    csv.push_str(&format!("Total files,{}\n", summary.total_files));
    csv.push_str(&format!("Up to date,{}\n", summary.up_to_date));
    csv.push_str(&format!("Changed,{}\n", summary.changed));
    csv.push_str(&format!("Skipped,{}\n", summary.skipped));
    csv.push_str(&format!("Failed,{}\n", summary.failed));
    csv.push_str(&format!(
      "Processing time (seconds),{:.2}\n",
      summary.processing_time.as_secs_f64()
    ));

    csv
  }
}

const fn status_label(status: FileStatus) -> &'static str {
  match status {
    FileStatus::UpToDate => "up-to-date",
    FileStatus::Changed => "changed",
    FileStatus::Skipped => "skipped",
    FileStatus::Failed => "failed",
  }
}

const fn action_label(action: LineAction) -> &'static str {
  match action {
    LineAction::UpToDate => "up-to-date",
    LineAction::Added => "added",
    LineAction::Updated => "updated",
  }
}

/// Quotes a CSV field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
  if value.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", value.replace('"', "\"\""))
  } else {
    value.to_string()
  }
}
