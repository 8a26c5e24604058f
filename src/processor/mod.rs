//! # Processor Module
//!
//! This module contains the core functionality for stamping copyright lines
//! into files and directories.
//!
//! The module is organized into several submodules:
//! - [`content`] - Line model of a file (lines, trailing newline, line ending)
//! - [`transformer`] - The pure header/footer transformation
//! - [`file_io`] - File reading and writing operations
//! - [`file_collector`] - Path, glob and directory expansion
//!
//! The [`Processor`] struct is the main entry point for all file operations,
//! orchestrating the submodules to provide a cohesive API.

pub mod content;
mod file_collector;
mod file_io;
pub mod transformer;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
pub use content::{FileContent, LineEnding};
pub use file_collector::{Candidate, Collection, FileCollector, Origin, absolutize_path};
pub use file_io::FileIO;
use tracing::{debug, trace, warn};
pub use transformer::{LineAction, StampMode, StampTransformer, TransformResult};

use crate::canonical::CanonicalLine;
use crate::detection::CommentDetector;
use crate::diff::DiffManager;
use crate::error::StampError;
use crate::file_filter::{ExtensionFilter, FileFilter, IgnoreFilter};
use crate::ignore::IgnoreManager;
use crate::output;
use crate::report::FileReport;

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub canonical: CanonicalLine,
  pub mode: StampMode,
  /// Root that ignore patterns are matched against and paths are shown
  /// relative to.
  pub workspace_root: PathBuf,

  // Behavior flags
  pub check_only: bool,
  /// Print one line per file as it is processed.
  pub print_progress: bool,

  // Optional components
  pub ignore_patterns: Vec<String>,
  /// Whether to read `.copyrightignore` from the workspace root.
  pub use_ignore_file: bool,
  pub diff_manager: Option<DiffManager>,
  pub detector: Option<Box<dyn CommentDetector>>,
  pub extension_filter: Option<ExtensionFilter>,
}

impl ProcessorConfig {
  /// Creates a new ProcessorConfig with required fields and sensible defaults.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(canonical, workspace_root)
  /// }
  /// ```
  pub fn new(canonical: CanonicalLine, workspace_root: PathBuf) -> Self {
    Self {
      canonical,
      mode: StampMode::default(),
      workspace_root,
      check_only: false,
      print_progress: false,
      ignore_patterns: vec![],
      use_ignore_file: true,
      diff_manager: None,
      detector: None,
      extension_filter: None,
    }
  }
}

/// Processor for stamping copyright lines into files.
///
/// The `Processor` is responsible for:
/// - Expanding path arguments into candidate files
/// - Filtering candidates by ignore patterns and extension
/// - Reading, transforming and (unless checking) rewriting each file
/// - Showing diffs in check mode
/// - Collecting report data about processed files
///
/// A failure on one file never stops the others from being processed.
pub struct Processor {
  /// Root of the current workspace.
  workspace_root: PathBuf,

  transformer: StampTransformer,

  collector: FileCollector,

  /// Applied to every candidate, named explicitly or not
  ignore_filter: IgnoreFilter,

  /// Applied only to files found by walking a directory
  extension_filter: ExtensionFilter,

  /// Whether to only report what would change without modifying files
  check_only: bool,

  print_progress: bool,

  /// Manager for handling diff creation and rendering
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor.
  ///
  /// # Errors
  ///
  /// Returns an error if an ignore pattern is invalid or the
  /// `.copyrightignore` file cannot be read.
  pub fn new(config: ProcessorConfig) -> Result<Self> {
    let workspace_root = absolutize_path(&config.workspace_root)?;

    let ignore_manager = if config.use_ignore_file {
      IgnoreManager::with_ignore_file(&workspace_root, &config.ignore_patterns)?
    } else {
      IgnoreManager::new(&workspace_root, &config.ignore_patterns)?
    };

    let mut transformer = StampTransformer::new(config.canonical, config.mode);
    if let Some(detector) = config.detector {
      transformer = transformer.with_detector(detector);
    }

    debug!(
      "Processor ready: mode={:?}, check_only={}, root={}",
      config.mode,
      config.check_only,
      workspace_root.display()
    );

    Ok(Self {
      workspace_root,
      transformer,
      collector: FileCollector::new(),
      ignore_filter: IgnoreFilter::new(ignore_manager),
      extension_filter: config.extension_filter.unwrap_or_default(),
      check_only: config.check_only,
      print_progress: config.print_progress,
      diff_manager: config.diff_manager.unwrap_or_default(),
    })
  }

  /// Stamps a single file.
  ///
  /// The new content is computed in memory and only written if it differs
  /// from what is on disk. In check mode nothing is written; a diff is shown
  /// or saved instead if requested.
  ///
  /// # Errors
  ///
  /// Returns the classified [`StampError`] if the file cannot be read, is not
  /// UTF-8, or cannot be written. The file is left untouched in every case.
  pub fn stamp_file(&self, path: &Path) -> Result<FileReport, StampError> {
    trace!("Stamping: {}", path.display());

    let (original, content) = FileIO::read_content(path)?;
    let result = self.transformer.transform(content);

    if result.changed {
      let rendered = result.content.render();
      if self.check_only {
        if let Err(e) = self.diff_manager.display_diff(path, &original, &rendered) {
          warn!("Failed to record diff for {}: {:#}", path.display(), e);
        }
      } else {
        FileIO::write_text(path, &rendered)?;
      }
    }

    Ok(FileReport::stamped(path, &result))
  }

  /// Processes every file matched by `patterns`.
  ///
  /// Each pattern may be a file, a directory (walked recursively) or a glob.
  /// Arguments that match nothing and per-file errors become failed reports;
  /// the remaining files are still processed. Reports come back in path
  /// order, after any collection failures.
  ///
  /// # Errors
  ///
  /// Only fails if the current directory cannot be determined while
  /// resolving paths.
  pub fn process(&self, patterns: &[String]) -> Result<Vec<FileReport>> {
    let start_time = std::time::Instant::now();
    let collection = self
      .collector
      .collect(patterns)
      .with_context(|| "Failed to collect files")?;

    debug!(
      "Collected {} candidate files ({} collection failures)",
      collection.files.len(),
      collection.failures.len()
    );

    let mut reports = Vec::with_capacity(collection.files.len() + collection.failures.len());

    for failure in collection.failures {
      let path = failure.path().map_or_else(PathBuf::new, Path::to_path_buf);
      self.record(&mut reports, FileReport::failed(&path, &failure));
    }

    for candidate in collection.files {
      let report = self.process_candidate(&candidate)?;
      self.record(&mut reports, report);
    }

    debug!(
      "Processed {} files in {}ms",
      reports.len(),
      start_time.elapsed().as_millis()
    );

    Ok(reports)
  }

  fn process_candidate(&self, candidate: &Candidate) -> Result<FileReport> {
    let path = &candidate.path;

    let ignore_result = self.ignore_filter.should_process(path)?;
    if !ignore_result.should_process {
      let reason = ignore_result.reason.unwrap_or_default();
      trace!("Skipping: {} ({})", path.display(), reason);
      return Ok(FileReport::skipped(path, reason));
    }

    if candidate.origin == Origin::Walked {
      let extension_result = self.extension_filter.should_process(path)?;
      if !extension_result.should_process {
        let reason = extension_result.reason.unwrap_or_default();
        trace!("Skipping: {} ({})", path.display(), reason);
        return Ok(FileReport::skipped(path, reason));
      }
    }

    match self.stamp_file(path) {
      Ok(report) => Ok(report),
      Err(e) => {
        debug!("Failed to stamp {}: {}", path.display(), e);
        Ok(FileReport::failed(path, &e))
      }
    }
  }

  fn record(&self, reports: &mut Vec<FileReport>, report: FileReport) {
    if self.print_progress {
      output::print_file_report(&report, Some(&self.workspace_root), self.check_only);
    }
    reports.push(report);
  }
}
