//! # File Filter Module
//!
//! This module contains components for filtering files based on ignore
//! patterns and file extensions.

use std::path::Path;

use anyhow::Result;

use crate::config::ExtensionConfig;
use crate::ignore::IgnoreManager;

/// Extensions stamped when walking directories if nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["go"];

/// Result of a file filtering operation.
#[derive(Debug)]
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// Trait for components that filter files based on certain criteria.
pub trait FileFilter: Send + Sync {
  /// Determines whether a file should be processed.
  fn should_process(&self, path: &Path) -> Result<FilterResult>;
}

/// Filter that excludes files matching ignore patterns.
pub struct IgnoreFilter {
  ignore_manager: IgnoreManager,
}

impl IgnoreFilter {
  pub const fn new(ignore_manager: IgnoreManager) -> Self {
    Self { ignore_manager }
  }
}

impl FileFilter for IgnoreFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if self.ignore_manager.is_ignored(path) {
      Ok(FilterResult::skip("Matches ignore pattern"))
    } else {
      Ok(FilterResult::process())
    }
  }
}

/// Filter that selects files by extension.
///
/// Extensions are matched case-insensitively against the end of the file
/// name, so multi-part extensions like `pb.go` work. An empty include list
/// admits every extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
  include: Vec<String>,
  exclude: Vec<String>,
}

impl ExtensionFilter {
  /// Creates a filter from configuration, falling back to [`DEFAULT_EXTENSIONS`].
  pub fn new(config: &ExtensionConfig) -> Self {
    let include = match config.include {
      Some(ref include) => normalize_extensions(include),
      None => DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
    };
    Self {
      include,
      exclude: normalize_extensions(&config.exclude),
    }
  }

  /// Applies command-line lists on top of the configured ones.
  ///
  /// A non-empty `include` replaces the configured include list; `exclude`
  /// entries are added to it.
  pub fn merge_cli(&mut self, include: Vec<String>, exclude: Vec<String>) {
    if !include.is_empty() {
      self.include = normalize_extensions(&include);
    }
    self.exclude.extend(normalize_extensions(&exclude));
  }

  fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name() else {
      return false;
    };
    let name = name.to_string_lossy().to_lowercase();
    extensions.iter().any(|ext| {
      name
        .strip_suffix(ext.as_str())
        .is_some_and(|stem| stem.len() > 1 && stem.ends_with('.'))
    })
  }
}

impl Default for ExtensionFilter {
  fn default() -> Self {
    Self::new(&ExtensionConfig::default())
  }
}

impl FileFilter for ExtensionFilter {
  fn should_process(&self, path: &Path) -> Result<FilterResult> {
    if Self::has_extension(path, &self.exclude) {
      return Ok(FilterResult::skip("Excluded extension"));
    }
    if !self.include.is_empty() && !Self::has_extension(path, &self.include) {
      return Ok(FilterResult::skip("Unsupported file type"));
    }
    Ok(FilterResult::process())
  }
}

fn normalize_extensions(extensions: &[String]) -> Vec<String> {
  extensions
    .iter()
    .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
    .filter(|ext| !ext.is_empty())
    .collect()
}
