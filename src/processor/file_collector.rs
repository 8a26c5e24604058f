//! # File Collector Module
//!
//! Expands the user's path arguments into candidate files: regular files are
//! taken as given, directories are walked recursively, and anything else is
//! tried as a glob pattern.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::error::StampError;

/// How a candidate file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
  /// Named directly on the command line (or matched by a glob).
  Explicit,
  /// Found while walking a directory.
  Walked,
}

/// A file the processor should consider stamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub path: PathBuf,
  pub origin: Origin,
}

/// Result of expanding path arguments.
#[derive(Debug, Default)]
pub struct Collection {
  /// Deduplicated candidates, sorted by path.
  pub files: Vec<Candidate>,
  /// Arguments that matched nothing and traversal errors.
  pub failures: Vec<StampError>,
}

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// File collector for path expansion and directory traversal.
#[derive(Debug, Default)]
pub struct FileCollector;

impl FileCollector {
  pub const fn new() -> Self {
    Self
  }

  /// Expands `patterns` into candidate files.
  ///
  /// A file reachable from several arguments is returned once; if any of
  /// those arguments named it explicitly it keeps [`Origin::Explicit`].
  pub fn collect(&self, patterns: &[String]) -> Result<Collection> {
    let mut seen: BTreeMap<PathBuf, Candidate> = BTreeMap::new();
    let mut failures = Vec::new();

    let mut add = |path: PathBuf, origin: Origin| -> Result<()> {
      let key = absolutize_path(&path)?;
      match seen.get_mut(&key) {
        Some(existing) => {
          if origin == Origin::Explicit {
            existing.origin = Origin::Explicit;
          }
        }
        None => {
          seen.insert(key, Candidate { path, origin });
        }
      }
      Ok(())
    };

    for pattern in patterns {
      let path = PathBuf::from(pattern);
      if path.is_file() {
        add(path, Origin::Explicit)?;
      } else if path.is_dir() {
        let (files, errors) = self.traverse_directory(&path);
        for file in files {
          add(file, Origin::Walked)?;
        }
        failures.extend(errors);
      } else {
        let matches = expand_glob(pattern);
        if matches.is_empty() {
          failures.push(StampError::PathNotFound { path });
          continue;
        }
        for matched in matches {
          if matched.is_dir() {
            let (files, errors) = self.traverse_directory(&matched);
            for file in files {
              add(file, Origin::Walked)?;
            }
            failures.extend(errors);
          } else {
            add(matched, Origin::Explicit)?;
          }
        }
      }
    }

    Ok(Collection {
      files: seen.into_values().collect(),
      failures,
    })
  }

  /// Recursively collects the regular files under `dir`.
  ///
  /// Symlinks are not followed and version-control directories are skipped.
  /// Unreadable entries are returned as errors alongside the files found.
  pub fn traverse_directory(&self, dir: &Path) -> (Vec<PathBuf>, Vec<StampError>) {
    debug!("Scanning directory: {}", dir.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    let mut errors = Vec::new();

    let walker = WalkDir::new(dir)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| {
        !(entry.depth() > 0
          && entry.file_type().is_dir()
          && SKIPPED_DIRS.iter().any(|name| entry.file_name() == *name))
      });

    for entry in walker {
      match entry {
        Ok(entry) => {
          if entry.file_type().is_file() {
            files.push(entry.into_path());
          } else if entry.file_type().is_symlink() {
            trace!("Skipping: {} (symlink)", entry.path().display());
          }
        }
        Err(e) => {
          let path = e.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
          let error = match e.into_io_error() {
            Some(io_error) => StampError::from_io(&path, io_error),
            None => StampError::Io {
              path,
              source: std::io::Error::other("filesystem loop detected"),
            },
          };
          errors.push(error);
        }
      }
    }

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    (files, errors)
  }
}

/// Expands a glob pattern, returning nothing if it is invalid or matches nothing.
fn expand_glob(pattern: &str) -> Vec<PathBuf> {
  match glob::glob(pattern) {
    Ok(paths) => paths
      .filter_map(|entry| match entry {
        Ok(path) => Some(path),
        Err(e) => {
          debug!("Error with glob pattern {}: {}", pattern, e);
          None
        }
      })
      .collect(),
    Err(e) => {
      debug!("Invalid glob pattern {}: {}", pattern, e);
      Vec::new()
    }
  }
}

/// Converts a potentially relative path to an absolute path.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  if path.is_absolute() {
    Ok(path.to_path_buf())
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    Ok(current_dir.join(path))
  }
}
