//! # Ignore Module
//!
//! Decides which files are never stamped. Patterns use gitignore syntax and
//! come from three places, all matched relative to the workspace root:
//! - a `.copyrightignore` file in the workspace root
//! - the `ignore` list of the configuration file
//! - `--ignore` command-line arguments

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::verbose_log;

/// Name of the ignore file read from the workspace root.
pub const IGNORE_FILENAME: &str = ".copyrightignore";

/// Manager for handling ignore patterns from various sources.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
///
/// use copyrighter::ignore::IgnoreManager;
///
/// # fn main() -> anyhow::Result<()> {
/// let manager = IgnoreManager::new(Path::new("/repo"), &["vendor/".to_string()])?;
/// assert!(manager.is_ignored(Path::new("/repo/vendor/lib.go")));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct IgnoreManager {
  matcher: Gitignore,
  root: PathBuf,
}

impl IgnoreManager {
  /// Creates a manager from explicit patterns only.
  ///
  /// # Errors
  ///
  /// Returns an error if any pattern is not valid gitignore syntax.
  pub fn new(root: &Path, patterns: &[String]) -> Result<Self> {
    Self::build(root, patterns, false)
  }

  /// Creates a manager from explicit patterns plus the root `.copyrightignore`
  /// file, if one exists.
  pub fn with_ignore_file(root: &Path, patterns: &[String]) -> Result<Self> {
    Self::build(root, patterns, true)
  }

  fn build(root: &Path, patterns: &[String], load_ignore_file: bool) -> Result<Self> {
    let mut builder = GitignoreBuilder::new(root);

    if load_ignore_file {
      let ignore_path = root.join(IGNORE_FILENAME);
      if ignore_path.is_file() {
        verbose_log!("Loading ignore file: {}", ignore_path.display());
        if let Some(err) = builder.add(&ignore_path) {
          return Err(anyhow::Error::new(err))
            .with_context(|| format!("Failed to read ignore file: {}", ignore_path.display()));
        }
      }
    }

    for pattern in patterns {
      // Normalize pattern: convert backslashes to forward slashes
      let pattern = pattern.replace('\\', "/");
      builder
        .add_line(None, &pattern)
        .with_context(|| format!("Invalid ignore pattern: {}", pattern))?;
    }

    let matcher = builder.build().with_context(|| "Failed to build ignore matcher")?;

    Ok(Self {
      matcher,
      root: root.to_path_buf(),
    })
  }

  /// Checks if a file should be ignored.
  pub fn is_ignored(&self, path: &Path) -> bool {
    if self.matcher.is_empty() {
      return false;
    }

    let relative = self.relative_to_root(path);
    let ignored = self.matcher.matched_path_or_any_parents(&relative, false).is_ignore();
    if ignored {
      verbose_log!("Skipping: {} (matches ignore pattern)", path.display());
    }
    ignored
  }

  /// Paths outside the root keep only their normal components so that
  /// unanchored patterns still apply to them.
  fn relative_to_root(&self, path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
      path.to_path_buf()
    } else {
      self.root.join(path)
    };

    let stripped = absolute.strip_prefix(&self.root).unwrap_or(absolute.as_path());
    stripped
      .components()
      .filter_map(|component| match component {
        Component::Normal(part) => Some(part),
        _ => None,
      })
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  fn patterns(list: &[&str]) -> Vec<String> {
    list.iter().map(|p| p.to_string()).collect()
  }

  #[test]
  fn test_no_patterns_ignores_nothing() {
    let manager = IgnoreManager::new(Path::new("/repo"), &[]).unwrap();
    assert!(!manager.is_ignored(Path::new("/repo/main.go")));
  }

  #[test]
  fn test_glob_pattern() {
    let manager = IgnoreManager::new(Path::new("/repo"), &patterns(&["*.pb.go"])).unwrap();
    assert!(manager.is_ignored(Path::new("/repo/api/service.pb.go")));
    assert!(!manager.is_ignored(Path::new("/repo/api/service.go")));
  }

  #[test]
  fn test_directory_pattern() {
    let manager = IgnoreManager::new(Path::new("/repo"), &patterns(&["vendor/"])).unwrap();
    assert!(manager.is_ignored(Path::new("/repo/vendor/lib.go")));
    assert!(manager.is_ignored(Path::new("/repo/third_party/vendor/deep/lib.go")));
    assert!(!manager.is_ignored(Path::new("/repo/src/vendor.go")));
  }

  #[test]
  fn test_relative_paths_resolve_against_root() {
    let manager = IgnoreManager::new(Path::new("/repo"), &patterns(&["generated/"])).unwrap();
    assert!(manager.is_ignored(Path::new("generated/code.go")));
    assert!(manager.is_ignored(Path::new("./generated/code.go")));
  }

  #[test]
  fn test_paths_outside_root() {
    let manager = IgnoreManager::new(Path::new("/repo"), &patterns(&["*.gen.go"])).unwrap();
    assert!(manager.is_ignored(Path::new("/elsewhere/x.gen.go")));
  }

  #[test]
  fn test_negation() {
    let manager = IgnoreManager::new(Path::new("/repo"), &patterns(&["*.go", "!keep.go"])).unwrap();
    assert!(manager.is_ignored(Path::new("/repo/a.go")));
    assert!(!manager.is_ignored(Path::new("/repo/keep.go")));
  }

  #[test]
  fn test_ignore_file_loaded_from_root() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::write(root.join(IGNORE_FILENAME), "# generated code\nzz_generated.go\nthird_party/\n")?;

    let manager = IgnoreManager::with_ignore_file(root, &[])?;
    assert!(manager.is_ignored(&root.join("pkg/zz_generated.go")));
    assert!(manager.is_ignored(&root.join("third_party/x/y.go")));
    assert!(!manager.is_ignored(&root.join("pkg/api.go")));

    // Without the file-loading constructor the file is not consulted
    let manager = IgnoreManager::new(root, &[])?;
    assert!(!manager.is_ignored(&root.join("pkg/zz_generated.go")));
    Ok(())
  }
}
