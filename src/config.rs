//! # Configuration Module
//!
//! This module provides configuration support for copyrighter, so a
//! repository can pin its copyright text, comment marker, stamping mode and
//! file selection in one place instead of repeating CLI flags in every hook.
//!
//! Configuration is read from a `.copyrighter.toml` file or from the path in
//! the `COPYRIGHTER_CONFIG` environment variable. Command-line flags always
//! take precedence over values from the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::verbose_log;

/// The default config file name.
pub const DEFAULT_CONFIG_FILENAME: &str = ".copyrighter.toml";

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "COPYRIGHTER_CONFIG";

/// Configuration for extension-based file filtering.
///
/// If `include` is specified, only files with those extensions are stamped
/// when walking directories. `exclude` removes extensions from whatever set
/// is active.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExtensionConfig {
  /// If specified, replaces the default extension list.
  #[serde(default)]
  pub include: Option<Vec<String>>,

  /// Extensions to exclude from processing.
  #[serde(default)]
  pub exclude: Vec<String>,
}

/// Main configuration struct, loaded from `.copyrighter.toml`.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
  /// Copyright text to stamp.
  #[serde(default)]
  pub copyright: Option<String>,

  /// Comment prefix, e.g. `//` or `#`.
  #[serde(default)]
  pub comment_marker: Option<String>,

  /// Whether to stamp the last line as well as the first.
  #[serde(default)]
  pub footer: Option<bool>,

  /// Whether per-file failures make the run exit non-zero.
  #[serde(default)]
  pub strict: Option<bool>,

  /// Ignore patterns, merged with `--ignore`.
  #[serde(default)]
  pub ignore: Vec<String>,

  /// Extension-based file filtering configuration.
  #[serde(default)]
  pub extensions: ExtensionConfig,
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  ParseError { path: PathBuf, source: toml::de::Error },

  /// A configuration value is invalid.
  #[error("Invalid value for '{field}': {message}")]
  Invalid { field: String, message: String },
}

impl Config {
  /// Load configuration from a file.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
      path: path.to_path_buf(),
      source: e,
    })?;

    Self::parse(&content).map_err(|e| match e {
      ConfigError::ParseError { source, .. } => ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
      },
      other => other,
    })
  }

  /// Parse and validate configuration from TOML text.
  pub fn parse(content: &str) -> Result<Self, ConfigError> {
    let config: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError {
      path: PathBuf::new(),
      source: e,
    })?;

    config.validate()?;
    Ok(config.normalize())
  }

  /// Checks that:
  /// - `comment-marker`, if set, is non-empty
  /// - `copyright`, if set, is not blank
  /// - extension entries don't include the leading dot
  fn validate(&self) -> Result<(), ConfigError> {
    if let Some(ref marker) = self.comment_marker
      && marker.trim().is_empty()
    {
      return Err(ConfigError::Invalid {
        field: "comment-marker".to_string(),
        message: "cannot be empty".to_string(),
      });
    }

    if let Some(ref copyright) = self.copyright
      && copyright.trim().is_empty()
    {
      return Err(ConfigError::Invalid {
        field: "copyright".to_string(),
        message: "cannot be empty".to_string(),
      });
    }

    let include = self.extensions.include.iter().flatten();
    for ext in include.chain(self.extensions.exclude.iter()) {
      if ext.starts_with('.') {
        return Err(ConfigError::Invalid {
          field: "extensions".to_string(),
          message: format!("extension '{}' should not include leading dot", ext),
        });
      }
    }

    Ok(())
  }

  /// Lowercases extension entries for case-insensitive matching.
  fn normalize(mut self) -> Self {
    if let Some(ref mut include) = self.extensions.include {
      for ext in include.iter_mut() {
        *ext = ext.to_lowercase();
      }
    }
    for ext in &mut self.extensions.exclude {
      *ext = ext.to_lowercase();
    }
    self
  }
}

/// Finds the config file to load, if any.
///
/// Candidates, first match wins:
/// 1. `explicit_path` (the `--config` flag)
/// 2. the `COPYRIGHTER_CONFIG` environment variable, if it names an existing file
/// 3. `.copyrighter.toml` in `workspace_root`
///
/// An explicit path is returned even if it does not exist, so that loading it
/// reports the problem instead of silently falling back to defaults.
pub fn discover_config_path(explicit_path: Option<&Path>, workspace_root: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Config (--config): {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Some(from_env) = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from) {
    if from_env.is_file() {
      verbose_log!("Config ({}): {}", CONFIG_ENV_VAR, from_env.display());
      return Some(from_env);
    }
    verbose_log!("Ignoring {}: {} is not a file", CONFIG_ENV_VAR, from_env.display());
  }

  let candidate = workspace_root.join(DEFAULT_CONFIG_FILENAME);
  if candidate.is_file() {
    verbose_log!("Config (workspace): {}", candidate.display());
    Some(candidate)
  } else {
    verbose_log!("No {} found; using defaults", DEFAULT_CONFIG_FILENAME);
    None
  }
}

/// Loads the config file chosen by [`discover_config_path`].
///
/// Returns `Ok(None)` when `no_config` is set or there is nothing to load.
pub fn load_config(explicit_path: Option<&Path>, workspace_root: &Path, no_config: bool) -> Result<Option<Config>> {
  if no_config {
    verbose_log!("Skipping config discovery (--no-config)");
    return Ok(None);
  }

  discover_config_path(explicit_path, workspace_root)
    .map(|path| Config::load(&path).with_context(|| format!("Failed to load config from {}", path.display())))
    .transpose()
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_parse_full_config() {
    let config_content = concat!(
      "copyright = \"Copyright 2026 Acme Corp\"\n",
      "comment-marker = \"#\"\n",
      "footer = false\n",
      "strict = true\n",
      "ignore = [\"vendor/\", \"**/*.pb.go\"]\n",
      "\n",
      "[extensions]\n",
      "include = [\"go\", \"RS\"]\n",
      "exclude = [\"min.js\"]\n",
    );

    let config = Config::parse(config_content).expect("valid config should parse");

    assert_eq!(config.copyright.as_deref(), Some("Copyright 2026 Acme Corp"));
    assert_eq!(config.comment_marker.as_deref(), Some("#"));
    assert_eq!(config.footer, Some(false));
    assert_eq!(config.strict, Some(true));
    assert_eq!(config.ignore, vec!["vendor/", "**/*.pb.go"]);
    assert_eq!(
      config.extensions.include,
      Some(vec!["go".to_string(), "rs".to_string()])
    );
    assert_eq!(config.extensions.exclude, vec!["min.js"]);
  }

  #[test]
  fn test_parse_empty_config() {
    let config = Config::parse("").expect("empty config should parse");
    assert_eq!(config, Config::default());
  }

  #[test]
  fn test_parse_unknown_key_fails() {
    let result = Config::parse("colour = \"red\"\n");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
  }

  #[test]
  fn test_parse_unknown_extensions_key_fails() {
    let result = Config::parse("[extensions]\ninclde = [\"go\"]\n");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
  }

  #[test]
  fn test_validate_empty_marker() {
    let result = Config::parse("comment-marker = \"  \"\n");
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_validate_blank_copyright() {
    let result = Config::parse("copyright = \"\"\n");
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_validate_extension_leading_dot() {
    let result = Config::parse("[extensions]\ninclude = [\".go\"]\n");
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));

    let result = Config::parse("[extensions]\nexclude = [\".js\"]\n");
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
  }

  #[test]
  fn test_load_config_from_file() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "copyright = \"Copyright Acme\"\n").expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.copyright.as_deref(), Some("Copyright Acme"));
  }

  #[test]
  fn test_load_parse_error_carries_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "copyright = [").expect("write config");

    let err = Config::load(&config_path).expect_err("should fail");
    assert!(err.to_string().contains(DEFAULT_CONFIG_FILENAME));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/.copyrighter.toml"));
    assert!(matches!(
      result.expect_err("should fail"),
      ConfigError::ReadError { .. }
    ));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom-config.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_workspace_root() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join(DEFAULT_CONFIG_FILENAME);
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_load_config_disabled() {
    let temp_dir = TempDir::new().expect("create temp dir");
    std::fs::write(temp_dir.path().join(DEFAULT_CONFIG_FILENAME), "footer = false\n").expect("write config");

    let config = load_config(None, temp_dir.path(), true).expect("load should succeed");
    assert!(config.is_none());
  }

  #[test]
  fn test_load_config_explicit_missing_fails() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let missing = temp_dir.path().join("missing.toml");
    assert!(load_config(Some(&missing), temp_dir.path(), false).is_err());
  }
}
