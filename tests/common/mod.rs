#![allow(dead_code)]

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use assert_cmd::Command;

pub const COPYRIGHT: &str = "Copyright 2026 Acme Corp";

/// The canonical line for [`COPYRIGHT`] with the default marker.
pub const LINE: &str = "// Copyright 2026 Acme Corp";

/// Builds a `copyrighter` command running in `dir`, isolated from the
/// caller's environment and with colors disabled.
pub fn copyrighter(dir: &Path) -> Command {
  let mut cmd = Command::cargo_bin("copyrighter").expect("binary should be built");
  cmd
    .current_dir(dir)
    .env_remove("COPYRIGHTER_CONFIG")
    .env_remove("RUST_LOG")
    .arg("--colors=never");
  cmd
}

/// Writes `content` to `dir/rel`, creating parent directories.
pub fn write_file(dir: &Path, rel: &str, content: &str) -> Result<()> {
  let path = dir.join(rel);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_file(dir: &Path, rel: &str) -> Result<String> {
  let path = dir.join(rel);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Expected content after stamping a newline-terminated `body` that has no
/// comment lines at either end, with header and footer.
pub fn stamped(body: &str) -> String {
  format!("{LINE}\n\n{body}\n{LINE}\n")
}
