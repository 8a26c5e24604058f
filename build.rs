use std::process::Command;

fn main() {
  println!(
    "cargo:rustc-env=COPYRIGHTER_GIT_HASH={}",
    git_output(&["rev-parse", "--short", "HEAD"])
  );
  println!(
    "cargo:rustc-env=COPYRIGHTER_GIT_DATE={}",
    git_output(&["log", "-1", "--format=%cs"])
  );

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
}

/// Runs git and returns its trimmed stdout, or "unknown" outside a repository
/// or without git installed.
fn git_output(args: &[&str]) -> String {
  Command::new("git")
    .args(args)
    .output()
    .ok()
    .filter(|output| output.status.success())
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .map(|stdout| stdout.trim().to_string())
    .filter(|value| !value.is_empty())
    .unwrap_or_else(|| "unknown".to_string())
}
