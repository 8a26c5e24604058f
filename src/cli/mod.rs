//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod stamp;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use stamp::{StampArgs, run_stamp};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("COPYRIGHTER_GIT_HASH"),
  " ",
  env!("COPYRIGHTER_GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Stamp a header and footer into every .go file under src/
  copyrighter --copyright \"Copyright 2026 Acme Corp\" src/

  # Header only, with a shell-style comment marker
  copyrighter -c \"Copyright 2026 Acme Corp\" --comment-marker \"#\" --header-only --include-ext sh scripts/

  # Report what would change and fail if anything is stale (CI)
  copyrighter --check -c \"Copyright 2026 Acme Corp\" .

  # Show and save the pending changes as a diff
  copyrighter --check --show-diff --save-diff changes.diff -c \"Copyright 2026 Acme Corp\" .

  # Skip generated and vendored code
  copyrighter -c \"Copyright 2026 Acme Corp\" --ignore \"vendor/\" --ignore \"*.pb.go\" .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub stamp_args: StampArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
