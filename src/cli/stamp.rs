//! # Stamp Command
//!
//! Parses the stamping options, merges them over the configuration file,
//! runs the processor and turns the outcome into console output, reports and
//! an exit code.

use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use copyrighter::canonical::{CommentMarker, canonicalize};
use copyrighter::config::{Config, load_config};
use copyrighter::diff::DiffManager;
use copyrighter::file_filter::ExtensionFilter;
use copyrighter::{error_log, info_log};
use copyrighter::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use copyrighter::output::{print_hint, print_summary};
use copyrighter::processor::{Processor, ProcessorConfig, StampMode};
use copyrighter::report::{FileReport, ProcessingSummary, ReportFormat, ReportGenerator};
use tracing::debug;

/// Arguments for stamping copyright lines
#[derive(Args, Debug, Default)]
pub struct StampArgs {
  /// Files, directories or glob patterns to stamp. Directories are walked
  /// recursively.
  #[arg(required = false, value_name = "PATHS")]
  pub patterns: Vec<String>,

  /// Copyright text to stamp, e.g. "Copyright 2026 Acme Corp"
  #[arg(long, short = 'c', value_name = "TEXT")]
  pub copyright: Option<String>,

  /// Comment prefix placed before the copyright text [default: //]
  #[arg(long, value_name = "STR")]
  pub comment_marker: Option<String>,

  /// Only stamp the first line of each file
  #[arg(long)]
  pub header_only: bool,

  /// Report what would change without modifying files; exit 1 if anything
  /// would change
  #[arg(long)]
  pub check: bool,

  /// Show diff of pending changes in check mode
  #[arg(long)]
  pub show_diff: bool,

  /// Save diff of pending changes to a file in check mode
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Exit 1 if any file could not be processed
  #[arg(long)]
  pub strict: bool,

  /// File patterns to ignore (gitignore syntax, repeatable)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Only stamp files with these extensions when walking directories
  /// (repeatable, case-insensitive) [default: go]
  #[arg(long, value_name = "EXT")]
  pub include_ext: Vec<String>,

  /// Never stamp files with these extensions when walking directories
  /// (repeatable, case-insensitive)
  #[arg(long, value_name = "EXT")]
  pub exclude_ext: Vec<String>,

  /// Path to config file (default: .copyrighter.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Write a CSV report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_csv: Option<PathBuf>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Settings after merging command-line flags over the configuration file.
#[derive(Debug)]
struct Settings {
  copyright: String,
  comment_marker: Option<String>,
  mode: StampMode,
  strict: bool,
  ignore: Vec<String>,
  extension_filter: ExtensionFilter,
}

impl StampArgs {
  /// Validate the arguments and return an error if invalid
  fn validate(&self) -> Result<(), String> {
    if self.patterns.is_empty() {
      return Err("Missing required argument: <PATHS>...".to_string());
    }
    Ok(())
  }

  /// Merges flags over the configuration file. Flags win.
  fn merge(&self, config: Option<Config>) -> Result<Settings, String> {
    let config = config.unwrap_or_default();

    let copyright = self
      .copyright
      .clone()
      .or(config.copyright)
      .ok_or_else(|| "Missing required argument: --copyright <TEXT>".to_string())?;

    let footer = !self.header_only && config.footer.unwrap_or(true);

    let mut ignore = config.ignore;
    ignore.extend(self.ignore.iter().cloned());

    let mut extension_filter = ExtensionFilter::new(&config.extensions);
    extension_filter.merge_cli(self.include_ext.clone(), self.exclude_ext.clone());

    Ok(Settings {
      copyright,
      comment_marker: self.comment_marker.clone().or(config.comment_marker),
      mode: StampMode::from_footer_flag(footer),
      strict: self.strict || config.strict.unwrap_or(false),
      ignore,
      extension_filter,
    })
  }
}

/// Run the stamp command with the given arguments
pub fn run_stamp(args: StampArgs) -> Result<()> {
  if let Err(e) = args.validate() {
    error_log!("{e}");
    process::exit(1);
  }

  // Initialize tracing subscriber for structured logging
  init_tracing(args.quiet, args.verbose);

  // Set verbose mode for output formatting and info_log! macro
  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let workspace_root = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  debug!("Using workspace root: {}", workspace_root.display());

  let config = load_config(args.config.as_deref(), &workspace_root, args.no_config)?;

  let settings = match args.merge(config) {
    Ok(settings) => settings,
    Err(e) => {
      error_log!("{e}");
      process::exit(1);
    }
  };
  debug!("Effective settings: {:?}", settings);

  // The canonical line is computed once; invalid text stops the run before any
  // file is touched.
  let canonical = match settings
    .comment_marker
    .as_deref()
    .map_or_else(|| Ok(CommentMarker::default()), CommentMarker::new)
    .and_then(|marker| canonicalize(&settings.copyright, &marker))
  {
    Ok(canonical) => canonical,
    Err(e) => {
      error_log!("{e}");
      process::exit(1);
    }
  };
  debug!("Canonical line: {}", canonical);

  if (args.show_diff || args.save_diff.is_some()) && !args.check {
    debug!("--show-diff and --save-diff only apply with --check");
  }
  let diff_manager = DiffManager::new(args.show_diff, args.save_diff.clone());
  if args.check {
    diff_manager.init()?;
  }

  let processor = Processor::new(ProcessorConfig {
    mode: settings.mode,
    check_only: args.check,
    print_progress: true,
    ignore_patterns: settings.ignore,
    diff_manager: Some(diff_manager),
    extension_filter: Some(settings.extension_filter),
    ..ProcessorConfig::new(canonical, workspace_root)
  })?;

  let start_time = Instant::now();
  let file_reports = processor.process(&args.patterns)?;
  let summary = ProcessingSummary::from_reports(&file_reports, start_time.elapsed());

  print_summary(&summary);

  if args.check && summary.changed > 0 {
    print_hint("Run without --check to apply these changes.");
  }

  write_report(ReportFormat::Json, args.report_json.as_deref(), &file_reports, &summary);
  write_report(ReportFormat::Csv, args.report_csv.as_deref(), &file_reports, &summary);

  if let Some(code) = exit_code(args.check, settings.strict, &summary) {
    process::exit(code);
  }

  Ok(())
}

fn write_report(format: ReportFormat, output_path: Option<&Path>, files: &[FileReport], summary: &ProcessingSummary) {
  let Some(output_path) = output_path else {
    return;
  };

  let report_generator = ReportGenerator::new(format, output_path);
  if let Err(e) = report_generator.generate(files, summary) {
    eprintln!("Error generating {} report: {:#}", format, e);
  } else {
    info_log!("Generated {} report at {}", format, output_path.display());
  }
}

/// Non-zero exit code for the run, if any.
///
/// Per-file failures only fail the run in strict mode; check mode fails when
/// anything would change.
const fn exit_code(check: bool, strict: bool, summary: &ProcessingSummary) -> Option<i32> {
  if (check && summary.changed > 0) || (strict && summary.failed > 0) {
    Some(1)
  } else {
    None
  }
}
