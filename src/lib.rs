//! # copyrighter
//!
//! A tool that stamps a single-line copyright notice as the first (and
//! optionally last) line of source files.
//!
//! `copyrighter` adds the notice where it is missing, replaces a stale
//! comment line with the current notice, and leaves everything else in the
//! file untouched. Its output is a fixed point: running it twice in a row
//! changes nothing the second time, which makes it safe for pre-commit hooks
//! and CI.
//!
//! ## Features
//!
//! * Header and footer stamping, or header only
//! * Configurable comment marker (`//`, `#`, `--`, ...)
//! * Check mode that reports pending changes (with diffs) without writing
//! * Ignore patterns in gitignore syntax and extension filtering
//! * `.copyrighter.toml` configuration and JSON/CSV reports
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use copyrighter::canonical::{CommentMarker, canonicalize};
//! use copyrighter::processor::{Processor, ProcessorConfig, StampMode};
//!
//! fn main() -> anyhow::Result<()> {
//!     let canonical = canonicalize("Copyright 2026 Acme Corp", &CommentMarker::default())?;
//!
//!     let processor = Processor::new(ProcessorConfig {
//!         mode: StampMode::HeaderOnly,
//!         ..ProcessorConfig::new(canonical, PathBuf::from("."))
//!     })?;
//!
//!     for report in processor.process(&["src".to_string()])? {
//!         println!("{}: {:?}", report.path.display(), report.status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! The transformation itself is a pure function over lines and can be used
//! without touching the filesystem:
//!
//! ```rust
//! use copyrighter::canonical::{CommentMarker, canonicalize};
//! use copyrighter::processor::{FileContent, StampMode, StampTransformer};
//!
//! let canonical = canonicalize("Copyright Acme", &CommentMarker::default()).unwrap();
//! let transformer = StampTransformer::new(canonical, StampMode::HeaderOnly);
//!
//! let result = transformer.transform(FileContent::parse("package main\n"));
//! assert_eq!(result.content.render(), "// Copyright Acme\n\npackage main\n");
//! ```
//!
//! ## Modules
//!
//! * [`canonical`] - Building the canonical copyright line
//! * [`processor`] - Transforming file content and processing files and directories
//! * [`config`] - Configuration file loading
//! * [`logging`] - Logging utilities for verbose output

pub mod canonical;
pub mod config;
pub mod detection;
pub mod diff;
pub mod error;
pub mod file_filter;
pub mod ignore;
pub mod logging;
pub mod output;
pub mod processor;
pub mod report;
