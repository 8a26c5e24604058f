//! # copyrighter
//!
//! Stamps a copyright line at the top (and bottom) of source files.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_stamp};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_stamp(cli.stamp_args)
}
