//! # Logging Module
//!
//! Console logging for copyrighter. Three macros cover the user-facing
//! channels:
//! - [`verbose_log!`] for `-v` chatter on stderr
//! - [`info_log!`] for normal progress on stdout, silenced by `-q`
//! - [`error_log!`] for fatal problems on stderr, never silenced
//!
//! Internal diagnostics use `tracing` events instead; [`init_tracing`]
//! installs the subscriber that renders them.
//!
//! ```rust
//! use copyrighter::logging::{ColorMode, set_verbose};
//! use copyrighter::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! verbose_log!("Walking directory: {}", "src");
//! info_log!("Generated JSON report at {}", "report.json");
//! ```

mod modes;

pub use modes::{ColorMode, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Writes to stderr, but only with `-v`.
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Writes to stdout unless `-q` was given.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Writes an `ERROR: ` line to stderr regardless of output mode.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        $crate::logging::print_error_log(&format!($($arg)*))
    };
}

#[doc(hidden)]
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}

#[doc(hidden)]
pub fn print_error_log(message: &str) {
  let line = format!("ERROR: {message}");
  eprintln!("{}", line.if_supports_color(Stream::Stderr, |m| m.red()));
}
