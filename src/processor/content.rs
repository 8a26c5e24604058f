//! # File Content Module
//!
//! Line-level view of a file that renders back to the exact bytes it was
//! parsed from.
//!
//! Lines are split on every `\n`. A `\r` directly before it belongs to that
//! line's terminator, so files mixing LF and CRLF keep each line's own ending.
//! Lines inserted by the stamper use the file's dominant ending.

/// Line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
  #[default]
  Lf,
  CrLf,
}

impl LineEnding {
  pub const fn as_str(self) -> &'static str {
    match self {
      LineEnding::Lf => "\n",
      LineEnding::CrLf => "\r\n",
    }
  }
}

/// A file's content as an ordered sequence of lines.
///
/// `render(parse(s)) == s` for every string `s`. Each line remembers its own
/// terminator; the trailing-newline flag says whether the last one is
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileContent {
  lines: Vec<String>,
  /// Terminator of each line, parallel to `lines`.
  endings: Vec<LineEnding>,
  trailing_newline: bool,
  line_ending: LineEnding,
}

impl FileContent {
  /// Splits text into lines. The empty string has zero lines.
  pub fn parse(text: &str) -> Self {
    if text.is_empty() {
      return Self::default();
    }

    let (body, trailing_newline) = match text.strip_suffix('\n') {
      Some(body) => (body, true),
      None => (text, false),
    };

    let mut lines = Vec::new();
    let mut endings = Vec::new();
    let segments: Vec<&str> = body.split('\n').collect();
    let last = segments.len() - 1;

    for (idx, segment) in segments.into_iter().enumerate() {
      let terminated = idx < last || trailing_newline;
      match segment.strip_suffix('\r') {
        Some(line) if terminated => {
          lines.push(line.to_string());
          endings.push(LineEnding::CrLf);
        }
        _ => {
          lines.push(segment.to_string());
          endings.push(LineEnding::Lf);
        }
      }
    }

    let terminators = if trailing_newline { endings.len() } else { last };
    let crlf = endings[..terminators]
      .iter()
      .filter(|ending| **ending == LineEnding::CrLf)
      .count();
    // Ties go to CRLF
    let line_ending = if crlf > 0 && crlf * 2 >= terminators {
      LineEnding::CrLf
    } else {
      LineEnding::Lf
    };

    // An unterminated last line gets the dominant ending if a line is ever
    // appended after it
    if !trailing_newline {
      endings[last] = line_ending;
    }

    Self {
      lines,
      endings,
      trailing_newline,
      line_ending,
    }
  }

  /// Joins the lines back into text.
  pub fn render(&self) -> String {
    let mut text = String::new();
    let last = self.lines.len().saturating_sub(1);
    for (idx, (line, ending)) in self.lines.iter().zip(&self.endings).enumerate() {
      text.push_str(line);
      if idx < last || self.trailing_newline {
        text.push_str(ending.as_str());
      }
    }
    text
  }

  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn first_line(&self) -> Option<&str> {
    self.lines.first().map(String::as_str)
  }

  pub fn last_line(&self) -> Option<&str> {
    self.lines.last().map(String::as_str)
  }

  pub const fn trailing_newline(&self) -> bool {
    self.trailing_newline
  }

  pub fn set_trailing_newline(&mut self, trailing_newline: bool) {
    self.trailing_newline = trailing_newline;
  }

  /// The dominant ending, used for inserted lines.
  pub const fn line_ending(&self) -> LineEnding {
    self.line_ending
  }

  /// Ending of the line at `idx`.
  pub fn ending_at(&self, idx: usize) -> Option<LineEnding> {
    self.endings.get(idx).copied()
  }

  /// Replaces the text of line `idx`, keeping its terminator.
  ///
  /// # Panics
  ///
  /// Panics if `idx` is out of bounds.
  pub fn replace_line(&mut self, idx: usize, text: impl Into<String>) {
    self.lines[idx] = text.into();
  }

  /// Inserts a line at `idx` terminated by the dominant ending.
  ///
  /// # Panics
  ///
  /// Panics if `idx > len()`.
  pub fn insert_line(&mut self, idx: usize, text: impl Into<String>) {
    self.lines.insert(idx, text.into());
    self.endings.insert(idx, self.line_ending);
  }

  /// Appends a line terminated by the dominant ending.
  pub fn push_line(&mut self, text: impl Into<String>) {
    self.lines.push(text.into());
    self.endings.push(self.line_ending);
  }
}
