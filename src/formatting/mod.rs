//! Text layout for rendered threat documents.
//!
//! Long-form fields are reflowed to a fixed column width: words are
//! separated on any whitespace and packed greedily, so the original line
//! breaks in the source are not preserved. Widths are measured in display
//! columns, not bytes.

use colored::*;
use std::env;
use std::io::IsTerminal;
use unicode_width::UnicodeWidthStr;

/// Column width used when nothing else is configured.
pub const DEFAULT_WIDTH: usize = 65;

/// Reflow `text` into lines no wider than `width` columns.
///
/// Breaks only at whitespace. A single word wider than `width` is kept
/// whole on a line of its own.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        if current_line.is_empty() {
            current_line.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width <= width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line.push_str(word);
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Reflow `text` to `width` columns, joining lines with `\n`.
pub fn wrap(text: &str, width: usize) -> String {
    wrap_lines(text, width).join("\n")
}

/// Render a labeled section: heading, wrapped text, blank separator.
///
/// Empty text produces nothing, heading included.
pub fn render_field(label: &str, text: &str, width: usize) -> String {
    let body = wrap(text, width);
    if body.is_empty() {
        return String::new();
    }
    format!("### {label}\n{body}\n\n")
}

/// Wrap `text` and prefix every line with `indent`.
///
/// Each line is newline-terminated, ready to follow a YAML block scalar
/// indicator.
pub fn render_indented(text: &str, indent: &str, width: usize) -> String {
    wrap_lines(text, width)
        .iter()
        .map(|line| format!("{indent}{line}\n"))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn from_env() -> Self {
        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            return Self::Never;
        }
        match env::var("CLICOLOR_FORCE") {
            Ok(val) if val == "1" => Self::Always,
            _ => Self::Auto,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stderr().is_terminal(),
        }
    }
}

/// Format a fatal diagnostic for stderr.
pub fn error_line(mode: ColorMode, message: &str) -> String {
    if mode.should_use_color() {
        format!("{} {}", "error:".red().bold(), message)
    } else {
        format!("error: {message}")
    }
}
