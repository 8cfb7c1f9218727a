//! Terminal styling for bruh's output.
//!
//! Built on the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for the few computed styles
//! - color-print `cformat!` markup for messages
//!
//! ## stdout vs stderr
//!
//! - **stdout**: primary data (the rendered prompt for `--show-prompt`, the PR URL)
//! - **stderr**: status messages (progress, success, errors, hints, warnings, tool output)
//!
//! `bruh commit --show-prompt | less` works because status never lands on stdout.

mod constants;
mod format;

pub use anstream::{eprint, eprintln, print, println};

pub use constants::*;
pub use format::{GUTTER_OVERHEAD, format_with_gutter};

/// Terminal width, or `usize::MAX` if detection fails.
///
/// Checks stderr first since quoted tool output goes there, then stdout, then
/// `COLUMNS`.
pub fn get_terminal_width() -> usize {
    if let Some((terminal_size::Width(w), _)) =
        terminal_size::terminal_size_of(std::io::stderr()).or_else(terminal_size::terminal_size)
    {
        return w as usize;
    }

    if let Ok(cols) = std::env::var("COLUMNS")
        && let Ok(width) = cols.parse::<usize>()
    {
        return width;
    }

    usize::MAX
}

/// Visual width of a string, ignoring ANSI escape codes.
pub fn visual_width(s: &str) -> usize {
    use ansi_str::AnsiStr;
    use unicode_width::UnicodeWidthStr;
    s.ansi_strip().width()
}
