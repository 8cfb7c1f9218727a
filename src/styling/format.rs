//! Gutter formatting for quoted content

use super::{get_terminal_width, visual_width};

/// Columns added by [`format_with_gutter`]: the colored gutter cell plus one
/// space. Matches symbol + space, so quoted content lines up with message text.
pub const GUTTER_OVERHEAD: usize = 2;

/// Word-wrap a line to `max_width` visual columns.
///
/// A single word wider than `max_width` is kept whole on its own line.
fn wrap_text_at_width(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 || visual_width(text) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = visual_width(word);

        if current_line.is_empty() {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current_line));
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Prefix every line of `content` with a gutter, wrapping at terminal width.
///
/// `max_width` overrides terminal detection (used in tests). No trailing
/// newline is added.
///
/// ```
/// use bruh::styling::format_with_gutter;
///
/// eprintln!("{}", format_with_gutter("G104: Errors unhandled", Some(80)));
/// ```
pub fn format_with_gutter(content: &str, max_width: Option<usize>) -> String {
    let gutter = super::GUTTER;
    let term_width = max_width.unwrap_or_else(get_terminal_width);
    let available_width = term_width.saturating_sub(GUTTER_OVERHEAD);

    content
        .lines()
        .flat_map(|line| wrap_text_at_width(line, available_width))
        .map(|wrapped| format!("{gutter} {gutter:#} {wrapped}"))
        .collect::<Vec<_>>()
        .join("\n")
}
