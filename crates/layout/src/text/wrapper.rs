use crate::fonts::FontFace;

/// The outcome of breaking a run of text into lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedText {
    pub lines: Vec<String>,
    /// Words that are wider than the line on their own. Each was placed alone on a line.
    pub oversized: Vec<String>,
}

/// Greedy word wrap against `max_width`.
///
/// Words are split on whitespace and re-joined with single spaces. A word is appended to
/// the current line unless that makes the line wider than `max_width`; then the current
/// line is flushed and the word starts a new one. A word that is too wide by itself is
/// still emitted (alone) so the caller always makes progress.
pub fn wrap_text(text: &str, font: FontFace, size: f32, max_width: f32) -> WrappedText {
    let mut out = WrappedText::default();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if font.measure(word, size) > max_width {
            out.oversized.push(word.to_string());
        }

        let test_line = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if font.measure(&test_line, size) > max_width && !current.is_empty() {
            out.lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = test_line;
        }
    }

    if !current.is_empty() {
        out.lines.push(current);
    }
    out
}

/// Wraps cell text segment by segment: every `\n` is a forced break. An empty segment
/// still yields one blank line so explicit spacing survives. A blank cell has no segments.
pub fn wrap_cell(text: &str, font: FontFace, size: f32, max_width: f32) -> Vec<WrappedText> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|segment| {
            let mut wrapped = wrap_text(segment, font, size, max_width);
            if wrapped.lines.is_empty() {
                wrapped.lines.push(String::new());
            }
            wrapped
        })
        .collect()
}
