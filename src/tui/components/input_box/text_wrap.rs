//! Wrapping and boundary helpers for the draft editor.
//!
//! Stateless: nothing here knows about `InputBox` or `CursorState`.

/// Border (2) + padding (2) consumed horizontally by the bordered block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 4;
/// Top + bottom borders consumed vertically
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// The box grows with the draft up to this many lines, then scrolls
pub(super) const MAX_VISIBLE_LINES: u16 = 5;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// textwrap options matching how the draft paragraph is laid out.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Text columns left once borders and padding are taken. 0 if too narrow.
pub(super) fn inner_width(content_width: u16) -> u16 {
    content_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrapped line count of `text`, never less than 1.
///
/// A trailing newline counts as a line of its own, since the cursor sits
/// there after Shift+Enter.
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    if width == 0 || text.is_empty() {
        return 1;
    }

    let lines = textwrap::wrap(text, wrap_options(width));
    let mut count = (lines.len() as u16).max(1);
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        count += 1;
    }
    count
}

pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Start of the word before `pos`, readline `backward-word` style: skip
/// separators, then the word itself.
pub(super) fn prev_word_boundary(text: &str, pos: usize) -> usize {
    let mut chars = text[..pos].char_indices().rev().peekable();

    while chars.peek().is_some_and(|&(_, c)| !is_word_char(c)) {
        chars.next();
    }

    let mut boundary = 0;
    while let Some(&(i, c)) = chars.peek() {
        if !is_word_char(c) {
            boundary = i + c.len_utf8();
            break;
        }
        boundary = i;
        chars.next();
    }
    boundary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_is_one_line() {
        assert_eq!(wrap_line_count("", 40), 1);
        assert_eq!(wrap_line_count("headache", 0), 1);
    }

    #[test]
    fn long_draft_wraps() {
        assert_eq!(wrap_line_count("aaaaaaaaaa", 5), 2);
        assert_eq!(wrap_line_count("I have a headache", 40), 1);
    }

    #[test]
    fn explicit_and_trailing_newlines_count() {
        assert_eq!(wrap_line_count("fever\ncough\nchills", 40), 3);
        assert_eq!(wrap_line_count("fever\n", 40), 2);
        assert_eq!(wrap_line_count("aaaaaaaaaa\n", 5), 3);
    }

    #[test]
    fn char_boundaries_respect_multibyte() {
        let s = "café";
        assert_eq!(prev_char_boundary(s, 5), 3);
        assert_eq!(prev_char_boundary(s, 3), 2);
        assert_eq!(next_char_boundary(s, 2), 3);
        assert_eq!(next_char_boundary(s, 3), 5);

        let s = "a🔥b";
        assert_eq!(prev_char_boundary(s, 5), 1);
        assert_eq!(next_char_boundary(s, 1), 5);
    }

    #[test]
    fn word_boundary_skips_separators_then_word() {
        assert_eq!(prev_word_boundary("sore throat", 11), 5);
        assert_eq!(prev_word_boundary("sore throat", 8), 5);
        assert_eq!(prev_word_boundary("sore   throat", 7), 0);
        assert_eq!(prev_word_boundary("sore", 0), 0);
        assert_eq!(prev_word_boundary("dose.mg", 7), 5);
        assert_eq!(prev_word_boundary("naïve patient", "naïve patient".len()), 7);
    }
}
