//! Small text helpers shared by the core and the renderer.

use chrono::{DateTime, Local};

/// Format a timestamp as a 12-hour local clock label, e.g. `03:07 PM`.
pub fn time_label(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%I:%M %p").to_string()
}

/// Remove terminal control characters from `text`.
///
/// Newlines survive, tabs become four spaces (ratatui renders `\t` as
/// zero-width), everything else in the Unicode `Cc` category is dropped.
/// An ESC byte can no longer start an escape sequence once it is gone.
pub fn strip_control(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            '\r' => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn time_label_uses_twelve_hour_clock() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 15, 7, 0).unwrap();
        assert_eq!(time_label(&ts), "03:07 PM");
    }

    #[test]
    fn time_label_morning() {
        let ts = Local.with_ymd_and_hms(2024, 3, 9, 9, 45, 0).unwrap();
        assert_eq!(time_label(&ts), "09:45 AM");
    }

    #[test]
    fn strip_control_removes_escape_sequences_start() {
        let cleaned = strip_control("safe\u{1b}[2Jtext\u{7}");
        assert_eq!(cleaned, "safe[2Jtext");
        assert!(!cleaned.contains('\u{1b}'));
    }

    #[test]
    fn strip_control_keeps_newlines_and_expands_tabs() {
        assert_eq!(strip_control("a\r\n\tb"), "a\n    b");
    }

    #[test]
    fn strip_control_leaves_unicode_alone() {
        assert_eq!(strip_control("fièvre → 38°C"), "fièvre → 38°C");
    }
}
