//! # Assistant Markup
//!
//! Assistant replies arrive as HTML from a source we do not control. Nothing
//! reaches the screen without passing [`sanitize`] first:
//!
//! ```text
//! untrusted &str ──sanitize()──▶ SafeMarkup ──events()──▶ MarkupEvent* ──▶ renderer
//! ```
//!
//! `sanitize` keeps the same tag allow-list the backend applies
//! (`p`, `ul`, `li`, `h3`, `strong`, no attributes), drops `script`/`style`
//! together with their contents, and strips terminal control characters.
//! `SafeMarkup` can only be built by `sanitize`, so a renderer that takes
//! `&SafeMarkup` cannot be handed raw input by mistake.

use std::collections::HashSet;

use crate::core::format::strip_control;

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: [&str; 5] = ["p", "ul", "li", "h3", "strong"];

/// Tags removed together with everything inside them.
const DROPPED_WITH_CONTENT: [&str; 2] = ["script", "style"];

/// Markup that has been through [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterate the structural events of this markup.
    pub fn events(&self) -> Events<'_> {
        Events {
            rest: self.0.as_str(),
        }
    }
}

/// Clean untrusted markup. This is the only way to obtain a [`SafeMarkup`].
pub fn sanitize(untrusted: &str) -> SafeMarkup {
    let tags: HashSet<&str> = ALLOWED_TAGS.into_iter().collect();
    let dropped: HashSet<&str> = DROPPED_WITH_CONTENT.into_iter().collect();

    let cleaned = ammonia::Builder::empty()
        .tags(tags)
        .clean_content_tags(dropped)
        .clean(untrusted)
        .to_string();

    SafeMarkup(strip_control(&cleaned))
}

/// Structural elements that can appear in sanitized markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Paragraph,
    Heading,
    List,
    Item,
    Strong,
}

impl Tag {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "p" => Some(Tag::Paragraph),
            "h3" => Some(Tag::Heading),
            "ul" => Some(Tag::List),
            "li" => Some(Tag::Item),
            "strong" => Some(Tag::Strong),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupEvent {
    Start(Tag),
    End(Tag),
    /// Entity-decoded text with whitespace runs collapsed to one space.
    Text(String),
}

/// Iterator over the events of a [`SafeMarkup`].
///
/// Sanitized markup only holds bare allow-listed tags and escaped text, so a
/// linear scan is enough; anything unexpected inside `<...>` is skipped.
pub struct Events<'a> {
    rest: &'a str,
}

impl Iterator for Events<'_> {
    type Item = MarkupEvent;

    fn next(&mut self) -> Option<MarkupEvent> {
        loop {
            if self.rest.is_empty() {
                return None;
            }

            if let Some(after_lt) = self.rest.strip_prefix('<') {
                let Some(close) = after_lt.find('>') else {
                    // Unterminated tag: treat the remainder as text.
                    let text = collapse_whitespace(&decode_entities(self.rest));
                    self.rest = "";
                    if text.trim().is_empty() {
                        return None;
                    }
                    return Some(MarkupEvent::Text(text));
                };
                let raw = after_lt[..close].trim();
                self.rest = &after_lt[close + 1..];

                let (is_end, name) = match raw.strip_prefix('/') {
                    Some(name) => (true, name.trim()),
                    None => (false, raw.trim_end_matches('/').trim()),
                };
                let name = name.to_ascii_lowercase();
                if let Some(tag) = Tag::from_name(&name) {
                    return Some(if is_end {
                        MarkupEvent::End(tag)
                    } else {
                        MarkupEvent::Start(tag)
                    });
                }
                continue;
            }

            let end = self.rest.find('<').unwrap_or(self.rest.len());
            let chunk = &self.rest[..end];
            self.rest = &self.rest[end..];

            // Whitespace between block tags is layout noise in HTML.
            if chunk.trim().is_empty() {
                continue;
            }
            return Some(MarkupEvent::Text(collapse_whitespace(&decode_entities(
                chunk,
            ))));
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_was_space = false;
    for c in text.chars() {
        if c.is_whitespace() && c != '\u{a0}' {
            if !last_was_space {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(c);
            last_was_space = false;
        }
    }
    out
}

/// Decode the entities an HTML serializer emits for text content.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail.find(';').and_then(|semi| {
            let entity = &tail[1..semi];
            let c = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            c.map(|c| (c, semi + 1))
        });
        match decoded {
            Some((c, consumed)) if !c.is_control() || c == '\n' => {
                out.push(c);
                rest = &tail[consumed..];
            }
            Some((_, consumed)) => {
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(markup: &SafeMarkup) -> String {
        markup
            .events()
            .filter_map(|e| match e {
                MarkupEvent::Text(t) => Some(t),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("|")
    }

    #[test]
    fn keeps_allowed_tags() {
        let safe = sanitize("<h3>Causes</h3><ul><li><strong>Stress</strong></li></ul>");
        assert_eq!(
            safe.as_str(),
            "<h3>Causes</h3><ul><li><strong>Stress</strong></li></ul>"
        );
    }

    #[test]
    fn drops_script_with_content() {
        let safe = sanitize("<p>hi</p><script>alert('x')</script>");
        assert_eq!(safe.as_str(), "<p>hi</p>");
    }

    #[test]
    fn drops_attributes_and_unknown_tags() {
        let safe = sanitize(r#"<p onclick="steal()">Rest <a href="http://x">here</a></p>"#);
        assert_eq!(safe.as_str(), "<p>Rest here</p>");
    }

    #[test]
    fn strips_terminal_escapes() {
        let safe = sanitize("<p>ok\u{1b}]0;pwned\u{7}</p>");
        assert!(!safe.as_str().contains('\u{1b}'));
        assert!(!safe.as_str().contains('\u{7}'));
    }

    #[test]
    fn escaped_markup_stays_text() {
        let safe = sanitize("<p>1 &lt; 2 &amp; &lt;b&gt;</p>");
        let events: Vec<_> = safe.events().collect();
        assert_eq!(
            events,
            vec![
                MarkupEvent::Start(Tag::Paragraph),
                MarkupEvent::Text("1 < 2 & <b>".to_string()),
                MarkupEvent::End(Tag::Paragraph),
            ]
        );
    }

    #[test]
    fn events_collapse_layout_whitespace() {
        let safe = sanitize("\n  <p>\n   Drink   water\n  </p>\n\n  <ul>\n <li>Sleep</li>\n</ul>");
        let events: Vec<_> = safe.events().collect();
        assert_eq!(
            events,
            vec![
                MarkupEvent::Start(Tag::Paragraph),
                MarkupEvent::Text(" Drink water ".to_string()),
                MarkupEvent::End(Tag::Paragraph),
                MarkupEvent::Start(Tag::List),
                MarkupEvent::Start(Tag::Item),
                MarkupEvent::Text("Sleep".to_string()),
                MarkupEvent::End(Tag::Item),
                MarkupEvent::End(Tag::List),
            ]
        );
    }

    #[test]
    fn plain_text_is_a_single_text_event() {
        let safe = sanitize("Sorry, I encountered an error. Please try again.");
        assert_eq!(
            text_of(&safe),
            "Sorry, I encountered an error. Please try again."
        );
    }

    #[test]
    fn decode_numeric_entities() {
        assert_eq!(decode_entities("&#39;a&#x41;"), "'aA");
        assert_eq!(decode_entities("AT&T"), "AT&T");
    }
}
