//! Plain-text previews of markdown bodies for the search results list.

use pulldown_cmark::{Event, Parser, TagEnd};

const ELLIPSIS: &str = "...";

/// Strip markdown (and any inline HTML) down to its text, with runs of
/// whitespace collapsed to single spaces.
pub fn strip_markup(content: &str) -> String {
    let mut raw = String::with_capacity(content.len());
    for event in Parser::new(content) {
        match event {
            Event::Text(t) | Event::Code(t) => raw.push_str(&t),
            Event::SoftBreak | Event::HardBreak => raw.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
            ) => raw.push(' '),
            _ => {}
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// At most `max_chars` characters of stripped text, ending in "..." when
/// anything was cut.
pub fn preview(content: &str, max_chars: usize) -> String {
    let text = strip_markup(content);
    if text.chars().count() <= max_chars {
        return text;
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}{}", cut.trim_end(), ELLIPSIS)
}
