//! Placeholder selection after a snippet is inserted.
//!
//! Snippets mark fill-in spots as `{{name}}`. After insertion the first placeholder inside
//! the inserted text is located and every occurrence of that exact token in the buffer
//! becomes its own selection, so typing replaces all of them at once.

use crate::models::{Selection, TextBuffer};
use regex::Regex;
use std::sync::OnceLock;

pub const PLACEHOLDER_PATTERN: &str = r"\{\{\w+\}\}";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("valid placeholder regex"))
}

/// Result of a placeholder scan. Ranges are char offsets into the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderSelection {
    pub token: Option<String>,
    pub ranges: Vec<(usize, usize)>,
}

impl PlaceholderSelection {
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.token.as_deref().map(placeholder_name)
    }
}

/// `{{foo}}` -> `foo`; anything else is returned unchanged.
pub fn placeholder_name(token: &str) -> &str {
    token
        .strip_prefix("{{")
        .and_then(|t| t.strip_suffix("}}"))
        .unwrap_or(token)
}

/// Selects every occurrence of the first placeholder that starts inside the inserted text
/// `insertion_point..inserted_end` (char offsets).
///
/// When the inserted text has none, the buffer is left as is: the caret stays where the
/// insertion put it, even if text after it carries placeholders.
pub fn select_placeholders(
    buffer: &mut TextBuffer,
    insertion_point: usize,
    inserted_end: usize,
) -> PlaceholderSelection {
    let text = buffer.text();
    let end_byte = buffer.rope().char_to_byte(inserted_end.min(buffer.len_chars()));
    match find_token(buffer, &text, insertion_point, None) {
        Some((start, token)) if start < end_byte => select_token(buffer, &text, token),
        _ => PlaceholderSelection::default(),
    }
}

/// Moves to the next distinct placeholder after `after`, wrapping to the top of the buffer
/// once. Returns an empty selection (buffer untouched) when there is no other placeholder.
pub fn next_placeholder(
    buffer: &mut TextBuffer,
    after: usize,
    current: Option<&str>,
) -> PlaceholderSelection {
    let text = buffer.text();
    let token = find_token(buffer, &text, after, current)
        .or_else(|| find_token(buffer, &text, 0, current));
    match token {
        Some((_, token)) => select_token(buffer, &text, token),
        None => PlaceholderSelection::default(),
    }
}

/// First placeholder at or after `from_char`, with its byte offset in `text`.
fn find_token(
    buffer: &TextBuffer,
    text: &str,
    from_char: usize,
    skip: Option<&str>,
) -> Option<(usize, String)> {
    let from_byte = buffer.rope().char_to_byte(from_char.min(buffer.len_chars()));
    let mut at = from_byte;
    while let Some(found) = placeholder_regex().find_at(text, at) {
        if skip != Some(found.as_str()) {
            return Some((found.start(), found.as_str().to_string()));
        }
        at = found.end();
    }
    None
}

fn select_token(buffer: &mut TextBuffer, text: &str, token: String) -> PlaceholderSelection {
    let ranges: Vec<(usize, usize)> = match Regex::new(&regex::escape(&token)) {
        Ok(literal) => literal
            .find_iter(text)
            .map(|m| {
                let rope = buffer.rope();
                (rope.byte_to_char(m.start()), rope.byte_to_char(m.end()))
            })
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, token = %token, "placeholder literal rejected");
            Vec::new()
        }
    };

    if ranges.is_empty() {
        return PlaceholderSelection::default();
    }

    let selections = ranges
        .iter()
        .map(|&(start, end)| Selection::new(buffer.char_to_pos(start), buffer.char_to_pos(end)))
        .collect();
    buffer.set_selections(selections);
    tracing::debug!(token = %token, occurrences = ranges.len(), "placeholders selected");

    PlaceholderSelection {
        token: Some(token),
        ranges,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/placeholder.rs"]
mod tests;
