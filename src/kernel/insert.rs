//! Snippet insertion: the synchronous finish of the search flow.
//!
//! Everything that waits on the network happens before this point; inserting and selecting
//! placeholders only touches the buffer and never blocks.

use super::placeholder::{select_placeholders, PlaceholderSelection};
use super::snippet::{Parameter, Snippet};
use crate::models::TextBuffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetInsert {
    pub code: String,
    pub parameters: Vec<Parameter>,
}

impl SnippetInsert {
    pub fn default_for(&self, placeholder: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == placeholder)
            .and_then(|p| p.default.as_deref())
    }
}

impl From<Snippet> for SnippetInsert {
    fn from(snippet: Snippet) -> Self {
        Self {
            code: snippet.code,
            parameters: snippet.parameters,
        }
    }
}

/// Inserts at the start of the first selection (the caret when there is none), then
/// selects the placeholders of the inserted code.
pub fn insert_snippet(buffer: &mut TextBuffer, insert: &SnippetInsert) -> PlaceholderSelection {
    let at = match buffer.selections().first() {
        Some(selection) => buffer.pos_to_char(selection.range().0),
        None => buffer.cursor_char_offset(),
    };

    let end = buffer.insert_at(at, &insert.code);
    tracing::debug!(at, end, "snippet inserted");
    select_placeholders(buffer, at, end)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/insert.rs"]
mod tests;
