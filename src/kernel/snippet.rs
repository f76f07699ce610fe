//! Snippet catalog data model: concepts, methods and snippets as returned by the service.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

/// Labels for snippets without a name are cut to this many characters of code.
pub const SNIPPET_LABEL_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub id: u64,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    pub code: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parameters: Vec<Parameter>,
}

// GraphQL 可空列表会直接给 null
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Parameter>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Parameter>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Defaults are typed by the service: numbers and booleans are kept as their source text.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultItem {
    Concept(Concept),
    Method(Method),
    Snippet(Snippet),
}

impl ResultItem {
    pub fn label(&self) -> String {
        match self {
            ResultItem::Concept(concept) => concept.name.clone(),
            ResultItem::Method(method) => method_label(method),
            ResultItem::Snippet(snippet) => snippet_label(snippet),
        }
    }
}

fn method_label(method: &Method) -> String {
    match method.title.as_deref().filter(|t| !t.is_empty()) {
        Some(title) => format!("{} - {}", method.language, title),
        None => method.language.clone(),
    }
}

fn snippet_label(snippet: &Snippet) -> String {
    match snippet.name.as_deref().filter(|n| !n.is_empty()) {
        Some(name) => name.to_string(),
        None => snippet.code.chars().take(SNIPPET_LABEL_MAX_CHARS).collect(),
    }
}

fn method_uri_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(\d+)/").expect("valid method uri regex"))
}

/// Extracts a method id from a reference.
///
/// The service has returned method references as bare ids (`42`, `"42"`), as resource URIs
/// (`"/api/v1/method/42/"`) and as objects carrying either form under `id` or `resource_uri`.
pub fn parse_method_ref(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(id) = s.parse::<u64>() {
                return Some(id);
            }
            method_uri_regex()
                .captures_iter(s)
                .last()
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        }
        Value::Object(map) => map
            .get("id")
            .and_then(parse_method_ref)
            .or_else(|| map.get("resource_uri").and_then(parse_method_ref)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/snippet.rs"]
mod tests;
