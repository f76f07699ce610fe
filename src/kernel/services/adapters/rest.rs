//! REST catalog client (concept -> methods -> snippets).
//!
//! Every request is a GET with `username` and `api_key` appended as query parameters:
//!
//! - `GET <base>/concept/search/?q=<query>`
//! - `GET <base>/concept/<id>/`
//! - `GET <base>/method/set/<id1>;<id2>;.../`
//! - `GET <base>/method/<id>/`

use super::http::ApiTransport;
use crate::kernel::services::ports::{
    CatalogError, CatalogResult, Credentials, SnippetCatalog,
};
use crate::kernel::snippet::{parse_method_ref, Concept, Method, ResultItem, Snippet};
use serde_json::{Map, Value};

pub struct RestCatalog {
    transport: ApiTransport,
    credentials: Credentials,
}

impl RestCatalog {
    pub fn new(transport: ApiTransport, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials,
        }
    }

    pub fn search_concepts(&self, query: &str) -> CatalogResult<Vec<Concept>> {
        let body = self.get("/concept/search/", &[("q", query)])?;
        objects(&body)?.iter().map(concept_from).collect()
    }

    /// Method ids referenced by a concept.
    pub fn concept_method_ids(&self, concept_id: u64) -> CatalogResult<Vec<u64>> {
        let body = self.get(&format!("/concept/{concept_id}/"), &[])?;
        let methods = body
            .get("methods")
            .and_then(Value::as_array)
            .ok_or_else(|| CatalogError::Shape("concept has no 'methods' list".to_string()))?;

        let mut ids = Vec::with_capacity(methods.len());
        for reference in methods {
            match parse_method_ref(reference) {
                Some(id) => ids.push(id),
                None => tracing::warn!(reference = %reference, "unrecognized method reference"),
            }
        }
        Ok(ids)
    }

    pub fn methods_detail(&self, ids: &[u64]) -> CatalogResult<Vec<Method>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(";");
        let body = self.get(&format!("/method/set/{joined}/"), &[])?;
        objects(&body)?.iter().map(method_from).collect()
    }

    pub fn method_snippets(&self, method_id: u64) -> CatalogResult<Vec<Snippet>> {
        let body = self.get(&format!("/method/{method_id}/"), &[])?;
        let snippets = body
            .get("snippets")
            .and_then(Value::as_array)
            .ok_or_else(|| CatalogError::Shape("method has no 'snippets' list".to_string()))?;
        snippets.iter().map(snippet_from).collect()
    }

    fn get(&self, path: &str, params: &[(&str, &str)]) -> CatalogResult<Value> {
        let url = format!("{}{}", self.credentials.server_url, path);
        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("username", self.credentials.username.as_str()));
        query.push(("api_key", self.credentials.api_key.as_str()));
        self.transport.get(&url, &query)
    }
}

impl SnippetCatalog for RestCatalog {
    fn name(&self) -> &'static str {
        "rest"
    }

    fn search(&self, query: &str) -> CatalogResult<Vec<ResultItem>> {
        Ok(self
            .search_concepts(query)?
            .into_iter()
            .map(ResultItem::Concept)
            .collect())
    }

    fn expand(&self, item: &ResultItem) -> CatalogResult<Vec<ResultItem>> {
        match item {
            ResultItem::Concept(concept) => {
                let ids = self.concept_method_ids(concept.id)?;
                Ok(self
                    .methods_detail(&ids)?
                    .into_iter()
                    .map(ResultItem::Method)
                    .collect())
            }
            ResultItem::Method(method) => Ok(self
                .method_snippets(method.id)?
                .into_iter()
                .map(ResultItem::Snippet)
                .collect()),
            ResultItem::Snippet(_) => Ok(Vec::new()),
        }
    }
}

fn objects(body: &Value) -> CatalogResult<&Vec<Value>> {
    body.get("objects")
        .and_then(Value::as_array)
        .ok_or_else(|| CatalogError::Shape("response has no 'objects' list".to_string()))
}

fn as_object<'a>(value: &'a Value, what: &str) -> CatalogResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| CatalogError::Shape(format!("{what} is not an object")))
}

fn id_of(map: &Map<String, Value>, what: &str) -> CatalogResult<u64> {
    map.get("id")
        .and_then(parse_method_ref)
        .or_else(|| map.get("resource_uri").and_then(parse_method_ref))
        .ok_or_else(|| CatalogError::Shape(format!("{what} has no id")))
}

fn str_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_string)
}

fn concept_from(value: &Value) -> CatalogResult<Concept> {
    let map = as_object(value, "concept")?;
    Ok(Concept {
        id: id_of(map, "concept")?,
        name: str_field(map, "name").unwrap_or_default(),
    })
}

fn method_from(value: &Value) -> CatalogResult<Method> {
    let map = as_object(value, "method")?;
    Ok(Method {
        id: id_of(map, "method")?,
        language: str_field(map, "main_language")
            .or_else(|| str_field(map, "language"))
            .unwrap_or_default(),
        title: str_field(map, "title"),
    })
}

fn snippet_from(value: &Value) -> CatalogResult<Snippet> {
    let map = as_object(value, "snippet")?;
    let code = str_field(map, "content")
        .or_else(|| str_field(map, "code"))
        .ok_or_else(|| CatalogError::Shape("snippet has no content".to_string()))?;
    Ok(Snippet {
        id: map.get("id").and_then(parse_method_ref),
        name: str_field(map, "name"),
        code,
        parameters: Vec::new(),
    })
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/rest.rs"]
mod tests;
