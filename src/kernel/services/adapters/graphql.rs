//! GraphQL catalog client: one POST per search, snippets come back complete.

use super::http::ApiTransport;
use crate::kernel::services::ports::{
    CatalogError, CatalogResult, Credentials, SnippetCatalog,
};
use crate::kernel::snippet::{ResultItem, Snippet};
use serde_json::{json, Value};

pub struct GraphqlCatalog {
    transport: ApiTransport,
    credentials: Credentials,
    send_auth: bool,
}

impl GraphqlCatalog {
    pub fn new(transport: ApiTransport, credentials: Credentials, send_auth: bool) -> Self {
        Self {
            transport,
            credentials,
            send_auth,
        }
    }

    pub fn search_snippets(&self, query: &str) -> CatalogResult<Vec<Snippet>> {
        let body = json!({ "query": search_document(query) });
        let mut headers = Vec::new();
        if self.send_auth {
            headers.push((
                "Authorization",
                format!(
                    "ApiKey {}:{}",
                    self.credentials.username, self.credentials.api_key
                ),
            ));
        }

        let response = self
            .transport
            .post_json(&self.credentials.server_url, &body, &headers)?;
        snippets_from(response)
    }
}

impl SnippetCatalog for GraphqlCatalog {
    fn name(&self) -> &'static str {
        "graphql"
    }

    fn search(&self, query: &str) -> CatalogResult<Vec<ResultItem>> {
        Ok(self
            .search_snippets(query)?
            .into_iter()
            .map(ResultItem::Snippet)
            .collect())
    }

    fn expand(&self, _item: &ResultItem) -> CatalogResult<Vec<ResultItem>> {
        Ok(Vec::new())
    }
}

/// Builds the search document. The term is embedded as an escaped string literal.
pub fn search_document(query: &str) -> String {
    let literal = Value::String(query.to_string()).to_string();
    format!(
        "{{\n  snippets(query: {literal}) {{\n    name\n    code\n    parameters {{\n      name\n      default\n    }}\n  }}\n}}"
    )
}

fn snippets_from(mut response: Value) -> CatalogResult<Vec<Snippet>> {
    let snippets = response
        .get_mut("data")
        .and_then(|data| data.get_mut("snippets"))
        .map(Value::take)
        .filter(|v| !v.is_null());

    let Some(snippets) = snippets else {
        let message = response
            .get("errors")
            .and_then(Value::as_array)
            .and_then(|errors| errors.first())
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("response has no 'data.snippets'");
        return Err(CatalogError::Shape(message.to_string()));
    };

    serde_json::from_value(snippets).map_err(|e| CatalogError::Shape(e.to_string()))
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/graphql.rs"]
mod tests;
