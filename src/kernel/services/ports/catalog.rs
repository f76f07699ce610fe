//! Snippet catalog contract shared by the REST and GraphQL clients.

use crate::kernel::snippet::ResultItem;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Could not reach the snippet service ({url}): {message}")]
    Transport { url: String, message: String },
    #[error("Snippet service answered {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Malformed response from the snippet service: {0}")]
    Parse(String),
    #[error("Unexpected response from the snippet service: {0}")]
    Shape(String),
}

impl CatalogError {
    /// Network unreachable or non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }

    /// Body could not be decoded into the expected shape.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Shape(_))
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// One fan-out step of the search flow, as plain data so it can be handed to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    Search(String),
    Expand(ResultItem),
}

pub trait SnippetCatalog: Send + Sync {
    fn name(&self) -> &'static str;

    /// Free-text search. Concepts for catalogs with a concept tree, snippets otherwise.
    fn search(&self, query: &str) -> CatalogResult<Vec<ResultItem>>;

    /// Children of a result: concept -> methods, method -> snippets, snippet -> nothing.
    fn expand(&self, item: &ResultItem) -> CatalogResult<Vec<ResultItem>>;

    fn execute(&self, request: &CatalogRequest) -> CatalogResult<Vec<ResultItem>> {
        match request {
            CatalogRequest::Search(query) => self.search(query),
            CatalogRequest::Expand(item) => self.expand(item),
        }
    }
}
