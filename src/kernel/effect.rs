use super::insert::SnippetInsert;
use super::services::ports::CatalogRequest;

pub const NO_RESULTS_MESSAGE: &str = "No search results, please try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEffect {
    PromptQuery,
    ShowPicker {
        title: &'static str,
        labels: Vec<String>,
    },
    Fetch {
        request_id: u64,
        request: CatalogRequest,
    },
    Message(String),
    Error(String),
    Insert(SnippetInsert),
}
