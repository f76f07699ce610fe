use super::services::ports::CatalogRequest;
use super::snippet::{Concept, Method, Snippet};

/// The one request in flight. Replies carrying any other id are stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub request_id: u64,
    pub request: CatalogRequest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FlowState {
    #[default]
    Idle,
    AwaitingQuery,
    Loading(Pending),
    AwaitingConceptChoice(Vec<Concept>),
    AwaitingMethodChoice(Vec<Method>),
    AwaitingSnippetChoice(Vec<Snippet>),
    Done,
    Cancelled,
}

impl FlowState {
    /// Whether `Start` may begin a new flow from here.
    pub fn is_resting(&self) -> bool {
        matches!(self, Self::Idle | Self::Done | Self::Cancelled)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    pub fn pending(&self) -> Option<&Pending> {
        match self {
            Self::Loading(pending) => Some(pending),
            _ => None,
        }
    }
}
