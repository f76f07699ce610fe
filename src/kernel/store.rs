//! Search flow reducer.
//!
//! The reducer never touches the network or the buffer: it returns effects and the host runs
//! them (fetches on the runtime, inserts on the UI thread), feeding replies back as actions.

use super::effect::NO_RESULTS_MESSAGE;
use super::services::ports::{CatalogError, CatalogRequest};
use super::snippet::{ResultItem, Snippet};
use super::state::Pending;
use super::{FlowAction, FlowEffect, FlowState};

pub struct DispatchResult {
    pub effects: Vec<FlowEffect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(effects: Vec<FlowEffect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

enum Choice {
    Expand(ResultItem),
    Insert(Snippet),
}

#[derive(Debug, Default)]
pub struct SnippetFlow {
    state: FlowState,
    next_request_id: u64,
}

impl SnippetFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn dispatch(&mut self, action: FlowAction) -> DispatchResult {
        match action {
            FlowAction::Start => {
                if !self.state.is_resting() {
                    return DispatchResult::unchanged();
                }
                self.state = FlowState::AwaitingQuery;
                DispatchResult::changed(vec![FlowEffect::PromptQuery])
            }
            FlowAction::SubmitQuery(query) => {
                if self.state != FlowState::AwaitingQuery {
                    return DispatchResult::unchanged();
                }
                // 空查询照样发出去，由服务端决定结果
                self.fetch(CatalogRequest::Search(query))
            }
            FlowAction::Choose(index) => self.choose(index),
            FlowAction::Cancel => {
                if self.state.is_resting() {
                    return DispatchResult::unchanged();
                }
                tracing::debug!(from = self.state_name(), "snippet flow cancelled");
                self.state = FlowState::Cancelled;
                DispatchResult::changed(Vec::new())
            }
            FlowAction::Fetched { request_id, result } => {
                let Some(pending) = self.state.pending() else {
                    tracing::debug!(request_id, "reply after flow moved on, dropped");
                    return DispatchResult::unchanged();
                };
                if pending.request_id != request_id {
                    tracing::debug!(
                        request_id,
                        expected = pending.request_id,
                        "stale reply dropped"
                    );
                    return DispatchResult::unchanged();
                }

                match result {
                    Ok(items) => self.present(items),
                    Err(err) => self.fail(err),
                }
            }
        }
    }

    fn choose(&mut self, index: usize) -> DispatchResult {
        let choice = match &self.state {
            FlowState::AwaitingConceptChoice(items) => items
                .get(index)
                .cloned()
                .map(|c| Choice::Expand(ResultItem::Concept(c))),
            FlowState::AwaitingMethodChoice(items) => items
                .get(index)
                .cloned()
                .map(|m| Choice::Expand(ResultItem::Method(m))),
            FlowState::AwaitingSnippetChoice(items) => {
                items.get(index).cloned().map(Choice::Insert)
            }
            _ => return DispatchResult::unchanged(),
        };

        match choice {
            Some(Choice::Expand(item)) => self.fetch(CatalogRequest::Expand(item)),
            Some(Choice::Insert(snippet)) => {
                self.state = FlowState::Done;
                DispatchResult::changed(vec![FlowEffect::Insert(snippet.into())])
            }
            None => {
                tracing::debug!(index, "pick out of range ignored");
                DispatchResult::unchanged()
            }
        }
    }

    fn fetch(&mut self, request: CatalogRequest) -> DispatchResult {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        let request_id = self.next_request_id;
        self.state = FlowState::Loading(Pending {
            request_id,
            request: request.clone(),
        });
        DispatchResult::changed(vec![FlowEffect::Fetch {
            request_id,
            request,
        }])
    }

    fn present(&mut self, items: Vec<ResultItem>) -> DispatchResult {
        if items.is_empty() {
            self.state = FlowState::AwaitingQuery;
            return DispatchResult::changed(vec![
                FlowEffect::Message(NO_RESULTS_MESSAGE.to_string()),
                FlowEffect::PromptQuery,
            ]);
        }

        let labels = items.iter().map(ResultItem::label).collect();
        let Some(next) = into_choices(items) else {
            return self.fail(CatalogError::Shape(
                "result list mixes concepts, methods and snippets".to_string(),
            ));
        };

        let title = match &next {
            FlowState::AwaitingConceptChoice(_) => "Choose a concept",
            FlowState::AwaitingMethodChoice(_) => "Choose a method",
            _ => "Choose a snippet",
        };

        self.state = next;
        DispatchResult::changed(vec![FlowEffect::ShowPicker { title, labels }])
    }

    fn fail(&mut self, err: CatalogError) -> DispatchResult {
        tracing::warn!(error = %err, "snippet flow aborted");
        self.state = FlowState::Idle;
        DispatchResult::changed(vec![FlowEffect::Error(err.to_string())])
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            FlowState::Idle => "idle",
            FlowState::AwaitingQuery => "awaiting_query",
            FlowState::Loading(_) => "loading",
            FlowState::AwaitingConceptChoice(_) => "concept_choice",
            FlowState::AwaitingMethodChoice(_) => "method_choice",
            FlowState::AwaitingSnippetChoice(_) => "snippet_choice",
            FlowState::Done => "done",
            FlowState::Cancelled => "cancelled",
        }
    }
}

/// All items must be of one kind; `None` otherwise.
fn into_choices(items: Vec<ResultItem>) -> Option<FlowState> {
    let mut iter = items.into_iter();
    match iter.next()? {
        ResultItem::Concept(first) => collect_kind(first, iter, |item| match item {
            ResultItem::Concept(c) => Some(c),
            _ => None,
        })
        .map(FlowState::AwaitingConceptChoice),
        ResultItem::Method(first) => collect_kind(first, iter, |item| match item {
            ResultItem::Method(m) => Some(m),
            _ => None,
        })
        .map(FlowState::AwaitingMethodChoice),
        ResultItem::Snippet(first) => collect_kind(first, iter, |item| match item {
            ResultItem::Snippet(s) => Some(s),
            _ => None,
        })
        .map(FlowState::AwaitingSnippetChoice),
    }
}

fn collect_kind<T>(
    first: T,
    rest: impl Iterator<Item = ResultItem>,
    pick: fn(ResultItem) -> Option<T>,
) -> Option<Vec<T>> {
    let mut out = vec![first];
    for item in rest {
        out.push(pick(item)?);
    }
    Some(out)
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
