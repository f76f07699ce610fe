//! Headless snippet core (state/action/effect).

pub mod action;
pub mod effect;
pub mod insert;
pub mod placeholder;
pub mod services;
pub mod snippet;
pub mod state;
pub mod store;

pub use action::FlowAction;
pub use effect::FlowEffect;
pub use insert::{insert_snippet, SnippetInsert};
pub use placeholder::{next_placeholder, select_placeholders, PlaceholderSelection};
pub use snippet::{Concept, Method, Parameter, ResultItem, Snippet};
pub use state::{FlowState, Pending};
pub use store::{DispatchResult, SnippetFlow};
