use super::services::ports::CatalogResult;
use super::snippet::ResultItem;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowAction {
    /// The snippet command was invoked.
    Start,
    SubmitQuery(String),
    Choose(usize),
    /// Picker or prompt dismissed.
    Cancel,
    Fetched {
        request_id: u64,
        result: CatalogResult<Vec<ResultItem>>,
    },
}

impl FlowAction {
    /// Picker hosts report the chosen row as a signed index; negative means dismissed.
    pub fn from_pick_index(index: isize) -> Self {
        match usize::try_from(index) {
            Ok(index) => Self::Choose(index),
            Err(_) => Self::Cancel,
        }
    }
}
