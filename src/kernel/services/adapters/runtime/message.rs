use crate::kernel::services::ports::CatalogResult;
use crate::kernel::snippet::ResultItem;

#[derive(Debug)]
pub enum AppMessage {
    Fetched {
        request_id: u64,
        result: CatalogResult<Vec<ResultItem>>,
    },
}
