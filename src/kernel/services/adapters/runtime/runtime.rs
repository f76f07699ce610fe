use super::message::AppMessage;
use crate::kernel::services::ports::{CatalogError, CatalogRequest, SnippetCatalog};
use std::io;
use std::sync::mpsc::Sender;
use std::sync::Arc;

pub struct AsyncRuntime {
    runtime: tokio::runtime::Runtime,
    tx: Sender<AppMessage>,
}

impl AsyncRuntime {
    /// 需要自带 worker 线程：UI 线程从不 `block_on`，current-thread 调度器上的任务不会被推进
    pub fn new(tx: Sender<AppMessage>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create tokio runtime");
                e
            })?;
        Ok(Self { runtime, tx })
    }

    /// Runs one catalog round-trip off the UI thread and reports back through the channel.
    pub fn fetch(
        &self,
        catalog: Arc<dyn SnippetCatalog>,
        request_id: u64,
        request: CatalogRequest,
    ) {
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let backend = catalog.name();
            let result =
                tokio::task::spawn_blocking(move || catalog.execute(&request)).await;

            let result = match result {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(backend, error = %e, "catalog worker failed");
                    Err(CatalogError::Transport {
                        url: backend.to_string(),
                        message: e.to_string(),
                    })
                }
            };

            match &result {
                Ok(items) => {
                    tracing::debug!(backend, request_id, items = items.len(), "catalog reply")
                }
                Err(e) if e.is_transport() => {
                    tracing::warn!(backend, request_id, error = %e, "catalog unreachable")
                }
                Err(e) if e.is_parse() => {
                    tracing::warn!(backend, request_id, error = %e, "catalog reply not understood")
                }
                Err(_) => {}
            }
            let _ = tx.send(AppMessage::Fetched { request_id, result });
        });
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
