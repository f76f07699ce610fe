//! Service adapters: OS/runtime specific implementations (IO/HTTP/async).

pub mod graphql;
pub mod http;
pub mod paths;
pub mod rest;
pub mod runtime;
pub mod settings;

pub use graphql::GraphqlCatalog;
pub use http::ApiTransport;
pub use paths::{ensure_log_dir, get_log_dir};
pub use rest::RestCatalog;
pub use runtime::{AppMessage, AsyncRuntime};
pub use settings::{
    apply_env_overrides, ensure_settings_file, get_settings_path, load_settings,
    load_settings_from, SettingsError,
};

use crate::kernel::services::ports::{
    Backend, ConfigError, Credentials, Settings, SnippetCatalog,
};
use std::sync::Arc;

/// Builds the catalog client for one command invocation.
///
/// Fails before any network traffic when credentials or the API url are missing.
pub fn open_catalog(settings: &Settings) -> Result<Arc<dyn SnippetCatalog>, ConfigError> {
    let backend = Backend::parse(settings.cc_backend.as_deref())?;
    let credentials = Credentials::from_settings(settings, backend)?;
    let transport = ApiTransport::new().map_err(|e| ConfigError::HttpClient(e.to_string()))?;

    tracing::info!(
        backend = ?backend,
        server = %credentials.server_url,
        user = %credentials.username,
        "snippet catalog configured"
    );

    Ok(match backend {
        Backend::Rest => Arc::new(RestCatalog::new(transport, credentials)),
        Backend::Graphql => Arc::new(GraphqlCatalog::new(
            transport,
            credentials,
            settings.cc_graphql_auth,
        )),
    })
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/open_catalog.rs"]
mod tests;
