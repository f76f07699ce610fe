//! Blocking JSON-over-HTTP transport shared by the catalog clients.
//!
//! One call is one round-trip: no retries, no caching. Failures are sorted into transport
//! (unreachable, non-2xx) and parse errors so the flow can report them.

use crate::kernel::services::ports::{CatalogError, CatalogResult};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::Value;

const USER_AGENT: &str = concat!("codecook/", env!("CARGO_PKG_VERSION"));

pub struct ApiTransport {
    client: Client,
}

impl ApiTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    /// GET `url` with `query` appended as url-encoded parameters.
    ///
    /// `url` is what ends up in errors and logs, so keep secrets in `query`.
    pub fn get(&self, url: &str, query: &[(&str, &str)]) -> CatalogResult<Value> {
        tracing::debug!(method = "GET", url = %url, "catalog request");
        let request = self
            .client
            .get(url)
            .query(query)
            .header(ACCEPT, "application/json");
        send(url, request)
    }

    /// POST `body` as UTF-8 JSON.
    pub fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&'static str, String)],
    ) -> CatalogResult<Value> {
        tracing::debug!(method = "POST", url = %url, "catalog request");
        let payload = serde_json::to_vec(body).map_err(|e| CatalogError::Parse(e.to_string()))?;
        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        send(url, request)
    }
}

fn send(url: &str, request: RequestBuilder) -> CatalogResult<Value> {
    let response = request.send().map_err(|e| {
        tracing::warn!(url = %url, error = %e, "catalog request failed");
        CatalogError::Transport {
            url: url.to_string(),
            message: e.without_url().to_string(),
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(url = %url, status = status.as_u16(), "catalog request rejected");
        return Err(CatalogError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response.text().map_err(|e| CatalogError::Transport {
        url: url.to_string(),
        message: e.without_url().to_string(),
    })?;

    serde_json::from_str(&body).map_err(|e| {
        tracing::warn!(url = %url, error = %e, "catalog response is not json");
        CatalogError::Parse(e.to_string())
    })
}
