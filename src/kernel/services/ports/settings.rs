use serde::{Deserialize, Serialize};

pub const DEFAULT_API_SERVER: &str = "http://localhost:4000";
pub const DEFAULT_API_PATH: &str = "/graphql";

pub const REQUIRED_REST_SETTINGS: &[&str] = &["cc_user", "cc_key", "cc_api_url"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_user: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_key: Option<String>,
    /// REST base url, e.g. `https://codecarbon.io/api/v1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_api_url: Option<String>,
    /// GraphQL server; `DEFAULT_API_SERVER` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_api_server: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_api_path: Option<String>,
    /// `"graphql"` (default) or `"rest"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cc_backend: Option<String>,
    /// Send `Authorization: ApiKey <user>:<key>` with GraphQL requests.
    #[serde(default)]
    pub cc_graphql_auth: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Graphql,
    Rest,
}

impl Backend {
    pub fn parse(value: Option<&str>) -> Result<Self, ConfigError> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(Backend::Graphql),
            Some(v) => match v.to_ascii_lowercase().as_str() {
                "graphql" | "codecook" => Ok(Backend::Graphql),
                "rest" | "codecarbon" => Ok(Backend::Rest),
                _ => Err(ConfigError::UnknownBackend(v.to_string())),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Username and key need to be defined (keys: 'cc_user' and 'cc_key'). Go to CodeCook.io for an account and key")]
    MissingCredentials,
    #[error("Not all settings found. Did you set:\n{}", REQUIRED_REST_SETTINGS.join("\n"))]
    MissingApiUrl,
    #[error("Unknown snippet backend '{0}' (expected 'graphql' or 'rest')")]
    UnknownBackend(String),
    #[error("Invalid API url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Could not initialise the HTTP client: {0}")]
    HttpClient(String),
}

/// Immutable for the lifetime of one command invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub api_key: String,
    pub server_url: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_key", &"<redacted>")
            .field("server_url", &self.server_url)
            .finish()
    }
}

impl Credentials {
    pub fn from_settings(settings: &Settings, backend: Backend) -> Result<Self, ConfigError> {
        let (Some(username), Some(api_key)) = (
            non_blank(settings.cc_user.as_deref()),
            non_blank(settings.cc_key.as_deref()),
        ) else {
            return Err(ConfigError::MissingCredentials);
        };

        let server_url = match backend {
            Backend::Rest => non_blank(settings.cc_api_url.as_deref())
                .ok_or(ConfigError::MissingApiUrl)?
                .trim_end_matches('/')
                .to_string(),
            Backend::Graphql => {
                let server = non_blank(settings.cc_api_server.as_deref())
                    .unwrap_or(DEFAULT_API_SERVER)
                    .trim_end_matches('/');
                let path = non_blank(settings.cc_api_path.as_deref()).unwrap_or(DEFAULT_API_PATH);
                if path.starts_with('/') {
                    format!("{server}{path}")
                } else {
                    format!("{server}/{path}")
                }
            }
        };

        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl {
                url: server_url,
                reason: "expected an http:// or https:// url".to_string(),
            });
        }

        Ok(Self {
            username: username.to_string(),
            api_key: api_key.to_string(),
            server_url,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/ports/settings.rs"]
mod tests;
