use super::paths::get_cache_dir;
use crate::kernel::services::ports::settings::{Settings, DEFAULT_API_SERVER};
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = ".codecook";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Cannot determine settings directory")]
    NoSettingsDir,
    #[error("Cannot read settings {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Written on first run so users see which keys exist.
pub fn settings_template() -> Settings {
    Settings {
        cc_user: Some(String::new()),
        cc_key: Some(String::new()),
        cc_api_server: Some(DEFAULT_API_SERVER.to_string()),
        cc_backend: Some("graphql".to_string()),
        ..Settings::default()
    }
}

pub fn ensure_settings_file_at(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content = serde_json::to_string_pretty(&settings_template())
            .unwrap_or_else(|_| "{}".to_string());
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "settings file created");
    }
    Ok(())
}

pub fn ensure_settings_file() -> Result<PathBuf, SettingsError> {
    let path = get_settings_path().ok_or(SettingsError::NoSettingsDir)?;
    ensure_settings_file_at(&path).map_err(|source| SettingsError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| SettingsError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads (creating if needed) the settings file, then applies environment overrides.
pub fn load_settings() -> Result<Settings, SettingsError> {
    let path = ensure_settings_file()?;
    let mut settings = load_settings_from(&path)?;
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

pub fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    let overrides: [(&str, &mut Option<String>); 5] = [
        ("CODECOOK_USER", &mut settings.cc_user),
        ("CODECOOK_KEY", &mut settings.cc_key),
        ("CODECOOK_API_URL", &mut settings.cc_api_url),
        ("CODECOOK_API_SERVER", &mut settings.cc_api_server),
        ("CODECOOK_BACKEND", &mut settings.cc_backend),
    ];
    for (key, slot) in overrides {
        if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
            tracing::debug!(key, "settings override from environment");
            *slot = Some(value);
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
