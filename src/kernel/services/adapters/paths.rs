//! Where codecook keeps files on disk.
//!
//! Two roots are resolved from the environment: the platform cache dir holds
//! `.codecook/settings.json`, the data dir holds `codecook/logs`.

use std::io;
use std::path::PathBuf;

const APP_NAME: &str = "codecook";
const LOG_DIR: &str = "logs";

/// `(env var, suffix)` pairs tried in order; the first set, non-empty var wins.
type Candidates = &'static [(&'static str, &'static str)];

#[cfg(target_os = "linux")]
const DATA_ROOTS: Candidates = &[("XDG_DATA_HOME", ""), ("HOME", ".local/share")];
#[cfg(target_os = "linux")]
const CACHE_ROOTS: Candidates = &[("XDG_CACHE_HOME", ""), ("HOME", ".cache")];

#[cfg(target_os = "macos")]
const DATA_ROOTS: Candidates = &[("HOME", "Library/Application Support")];
#[cfg(target_os = "macos")]
const CACHE_ROOTS: Candidates = &[("HOME", "Library/Caches")];

#[cfg(target_os = "windows")]
const DATA_ROOTS: Candidates = &[("APPDATA", "")];
#[cfg(target_os = "windows")]
const CACHE_ROOTS: Candidates = &[("LOCALAPPDATA", ""), ("APPDATA", "")];

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const DATA_ROOTS: Candidates = &[];
#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
const CACHE_ROOTS: Candidates = &[];

fn resolve_root(candidates: Candidates, lookup: impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    candidates.iter().find_map(|&(var, suffix)| {
        let root = PathBuf::from(lookup(var).filter(|v| !v.is_empty())?);
        Some(if suffix.is_empty() { root } else { root.join(suffix) })
    })
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Settings root; `settings.rs` appends `.codecook/settings.json`.
pub(crate) fn get_cache_dir() -> Option<PathBuf> {
    resolve_root(CACHE_ROOTS, env_var)
}

pub fn get_log_dir() -> Option<PathBuf> {
    resolve_root(DATA_ROOTS, env_var).map(|root| root.join(APP_NAME).join(LOG_DIR))
}

pub fn ensure_log_dir() -> io::Result<PathBuf> {
    let dir = get_log_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Cannot determine log directory"))?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
