//! Platform data directories.
//!
//! - macOS: ~/Library/Application Support/bizdash
//! - Linux: $XDG_DATA_HOME/bizdash or ~/.local/share/bizdash
//! - Windows: %APPDATA%\bizdash

use std::path::PathBuf;

const APP_NAME: &str = "bizdash";
const STATE_DIR: &str = "state";
const LOG_DIR: &str = "logs";

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Per-user data root for bizdash, `None` when the platform gives us no
/// home to anchor it to.
fn get_app_data_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        home_dir().map(|home| home.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        env_dir("APPDATA")
    } else if cfg!(target_os = "linux") {
        env_dir("XDG_DATA_HOME")
            .or_else(|| home_dir().map(|home| home.join(".local").join("share")))
    } else {
        None
    };
    base.map(|dir| dir.join(APP_NAME))
}

/// Root of per-user cache dirs; the settings file lives under it.
pub(crate) fn get_cache_dir() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        home_dir().map(|home| home.join("Library").join("Caches"))
    } else if cfg!(target_os = "windows") {
        env_dir("LOCALAPPDATA").or_else(|| env_dir("APPDATA"))
    } else if cfg!(target_os = "linux") {
        env_dir("XDG_CACHE_HOME").or_else(|| home_dir().map(|home| home.join(".cache")))
    } else {
        None
    }
}

/// Where [`FileStorage`](super::FileStorage) keeps state snapshots.
pub fn get_state_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(STATE_DIR))
}

/// Where the binary's rolling log files go.
pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

/// [`get_state_dir`], created if missing.
pub fn ensure_state_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_state_dir(), "Cannot determine state directory")
}

/// [`get_log_dir`], created if missing.
pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "Cannot determine log directory")
}

fn ensure_dir(dir: Option<PathBuf>, missing: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, missing))?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
