//! Persisted player state: the last-used remote playlist path.
//!
//! Stored as a tiny TOML file next to the config file. Read at startup to
//! auto-populate the playlist; written on every successful manual path
//! entry. A missing or corrupt file is simply treated as absent.

use std::path::{Path, PathBuf};
use std::{env, fs};

use serde::{Deserialize, Serialize};

use super::load::config_dir;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// The last `user/repo/path` entered for a remote load.
    pub remote_path: Option<String>,
}

impl PersistedState {
    pub fn load() -> Self {
        match state_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|raw| toml::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Best-effort write; persistence failures never interrupt playback.
    pub fn store(&self) {
        if let Some(path) = state_path() {
            let _ = self.store_to(&path);
        }
    }

    pub fn store_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string(self).map_err(std::io::Error::other)?;
        fs::write(path, raw)
    }
}

/// Resolve the state path from `VIVACE_STATE_PATH` or next to the config.
pub fn state_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("VIVACE_STATE_PATH") {
        return Some(PathBuf::from(p));
    }
    config_dir().map(|d| d.join("state.toml"))
}
