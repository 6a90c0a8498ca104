use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::{debug, warn};

use crate::domain::{PersistedState, PricingPolicy};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "ArbitrageDesk";
const APP_NAME: &str = "ArbitrageDesk";

pub fn settings_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join("settings.json"))
}

/// Missing or unreadable settings are treated as "use defaults".
pub fn load_persisted_state_from(path: &Path) -> Option<PersistedState> {
    let data = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&data) {
        Ok(state) => Some(state),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "ignoring malformed settings");
            None
        }
    }
}

pub fn load_persisted_state() -> Option<PersistedState> {
    load_persisted_state_from(&settings_file()?)
}

pub fn save_persisted_state_to(path: &Path, state: &PersistedState) -> Result<(), PersistError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    debug!(path = %path.display(), "settings saved");
    Ok(())
}

pub fn save_persisted_state(state: &PersistedState) -> Result<(), PersistError> {
    let path = settings_file().ok_or(PersistError::StorageUnavailable)?;
    save_persisted_state_to(&path, state)
}

/// Read a standalone policy file, as passed with `--policy`.
pub fn load_policy_file(path: &Path) -> Result<PricingPolicy, PersistError> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
