//! # State Persistence
//!
//! The auth, user machine and withdrawal slices survive restarts. They are
//! written as one JSON document:
//!
//! ```text
//! { "root": { "auth": {..}, "userMachine": {..}, "withdrawal": {..} }, "version": 1 }
//! ```
//!
//! Loading is forgiving: a missing, unreadable, corrupt or differently
//! versioned document is logged and the store starts empty.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::state::{AppState, AuthSlice, UserMachineSlice, WithdrawalSlice};
use crate::core::error::Result;

pub const STATE_VERSION: u32 = 1;

/// Where the persisted document lives.
pub trait Storage: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, contents: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSON file on disk; parent directories are created on first save.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().clone()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents.lock().clone())
    }

    fn save(&self, contents: &str) -> Result<()> {
        *self.contents.lock() = Some(contents.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.contents.lock() = None;
        Ok(())
    }
}

#[derive(Serialize)]
struct RootRef<'a> {
    auth: &'a AuthSlice,
    #[serde(rename = "userMachine")]
    user_machine: &'a UserMachineSlice,
    withdrawal: &'a WithdrawalSlice,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    root: RootRef<'a>,
    version: u32,
}

/// Persisted slices as read back from storage.
#[derive(Debug, Default, Deserialize)]
pub struct PersistedRoot {
    #[serde(default)]
    pub auth: AuthSlice,
    #[serde(default, rename = "userMachine")]
    pub user_machine: UserMachineSlice,
    #[serde(default)]
    pub withdrawal: WithdrawalSlice,
}

#[derive(Deserialize)]
struct Document {
    root: PersistedRoot,
    version: u32,
}

/// Serialize the persisted slices of `state`.
pub fn to_document(state: &AppState) -> Result<String> {
    let document = DocumentRef {
        root: RootRef {
            auth: &state.auth,
            user_machine: &state.user_machine,
            withdrawal: &state.withdrawal,
        },
        version: STATE_VERSION,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Parse a persisted document. `None` for anything unusable.
pub fn from_document(contents: &str) -> Option<PersistedRoot> {
    match serde_json::from_str::<Document>(contents) {
        Ok(document) if document.version == STATE_VERSION => Some(document.root),
        Ok(document) => {
            tracing::warn!(
                found = document.version,
                expected = STATE_VERSION,
                "Ignoring persisted state with unknown version"
            );
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring corrupt persisted state");
            None
        }
    }
}

pub fn save(storage: &dyn Storage, state: &AppState) -> Result<()> {
    storage.save(&to_document(state)?)
}

/// Read the persisted slices, if any.
pub fn load(storage: &dyn Storage) -> Option<PersistedRoot> {
    match storage.load() {
        Ok(Some(contents)) => from_document(&contents),
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read persisted state");
            None
        }
    }
}

/// Put restored slices into `state`; everything else is left as is.
pub fn restore(state: &mut AppState, root: PersistedRoot) {
    state.auth = root.auth;
    state.user_machine = root.user_machine;
    state.withdrawal = root.withdrawal;
}
