//! Small key/value store kept on the player's machine.

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{debug, warn};

/// File name used inside the platform config directory.
const STORAGE_FILE_NAME: &str = "storage.json";

/// Failures raised while reading or writing locally persisted values.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to create storage directory `{path}`")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write storage file `{path}`")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode stored value")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("storage lock poisoned")]
    Poisoned,
}

/// String key/value persistence in the spirit of the browser's `localStorage`.
pub trait ScoreStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// File-backed storage: one JSON object mapping keys to string values.
///
/// Locations:
/// - Linux: `~/.config/trivia-rpg/storage.json`
/// - macOS: `~/Library/Application Support/io.trivia-rpg.trivia-rpg/storage.json`
/// - Windows: `%APPDATA%\trivia-rpg\trivia-rpg\config\storage.json`
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    cache: Mutex<HashMap<String, String>>,
}

impl LocalStorage {
    /// Open the storage file in the platform config directory.
    pub fn open_default() -> Self {
        let path = ProjectDirs::from("io", "trivia-rpg", "trivia-rpg")
            .map(|dirs| dirs.config_dir().join(STORAGE_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from("trivia_rpg_storage.json"));
        Self::open(path)
    }

    /// Open (or lazily create) the storage file at `path`.
    ///
    /// A missing file starts empty; an unreadable or malformed one is logged and ignored.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<HashMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "malformed storage file; starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read storage file; starting empty");
                HashMap::new()
            }
        };

        debug!(path = %path.display(), keys = cache.len(), "local storage opened");

        Self {
            path,
            cache: Mutex::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, cache: &HashMap<String, String>) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = serde_json::to_string_pretty(cache)
            .map_err(|source| PersistenceError::Encode { source })?;
        fs::write(&self.path, contents).map_err(|source| PersistenceError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScoreStorage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let cache = self.cache.lock().map_err(|_| PersistenceError::Poisoned)?;
        Ok(cache.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut cache = self.cache.lock().map_err(|_| PersistenceError::Poisoned)?;
        cache.insert(key.to_owned(), value.to_owned());
        self.persist(&cache)
    }
}

/// Volatile storage, handy for tests and for running without a writable home directory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate `key` with a raw value.
    pub fn with_item(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut items) = storage.items.lock() {
            items.insert(key.to_owned(), value.to_owned());
        }
        storage
    }
}

impl ScoreStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let items = self.items.lock().map_err(|_| PersistenceError::Poisoned)?;
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut items = self.items.lock().map_err(|_| PersistenceError::Poisoned)?;
        items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
