use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use crate::api::User;
use crate::utils::StackError;

/// Key-value storage backing the persisted session
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StackError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StackError>;
    fn remove(&self, key: &str) -> Result<(), StackError>;
}

/// Storage that lives as long as the process
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StackError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StackError> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StackError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// One JSON file per key under a directory
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StackError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StackError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StackError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// The persisted [`User`], stored as JSON under a single key
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Read the stored user. Unreadable or corrupt entries count as absent;
    /// corrupt ones are removed.
    pub fn load(&self) -> Option<User> {
        let raw = match self.storage.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read stored session");
                return None;
            }
        };

        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "discarding corrupt stored session");
                if let Err(e) = self.storage.remove(&self.key) {
                    warn!(error = %e, "failed to remove corrupt session");
                }
                None
            }
        }
    }

    pub fn save(&self, user: &User) -> Result<(), StackError> {
        let raw = serde_json::to_string(user)?;
        self.storage.set(&self.key, &raw)
    }

    pub fn clear(&self) -> Result<(), StackError> {
        self.storage.remove(&self.key)
    }
}
