//! File-backed storage provider
//!
//! Stores key-value pairs in a single JSON file at:
//! - Linux: ~/.config/backoffice/admin/storage.json
//! - macOS: ~/Library/Application Support/io.backoffice.admin/storage.json
//! - Windows: C:\Users\<User>\AppData\Roaming\backoffice\admin\storage.json
//!
//! or at an explicit path when one is configured.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;

use crate::ports::outbound::StorageProvider;

const STORAGE_FILE_NAME: &str = "storage.json";

#[derive(Clone)]
pub struct FileStorageProvider {
    storage_path: PathBuf,
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for FileStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStorageProvider {
    /// Storage in the platform config directory
    pub fn new() -> Self {
        let storage_path = match ProjectDirs::from("io", "backoffice", "admin") {
            Some(dirs) => dirs.config_dir().join(STORAGE_FILE_NAME),
            None => PathBuf::from("backoffice_storage.json"),
        };
        Self::at_path(storage_path)
    }

    /// Storage in an explicit file. Existing content is loaded eagerly.
    pub fn at_path(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        let cache = read_storage_file(&storage_path);

        tracing::debug!(path = %storage_path.display(), entries = cache.len(), "File storage initialized");

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Apply `change` to the cache and write the file when it reports a
    /// modification. The file is written outside the lock.
    fn write_through(&self, change: impl FnOnce(&mut HashMap<String, String>) -> bool) {
        let snapshot = {
            let mut cache = match self.cache.write() {
                Ok(guard) => guard,
                Err(e) => {
                    tracing::error!(error = %e, "Storage cache lock poisoned");
                    return;
                }
            };
            if !change(&mut cache) {
                return;
            }
            serde_json::to_string_pretty(&*cache)
        };

        match snapshot {
            Ok(data) => self.write_file(&data),
            Err(e) => tracing::error!(error = %e, "Failed to serialize storage data"),
        }
    }

    fn write_file(&self, data: &str) {
        let path = &self.storage_path;
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::error!(path = %parent.display(), error = %e, "Failed to create storage directory");
                return;
            }
        }
        if let Err(e) = fs::write(path, data) {
            tracing::error!(path = %path.display(), error = %e, "Failed to write storage file");
        }
    }
}

fn read_storage_file(path: &Path) -> HashMap<String, String> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Storage file unreadable, starting empty");
            return HashMap::new();
        }
    };
    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Storage file malformed, starting empty");
        HashMap::new()
    })
}

impl StorageProvider for FileStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.write_through(|cache| {
            cache.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        });
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.cache.read() {
            Ok(cache) => cache.get(key).cloned(),
            Err(e) => {
                tracing::error!(error = %e, "Storage cache lock poisoned");
                None
            }
        }
    }

    fn remove(&self, key: &str) {
        self.write_through(|cache| cache.remove(key).is_some());
    }
}
