use shelf_config::{PathManager, WatchlistConfig};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage slot unavailable: {0}")]
    Unavailable(String),
}

/// Whole-value key/value slot holding the serialized watchlist.
///
/// There is no partial update: callers always read and write the complete value.
pub trait WatchlistStorage: Send + Sync {
    /// `None` when nothing has been written yet
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&self, data: &str) -> Result<(), StorageError>;
}

impl<T: WatchlistStorage + ?Sized> WatchlistStorage for Arc<T> {
    fn read(&self) -> Result<Option<String>, StorageError> {
        (**self).read()
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        (**self).write(data)
    }
}

/// JSON file on disk, replaced atomically on every write
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Configured override, or the default slot under the data directory
    pub fn from_config(paths: &PathManager, config: &WatchlistConfig) -> Self {
        let path = config
            .storage_file
            .clone()
            .unwrap_or_else(|| paths.watchlist_file());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WatchlistStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            debug!("Watchlist file {:?} does not exist yet", self.path);
            return Ok(None);
        }

        std::fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }

        // Write to a temp file, then rename over the slot
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, data).map_err(write_err)?;
        std::fs::rename(&temp_path, &self.path).map_err(write_err)?;
        debug!("Wrote {} bytes to {:?}", data.len(), self.path);
        Ok(())
    }
}

/// In-process slot, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(contents.into())),
        }
    }

    /// Raw value currently held, as the store last wrote it
    pub fn contents(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl WatchlistStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    fn write(&self, data: &str) -> Result<(), StorageError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *slot = Some(data.to_string());
        Ok(())
    }
}
