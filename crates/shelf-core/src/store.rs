use chrono::{DateTime, Utc};
use shelf_models::{EntryKey, MediaType, MinimalEntry};
use std::collections::HashSet;
use tracing::{debug, info, warn};
use crate::storage::{StorageError, WatchlistStorage};


#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Persisted watchlist is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("Failed to serialize watchlist: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Sole owner of the persisted watchlist.
///
/// Every operation re-reads the storage slot and every mutation rewrites the
/// whole list, so the `(id, type)` uniqueness rule is enforced here and only
/// here. Two processes sharing a slot race with last-writer-wins semantics.
pub struct WatchlistStore<S> {
    storage: S,
}

impl<S: WatchlistStorage> WatchlistStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn contains(&self, id: u64, media_type: MediaType) -> Result<bool, StoreError> {
        Ok(self.load()?.iter().any(|entry| entry.matches(id, media_type)))
    }

    /// Appends a new entry stamped with the current time; no-op if already present.
    /// Returns whether the list changed.
    pub fn add(&self, id: u64, media_type: MediaType, note: &str) -> Result<bool, StoreError> {
        self.add_at(id, media_type, note, Utc::now())
    }

    pub fn add_at(
        &self,
        id: u64,
        media_type: MediaType,
        note: &str,
        added_at: DateTime<Utc>,
    ) -> Result<bool, StoreError> {
        let mut entries = self.load()?;
        if entries.iter().any(|entry| entry.matches(id, media_type)) {
            debug!("{} {} already in watchlist", media_type, id);
            return Ok(false);
        }

        entries.push(MinimalEntry::new(id, media_type, added_at, note));
        self.persist(&entries)?;
        info!("Added {} {} to watchlist ({} entries)", media_type, id, entries.len());
        Ok(true)
    }

    /// Returns whether an entry was removed
    pub fn remove(&self, id: u64, media_type: MediaType) -> Result<bool, StoreError> {
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|entry| !entry.matches(id, media_type));
        if entries.len() == before {
            debug!("{} {} not in watchlist, nothing to remove", media_type, id);
            return Ok(false);
        }

        self.persist(&entries)?;
        info!("Removed {} {} from watchlist ({} entries)", media_type, id, entries.len());
        Ok(true)
    }

    /// Flips membership and returns the new state. Removing drops the note,
    /// so a later re-add starts from an empty one.
    pub fn toggle(&self, id: u64, media_type: MediaType) -> Result<bool, StoreError> {
        if self.contains(id, media_type)? {
            self.remove(id, media_type)?;
            Ok(false)
        } else {
            self.add(id, media_type, "")?;
            Ok(true)
        }
    }

    /// Overwrites the note of an existing entry. Absent entries are left alone
    /// and `false` is returned.
    pub fn set_note(&self, id: u64, media_type: MediaType, note: &str) -> Result<bool, StoreError> {
        let mut entries = self.load()?;
        let Some(entry) = entries.iter_mut().find(|entry| entry.matches(id, media_type)) else {
            debug!("{} {} not in watchlist, note ignored", media_type, id);
            return Ok(false);
        };

        entry.note = note.to_string();
        self.persist(&entries)?;
        info!("Updated note for {} {}", media_type, id);
        Ok(true)
    }

    /// Owned snapshot; changing it has no effect on the store
    pub fn list(&self) -> Result<Vec<MinimalEntry>, StoreError> {
        self.load()
    }

    fn load(&self) -> Result<Vec<MinimalEntry>, StoreError> {
        let Some(raw) = self.storage.read()? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parsed: Vec<MinimalEntry> = serde_json::from_str(&raw).map_err(StoreError::Corrupt)?;
        let total = parsed.len();

        let mut seen: HashSet<EntryKey> = HashSet::with_capacity(total);
        let entries: Vec<MinimalEntry> = parsed.into_iter().filter(|entry| seen.insert(entry.key())).collect();
        if entries.len() < total {
            warn!(
                "Watchlist contained {} duplicate entries; keeping the first of each",
                total - entries.len()
            );
        }
        Ok(entries)
    }

    fn persist(&self, entries: &[MinimalEntry]) -> Result<(), StoreError> {
        let json = serde_json::to_string(entries).map_err(StoreError::Serialize)?;
        self.storage.write(&json)?;
        Ok(())
    }
}
