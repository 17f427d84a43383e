use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::MediaType;

/// Compound identity of a watchlist entry.
///
/// A movie and a series can share the same numeric id, so `id` alone is never
/// enough to identify an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub id: u64,
    pub media_type: MediaType,
}

impl EntryKey {
    pub fn new(id: u64, media_type: MediaType) -> Self {
        Self { id, media_type }
    }
}

/// The persisted unit of the watchlist.
///
/// Field names on the wire are `id`, `type`, `addedAt` and `note`; nothing else
/// is ever written back to storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MinimalEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub note: String,
}

impl MinimalEntry {
    pub fn new(id: u64, media_type: MediaType, added_at: DateTime<Utc>, note: impl Into<String>) -> Self {
        Self {
            id,
            media_type,
            added_at,
            note: note.into(),
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.id, self.media_type)
    }

    pub fn matches(&self, id: u64, media_type: MediaType) -> bool {
        self.id == id && self.media_type == media_type
    }

    /// Projection sent through shareable links (notes stay private)
    pub fn to_share(&self) -> ShareEntry {
        ShareEntry {
            id: self.id,
            media_type: self.media_type,
            added_at: self.added_at,
        }
    }
}

/// Wire form of an entry inside a shareable link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareEntry {
    pub id: u64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
}

impl From<ShareEntry> for MinimalEntry {
    fn from(entry: ShareEntry) -> Self {
        MinimalEntry::new(entry.id, entry.media_type, entry.added_at, String::new())
    }
}
