use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::content::ContentRecord;
use crate::entry::{EntryKey, MinimalEntry};
use crate::media::MediaType;

// Keys the watchlist fields occupy when the item is serialized flat.
const ENRICHMENT_KEYS: [&str; 3] = ["type", "addedAt", "note"];

/// A fetched record enriched with the watchlist fields of its entry.
///
/// Only ever built by hydration and never persisted; [`DisplayItem::entry`]
/// gives back the minimal projection that storage accepts.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayItem {
    #[serde(flatten)]
    pub record: ContentRecord,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    #[serde(rename = "addedAt")]
    pub added_at: DateTime<Utc>,
    pub note: String,
}

impl DisplayItem {
    /// Enrichment wins over anything the record carried under the same keys.
    pub fn new(mut record: ContentRecord, entry: &MinimalEntry) -> Self {
        for key in ENRICHMENT_KEYS {
            record.extra.remove(key);
        }
        Self {
            record,
            media_type: entry.media_type,
            added_at: entry.added_at,
            note: entry.note.clone(),
        }
    }

    pub fn id(&self) -> u64 {
        self.record.id
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.record.id, self.media_type)
    }

    pub fn entry(&self) -> MinimalEntry {
        MinimalEntry::new(self.record.id, self.media_type, self.added_at, self.note.clone())
    }

    pub fn title(&self) -> &str {
        self.record.title_of()
    }

    pub fn year(&self) -> Option<i32> {
        self.record.year_of()
    }

    pub fn rating(&self) -> Option<f64> {
        self.record.rating()
    }
}

/// A remote record labelled with the media type it was fetched as, for
/// mixed lists such as the featured carousel.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TaggedRecord {
    #[serde(flatten)]
    pub record: ContentRecord,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

impl TaggedRecord {
    pub fn new(mut record: ContentRecord, media_type: MediaType) -> Self {
        record.extra.remove("type");
        Self { record, media_type }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.record.id, self.media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrichment_overrides_record_keys() {
        let record: ContentRecord =
            serde_json::from_str(r#"{"id":603,"title":"The Matrix","note":"from api","vote_average":8.2}"#).unwrap();
        let entry = MinimalEntry::new(603, MediaType::Movie, Utc::now(), "mine");
        let item = DisplayItem::new(record, &entry);

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["note"], "mine");
        assert_eq!(json["type"], "movie");
        assert_eq!(json["title"], "The Matrix");
        assert_eq!(item.entry(), entry);
        assert_eq!(item.rating(), Some(8.2));
    }

    #[test]
    fn test_tagged_record_serializes_type() {
        let record: ContentRecord = serde_json::from_str(r#"{"id":1396,"name":"Breaking Bad","type":"x"}"#).unwrap();
        let tagged = TaggedRecord::new(record, MediaType::Tv);
        let json = serde_json::to_value(&tagged).unwrap();
        assert_eq!(json["type"], "tv");
        assert_eq!(json["name"], "Breaking Bad");
        assert_eq!(tagged.key(), EntryKey::new(1396, MediaType::Tv));
    }
}
