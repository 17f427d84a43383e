use async_trait::async_trait;
use shelf_models::{ContentRecord, Credits, Genre, MediaType, Page, SeasonDetails};
use shelf_sources::{MetadataSource, SourceError};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory metadata source with per-item failures, delays and hangs
#[derive(Default)]
pub struct FakeSource {
    pub records: HashMap<(MediaType, u64), ContentRecord>,
    pub failing: HashSet<(MediaType, u64)>,
    pub hanging: HashSet<(MediaType, u64)>,
    pub delays: HashMap<(MediaType, u64), Duration>,
    pub listing: HashMap<MediaType, Page<ContentRecord>>,
    pub genres: HashMap<MediaType, Vec<Genre>>,
    pub seasons: HashMap<(u64, u32), SeasonDetails>,
    pub calls: AtomicUsize,
    /// `(type, page, query)` of every listing request
    pub popular: HashMap<MediaType, Page<ContentRecord>>,
    pub failing_popular: HashSet<MediaType>,
    pub listing_requests: Mutex<Vec<(MediaType, u32, Option<String>)>>,
}

pub fn record(id: u64, title: &str) -> ContentRecord {
    ContentRecord {
        id,
        title: Some(title.to_string()),
        ..Default::default()
    }
}

impl FakeSource {
    pub fn with_record(mut self, media_type: MediaType, record: ContentRecord) -> Self {
        self.records.insert((media_type, record.id), record);
        self
    }

    pub fn failing(mut self, media_type: MediaType, id: u64) -> Self {
        self.failing.insert((media_type, id));
        self
    }

    pub fn hanging(mut self, media_type: MediaType, id: u64) -> Self {
        self.hanging.insert((media_type, id));
        self
    }

    pub fn delayed(mut self, media_type: MediaType, id: u64, delay: Duration) -> Self {
        self.delays.insert((media_type, id), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for FakeSource {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn get_details(&self, media_type: MediaType, id: u64) -> Result<ContentRecord, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let key = (media_type, id);
        if self.hanging.contains(&key) {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = self.delays.get(&key) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&key) {
            return Err(SourceError::Status {
                endpoint: format!("/{}/{}", media_type, id),
                status: 500,
                body: String::new(),
            });
        }
        self.records
            .get(&key)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("/{}/{}", media_type, id)))
    }

    async fn get_details_with_credits(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<ContentRecord, SourceError> {
        let mut record = self.get_details(media_type, id).await?;
        record.credits.get_or_insert_with(Credits::default);
        Ok(record)
    }

    async fn get_listing(
        &self,
        media_type: MediaType,
        page: u32,
        query: Option<&str>,
    ) -> Result<Page<ContentRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.listing_requests.lock() {
            requests.push((media_type, page, query.map(str::to_string)));
        }
        Ok(self.listing.get(&media_type).cloned().unwrap_or_else(Page::empty))
    }

    async fn get_popular(&self, media_type: MediaType, _page: u32) -> Result<Page<ContentRecord>, SourceError> {
        if self.failing_popular.contains(&media_type) {
            return Err(SourceError::Status {
                endpoint: format!("/{}/popular", media_type),
                status: 503,
                body: String::new(),
            });
        }
        Ok(self.popular.get(&media_type).cloned().unwrap_or_else(Page::empty))
    }

    async fn get_genres(&self, media_type: MediaType) -> Result<Vec<Genre>, SourceError> {
        self.genres
            .get(&media_type)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("/genre/{}/list", media_type)))
    }

    async fn get_season(&self, series_id: u64, season_number: u32) -> Result<SeasonDetails, SourceError> {
        self.seasons
            .get(&(series_id, season_number))
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("/tv/{}/season/{}", series_id, season_number)))
    }
}
