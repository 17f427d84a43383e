use async_trait::async_trait;
use shelf_models::{ContentRecord, Genre, MediaType, Page, SeasonDetails};
use crate::error::SourceError;

/// Read-only view of a remote metadata provider.
///
/// Everything the application needs from the outside world goes through this
/// trait, so hydration and browsing can run against an in-memory fake.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Single record keyed by `(type, id)`
    async fn get_details(&self, media_type: MediaType, id: u64) -> Result<ContentRecord, SourceError>;

    /// Same as [`MetadataSource::get_details`] with cast and crew attached.
    /// Providers without a cheaper combined call can rely on the default.
    async fn get_details_with_credits(&self, media_type: MediaType, id: u64) -> Result<ContentRecord, SourceError> {
        self.get_details(media_type, id).await
    }

    /// Trending listing, or search results when `query` is non-empty
    async fn get_listing(
        &self,
        media_type: MediaType,
        page: u32,
        query: Option<&str>,
    ) -> Result<Page<ContentRecord>, SourceError>;

    /// Most popular titles of the media type
    async fn get_popular(&self, media_type: MediaType, page: u32) -> Result<Page<ContentRecord>, SourceError>;

    async fn get_genres(&self, media_type: MediaType) -> Result<Vec<Genre>, SourceError>;

    async fn get_season(&self, series_id: u64, season_number: u32) -> Result<SeasonDetails, SourceError>;
}
