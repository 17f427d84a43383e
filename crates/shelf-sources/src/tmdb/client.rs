use async_trait::async_trait;
use reqwest::Client;
use shelf_config::TmdbConfig;
use shelf_models::{ContentRecord, Genre, MediaType, Page, SeasonDetails};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use crate::error::SourceError;
use crate::tmdb::api::{self, RequestContext};
use crate::traits::MetadataSource;

const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    language: Option<String>,
    timeout: Duration,
}

impl TmdbClient {
    pub fn new(api_key: String) -> Result<Self, SourceError> {
        Self::build(api_key, DEFAULT_API_BASE.to_string(), None, DEFAULT_TIMEOUT)
    }

    pub fn from_config(config: &TmdbConfig, api_key: Option<String>) -> Result<Self, SourceError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(SourceError::MissingApiKey)?;
        let client = Self::build(
            api_key,
            config.api_base.clone(),
            config.language.clone(),
            Duration::from_secs(config.request_timeout_secs.max(1)),
        )?;
        info!("TMDB client ready ({}, timeout {:?})", client.base_url, client.timeout);
        Ok(client)
    }

    fn build(api_key: String, base_url: String, language: Option<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("reelshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            api_key,
            language,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn context(&self) -> RequestContext<'_> {
        RequestContext {
            client: &self.client,
            base_url: &self.base_url,
            api_key: &self.api_key,
            language: self.language.as_deref(),
            timeout: self.timeout,
        }
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn get_details(&self, media_type: MediaType, id: u64) -> Result<ContentRecord, SourceError> {
        api::get_details(&self.context(), media_type, id, false).await
    }

    async fn get_details_with_credits(&self, media_type: MediaType, id: u64) -> Result<ContentRecord, SourceError> {
        api::get_details(&self.context(), media_type, id, true).await
    }

    async fn get_listing(
        &self,
        media_type: MediaType,
        page: u32,
        query: Option<&str>,
    ) -> Result<Page<ContentRecord>, SourceError> {
        api::get_listing(&self.context(), media_type, page, query).await
    }

    async fn get_popular(&self, media_type: MediaType, page: u32) -> Result<Page<ContentRecord>, SourceError> {
        api::get_popular(&self.context(), media_type, page).await
    }

    async fn get_genres(&self, media_type: MediaType) -> Result<Vec<Genre>, SourceError> {
        api::get_genres(&self.context(), media_type).await
    }

    async fn get_season(&self, series_id: u64, season_number: u32) -> Result<SeasonDetails, SourceError> {
        api::get_season(&self.context(), series_id, season_number).await
    }
}
