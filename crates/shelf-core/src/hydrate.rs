use futures::future::join_all;
use shelf_models::{DisplayItem, MinimalEntry};
use shelf_sources::MetadataSource;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use crate::storage::WatchlistStorage;
use crate::store::{StoreError, WatchlistStore};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum HydrateError {
    /// The entry list itself could not be read; nothing was fetched
    #[error("Failed to load watchlist: {0}")]
    SourceUnreadable(#[source] StoreError),

    #[error("Watchlist loading was cancelled")]
    Cancelled,
}

/// Resolves watchlist entries into display items, one remote fetch per entry.
pub struct Hydrator<M> {
    source: M,
    timeout: Duration,
}

impl<M: MetadataSource> Hydrator<M> {
    pub fn new(source: M) -> Self {
        Self {
            source,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Upper bound for each individual fetch
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    /// Fetches every entry concurrently and joins the results.
    ///
    /// A failed, timed-out or cancelled fetch only drops its own item; the
    /// survivors keep the relative order of `entries`. When `cancel` fires the
    /// whole batch is reported as [`HydrateError::Cancelled`] and its partial
    /// result is thrown away.
    pub async fn hydrate(
        &self,
        entries: &[MinimalEntry],
        cancel: &CancellationToken,
    ) -> Result<Vec<DisplayItem>, HydrateError> {
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let results = join_all(entries.iter().map(|entry| self.fetch_one(entry, cancel))).await;

        if cancel.is_cancelled() {
            debug!("Hydration of {} entries cancelled, discarding results", entries.len());
            return Err(HydrateError::Cancelled);
        }

        let items: Vec<DisplayItem> = results.into_iter().flatten().collect();
        if items.len() < entries.len() {
            warn!(
                "Hydrated {} of {} watchlist entries from {}",
                items.len(),
                entries.len(),
                self.source.source_name()
            );
        } else {
            info!("Hydrated {} watchlist entries from {}", items.len(), self.source.source_name());
        }
        Ok(items)
    }

    /// Reads the store, then hydrates what it holds
    pub async fn hydrate_store<S: WatchlistStorage>(
        &self,
        store: &WatchlistStore<S>,
        cancel: &CancellationToken,
    ) -> Result<Vec<DisplayItem>, HydrateError> {
        let entries = store.list().map_err(HydrateError::SourceUnreadable)?;
        self.hydrate(&entries, cancel).await
    }

    async fn fetch_one(&self, entry: &MinimalEntry, cancel: &CancellationToken) -> Option<DisplayItem> {
        let fetch = tokio::time::timeout(self.timeout, self.source.get_details(entry.media_type, entry.id));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = fetch => match result {
                Ok(Ok(record)) if record.id == entry.id => Some(DisplayItem::new(record, entry)),
                Ok(Ok(record)) => {
                    warn!(
                        "Failed to fetch details for {} {}: response is for id {}",
                        entry.media_type, entry.id, record.id
                    );
                    None
                }
                Ok(Err(e)) => {
                    warn!("Failed to fetch details for {} {}: {}", entry.media_type, entry.id, e);
                    None
                }
                Err(_) => {
                    warn!(
                        "Fetching details for {} {} timed out after {:?}",
                        entry.media_type, entry.id, self.timeout
                    );
                    None
                }
            },
        }
    }
}
