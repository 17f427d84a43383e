use color_eyre::eyre::eyre;
use color_eyre::Result;
use shelf_config::{Config, CredentialStore, PathManager};
use shelf_core::{FileStorage, SortKey, WatchlistStore};
use shelf_sources::{SourceError, TmdbClient};
use tracing::{debug, warn};

/// Paths, configuration and credentials shared by every command
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        Self::load_from(PathManager::default())
    }

    pub fn load_from(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let credentials_file = paths.credentials_file();
        let mut credentials = CredentialStore::new(credentials_file.clone());
        credentials
            .load()
            .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

        Ok(Self {
            paths,
            config,
            credentials,
        })
    }

    pub fn store(&self) -> WatchlistStore<FileStorage> {
        let storage = FileStorage::from_config(&self.paths, &self.config.watchlist);
        debug!("Watchlist storage at {}", storage.path().display());
        WatchlistStore::new(storage)
    }

    pub fn source(&self) -> Result<TmdbClient> {
        TmdbClient::from_config(&self.config.tmdb, self.credentials.resolve_tmdb_api_key()).map_err(|e| match e {
            SourceError::MissingApiKey => eyre!(
                "No TMDB API key configured. Run 'reelshelf config api-key' or set {}",
                shelf_config::TMDB_API_KEY_ENV
            ),
            other => eyre!("Failed to create TMDB client: {}", other),
        })
    }

    /// `watchlist.default_sort`, unless overridden on the command line
    pub fn sort_key(&self, requested: Option<SortKey>) -> SortKey {
        requested.unwrap_or_else(|| {
            self.config.watchlist.default_sort.parse().unwrap_or_else(|e| {
                warn!("{}; using addedAt", e);
                SortKey::default()
            })
        })
    }
}
