pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, FeaturedConfig, FeaturedItem, LoggingConfig, ShareConfig, TmdbConfig, WatchlistConfig, SORT_KEYS};
pub use credentials::{CredentialStore, TMDB_API_KEY_ENV};
pub use paths::{PathManager, base_path_override};
