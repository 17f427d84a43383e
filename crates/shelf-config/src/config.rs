use serde::{Deserialize, Serialize};
use shelf_models::MediaType;
use std::path::{Path, PathBuf};

/// Sort keys accepted by `watchlist.default_sort`
pub const SORT_KEYS: [&str; 4] = ["addedAt", "title", "rating", "year"];

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub share: ShareConfig,
    #[serde(default)]
    pub watchlist: WatchlistConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub featured: FeaturedConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_image_base")]
    pub image_base: String,
    /// Upper bound for a single remote request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ShareConfig {
    /// Scheme and host the shared links point at
    #[serde(default = "default_share_origin")]
    pub origin: String,
    #[serde(default = "default_share_base_path")]
    pub base_path: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WatchlistConfig {
    #[serde(default = "default_sort")]
    pub default_sort: String,
    /// Overrides the default `data/watchlist.json` location
    #[serde(default)]
    pub storage_file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Force JSON on or off; unset means "JSON unless stdout is a terminal"
    #[serde(default)]
    pub json: Option<bool>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Hand-picked titles shown ahead of the popular lists
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct FeaturedConfig {
    #[serde(default)]
    pub items: Vec<FeaturedItem>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FeaturedItem {
    pub id: u64,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

fn default_api_base() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_share_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_share_base_path() -> String {
    "movies".to_string()
}

fn default_sort() -> String {
    "addedAt".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            image_base: default_image_base(),
            request_timeout_secs: default_request_timeout_secs(),
            language: None,
        }
    }
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: default_share_origin(),
            base_path: default_share_base_path(),
        }
    }
}

impl Default for WatchlistConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            storage_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Missing file means defaults; a file that exists but does not parse is an error
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("tmdb.request_timeout_secs must be greater than zero"));
        }
        if !is_http_url(&self.tmdb.api_base) {
            return Err(anyhow::anyhow!("tmdb.api_base must be an http(s) URL, got '{}'", self.tmdb.api_base));
        }
        if !is_http_url(&self.tmdb.image_base) {
            return Err(anyhow::anyhow!("tmdb.image_base must be an http(s) URL, got '{}'", self.tmdb.image_base));
        }
        if !is_http_url(&self.share.origin) {
            return Err(anyhow::anyhow!("share.origin must be an http(s) URL, got '{}'", self.share.origin));
        }
        if !SORT_KEYS.contains(&self.watchlist.default_sort.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid watchlist.default_sort '{}', expected one of: {}",
                self.watchlist.default_sort,
                SORT_KEYS.join(", ")
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.tmdb.request_timeout_secs)
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.share.origin = "https://shelf.example.com".to_string();
        config.tmdb.request_timeout_secs = 3;
        config.watchlist.default_sort = "rating".to_string();

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.share.origin, "https://shelf.example.com");
        assert_eq!(loaded.share.base_path, "movies");
        assert_eq!(loaded.tmdb.request_timeout_secs, 3);
        assert_eq!(loaded.watchlist.default_sort, "rating");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[share]\norigin = \"https://a.example\"\n").unwrap();
        assert_eq!(config.share.origin, "https://a.example");
        assert_eq!(config.tmdb.api_base, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.request_timeout_secs, 10);
        assert_eq!(config.watchlist.default_sort, "addedAt");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_featured_items() {
        let config: Config = toml::from_str(
            "[[featured.items]]\nid = 27205\ntype = \"movie\"\n\n[[featured.items]]\nid = 1396\ntype = \"tv\"\n",
        )
        .unwrap();
        assert_eq!(
            config.featured.items,
            vec![
                FeaturedItem { id: 27205, media_type: MediaType::Movie },
                FeaturedItem { id: 1396, media_type: MediaType::Tv },
            ]
        );

        assert!(Config::default().featured.items.is_empty());
        assert!(toml::from_str::<Config>("[[featured.items]]\nid = 1\ntype = \"anime\"\n").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.share.base_path, "movies");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.request_timeout_secs = 0;
        assert!(config.validate().is_err());
        config.tmdb.request_timeout_secs = 10;

        config.watchlist.default_sort = "popularity".to_string();
        assert!(config.validate().is_err());
        config.watchlist.default_sort = "year".to_string();

        config.share.origin = "shelf.example.com".to_string();
        assert!(config.validate().is_err());
    }
}
