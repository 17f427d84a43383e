use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that takes precedence over the stored API key
pub const TMDB_API_KEY_ENV: &str = "TMDB_API_KEY";

/// On-disk shape of `credentials.toml`
#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
struct CredentialsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tmdb_api_key: Option<String>,
}

/// The TMDB API key, kept in `credentials.toml` apart from `config.toml` so the
/// config file can be shared without leaking it. Nothing else is stored here.
pub struct CredentialStore {
    path: PathBuf,
    file: CredentialsFile,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            file: CredentialsFile::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file leaves the store empty
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        self.file = toml::from_str(&content).with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&self.file)?)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    pub fn get_tmdb_api_key(&self) -> Option<&String> {
        self.file.tmdb_api_key.as_ref()
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.file.tmdb_api_key = Some(key);
    }

    pub fn clear_tmdb_api_key(&mut self) {
        self.file.tmdb_api_key = None;
    }

    /// API key from the environment, falling back to the stored one
    pub fn resolve_tmdb_api_key(&self) -> Option<String> {
        let from_env = std::env::var(TMDB_API_KEY_ENV).ok();
        pick_api_key(from_env, self.get_tmdb_api_key())
    }
}

fn pick_api_key(from_env: Option<String>, stored: Option<&String>) -> Option<String> {
    from_env
        .filter(|key| !key.trim().is_empty())
        .or_else(|| stored.filter(|key| !key.trim().is_empty()).cloned())
}
