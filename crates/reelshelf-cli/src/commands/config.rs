use super::AppContext;
use crate::output::{self, Output};
use crate::ConfigCommands;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use serde_json::json;
use shelf_config::{Config, CredentialStore, TMDB_API_KEY_ENV};

pub fn run_config(ctx: &AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(ctx, full, output),
        ConfigCommands::ApiKey { key, clear } => configure_api_key(ctx, key, clear, output),
        ConfigCommands::Init { force } => init_config(ctx, force, output),
    }
}

fn show_config(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let config_file = ctx.paths.config_file();
    let api_key = ctx.credentials.resolve_tmdb_api_key().unwrap_or_default();
    let api_key_display = if full { api_key.clone() } else { mask_string(&api_key) };
    let key_source = if std::env::var(TMDB_API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        TMDB_API_KEY_ENV.to_string()
    } else {
        ctx.paths.credentials_file().display().to_string()
    };
    let storage_file = config
        .watchlist
        .storage_file
        .clone()
        .unwrap_or_else(|| ctx.paths.watchlist_file());

    if !output.is_human() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "tmdb": {
                "api_base": config.tmdb.api_base,
                "image_base": config.tmdb.image_base,
                "request_timeout_secs": config.tmdb.request_timeout_secs,
                "language": config.tmdb.language,
                "api_key": api_key_display,
                "api_key_source": key_source,
            },
            "share": {
                "origin": config.share.origin,
                "base_path": config.share.base_path,
            },
            "watchlist": {
                "default_sort": config.watchlist.default_sort,
                "storage_file": storage_file.display().to_string(),
            },
            "featured": config.featured.items,
            "logging": {
                "level": config.logging.level,
                "json": config.logging.json,
                "file": config.logging.file.as_ref().map(|f| f.display().to_string()),
            },
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!(
            "No configuration file at {}; showing defaults. Run 'reelshelf config init' to create one.",
            config_file.display()
        ));
    }

    let mut table = output::new_table();
    table.set_header(output::header(&["Setting", "Value"]));
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("TMDB API", config.tmdb.api_base.clone()),
        ("Images", config.tmdb.image_base.clone()),
        ("Request timeout", format!("{}s", config.tmdb.request_timeout_secs)),
        ("Language", config.tmdb.language.clone().unwrap_or_else(|| "<default>".to_string())),
        ("API key", api_key_display),
        ("API key source", key_source),
        ("Share origin", config.share.origin.clone()),
        ("Share base path", config.share.base_path.clone()),
        ("Default sort", config.watchlist.default_sort.clone()),
        ("Watchlist file", storage_file.display().to_string()),
        ("Featured picks", config.featured.items.len().to_string()),
        ("Log level", config.logging.level.clone()),
        (
            "Log file",
            config
                .logging
                .file
                .as_ref()
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "<stderr>".to_string()),
        ),
    ];
    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    output.table(&table);
    Ok(())
}

fn configure_api_key(ctx: &AppContext, key: Option<String>, clear: bool, output: &Output) -> Result<()> {
    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;

    let credentials_file = ctx.paths.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    if clear {
        store.clear_tmdb_api_key();
        store
            .save()
            .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;
        output.success("Stored TMDB API key removed");
        return Ok(());
    }

    let key = match key {
        Some(key) => key,
        None => rpassword::prompt_password(format!("{} ", "TMDB API key:".bold()))
            .map_err(|e| eyre!("Failed to read API key: {}", e))?,
    };
    let key = key.trim().to_string();
    validate_api_key(&key).map_err(|e| eyre!(e))?;

    store.set_tmdb_api_key(key);
    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    output.success(format!("TMDB API key saved to {}", credentials_file.display()));
    if std::env::var(TMDB_API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", TMDB_API_KEY_ENV));
    }
    Ok(())
}

fn init_config(ctx: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = ctx.paths.config_file();
    if config_file.exists() && !force {
        return Err(eyre!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
    }

    ctx.paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create configuration directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Default configuration written to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    if s.len() <= 4 || !s.is_ascii() {
        return "*".repeat(s.chars().count());
    }
    format!("{}***{}", &s[..2], &s[s.len() - 2..])
}

/// Rejects keys that cannot be right: empty or containing whitespace
fn validate_api_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("API key cannot be empty");
    }
    if key.chars().any(char::is_whitespace) {
        return Err("API key cannot contain whitespace");
    }
    Ok(())
}
