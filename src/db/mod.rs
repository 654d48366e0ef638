use crate::api::DEFAULT_API_BASE_URL;
use crate::cache_service::{clamp_expiry_hours, DEFAULT_EXPIRY_HOURS};
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

/// Error type for settings persistence
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[cfg(target_arch = "wasm32")]
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("settings are not valid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data directory available")]
    NoDataDir,
}

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "podcastr.app_settings";

#[cfg(not(target_arch = "wasm32"))]
pub const API_URL_ENV: &str = "PODCASTR_API_URL";

/// App settings stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_volume")]
    pub volume: f64,
    #[serde(default = "default_cache_expiry_hours")]
    pub cache_expiry_hours: u32,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_volume() -> f64 {
    0.8
}

fn default_cache_expiry_hours() -> u32 {
    DEFAULT_EXPIRY_HOURS
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            volume: default_volume(),
            cache_expiry_hours: default_cache_expiry_hours(),
        }
    }
}

pub fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return default_volume();
    }
    // Older builds stored volume as a percentage.
    let mut passes = 0;
    while value > 1.0 && passes < 4 {
        value /= 100.0;
        passes += 1;
    }
    value.clamp(0.0, 1.0)
}

impl AppSettings {
    pub fn normalized(mut self) -> Self {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        if self.api_base_url.is_empty() {
            self.api_base_url = default_api_base_url();
        }
        self.volume = normalize_volume(self.volume);
        self.cache_expiry_hours = clamp_expiry_hours(self.cache_expiry_hours);
        self
    }

    /// Backend address used for requests. Overrides never reach storage.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn runtime_api_base_url(&self) -> String {
        self.resolve_api_base_url(std::env::var(API_URL_ENV).ok())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn runtime_api_base_url(&self) -> String {
        self.resolve_api_base_url(None)
    }

    pub fn resolve_api_base_url(&self, api_url: Option<String>) -> String {
        self.clone().with_api_url_override(api_url).api_base_url
    }

    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.api_base_url = url;
        }
        self.normalized()
    }
}

// Native settings live in a small SQLite key/value table.

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    let conn = get_db_connection()?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), DbError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    let conn = get_db_connection()?;
    let settings_json = serde_json::to_string(&settings)?;
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('app_settings', ?1)",
        [&settings_json],
    )?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: AppSettings) -> Result<(), DbError> {
    LocalStorage::set(SETTINGS_KEY, settings)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    use rusqlite::OptionalExtension;

    let conn = get_db_connection()?;
    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key = 'app_settings'",
            [],
            |row: &rusqlite::Row| row.get(0),
        )
        .optional()?;

    match stored {
        Some(json) => Ok(serde_json::from_str::<AppSettings>(&json)?.normalized()),
        None => Ok(AppSettings::default()),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<AppSettings, DbError> {
    match LocalStorage::get::<AppSettings>(SETTINGS_KEY) {
        Ok(settings) => Ok(settings.normalized()),
        Err(StorageError::KeyNotFound(_)) => Ok(AppSettings::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    let data_dir = dirs::data_dir().ok_or(DbError::NoDataDir)?.join("podcastr");
    std::fs::create_dir_all(&data_dir).map_err(|_| DbError::NoDataDir)?;
    Ok(rusqlite::Connection::open(data_dir.join("podcastr.db"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").expect("empty object");
        assert_eq!(settings, AppSettings::default());

        let settings: AppSettings =
            serde_json::from_str(r#"{"api_base_url":"https://api.example"}"#).expect("partial");
        assert_eq!(settings.api_base_url, "https://api.example");
        assert_eq!(settings.cache_expiry_hours, 24);
    }

    #[test]
    fn normalizes_stored_values() {
        let settings = AppSettings {
            api_base_url: " https://api.example/ ".to_string(),
            volume: 80.0,
            cache_expiry_hours: 0,
        }
        .normalized();
        assert_eq!(settings.api_base_url, "https://api.example");
        assert!((settings.volume - 0.8).abs() < f64::EPSILON);
        assert_eq!(settings.cache_expiry_hours, 1);

        assert_eq!(normalize_volume(f64::NAN), 0.8);
        assert_eq!(normalize_volume(-1.0), 0.0);
    }

    #[test]
    fn api_url_override_ignores_blank_values() {
        let base = AppSettings::default();
        assert_eq!(
            base.clone()
                .with_api_url_override(Some("http://10.0.0.2:3333/".to_string()))
                .api_base_url,
            "http://10.0.0.2:3333"
        );
        assert_eq!(
            base.clone().with_api_url_override(Some("  ".to_string())).api_base_url,
            DEFAULT_API_BASE_URL
        );
        assert_eq!(base.with_api_url_override(None).api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn resolved_api_url_leaves_stored_settings_alone() {
        let stored = AppSettings {
            api_base_url: "https://saved.example".to_string(),
            ..AppSettings::default()
        };
        assert_eq!(
            stored.resolve_api_base_url(Some("http://10.0.0.2:3333".to_string())),
            "http://10.0.0.2:3333"
        );
        assert_eq!(stored.resolve_api_base_url(None), "https://saved.example");
        assert_eq!(stored.api_base_url, "https://saved.example");
    }
}
