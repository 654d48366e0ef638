use crate::cache::{CacheEntry, SimpleCache};
use crate::db::AppSettings;
use chrono::Duration;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;

pub const DEFAULT_EXPIRY_HOURS: u32 = 24;
const MAX_EXPIRY_HOURS: u32 = 24 * 30;

static CACHE: Lazy<Mutex<SimpleCache>> = Lazy::new(|| {
    let loaded = SimpleCache::load_from_storage().unwrap_or_default();
    Mutex::new(loaded)
});
static EXPIRY_HOURS: Lazy<Mutex<u32>> = Lazy::new(|| Mutex::new(DEFAULT_EXPIRY_HOURS));

pub fn clamp_expiry_hours(hours: u32) -> u32 {
    hours.clamp(1, MAX_EXPIRY_HOURS)
}

fn effective_expiry_hours(override_hours: Option<u32>) -> u32 {
    let configured = *EXPIRY_HOURS.lock().unwrap_or_else(|e| e.into_inner());
    clamp_expiry_hours(override_hours.unwrap_or(configured))
}

/// The episode listing refreshes three times per detail-page window.
pub fn listing_expiry_hours() -> u32 {
    listing_expiry_for(effective_expiry_hours(None))
}

fn listing_expiry_for(page_hours: u32) -> u32 {
    (clamp_expiry_hours(page_hours) / 3).max(1)
}

pub fn apply_settings(settings: &AppSettings) {
    let mut hours = EXPIRY_HOURS.lock().unwrap_or_else(|e| e.into_inner());
    *hours = clamp_expiry_hours(settings.cache_expiry_hours);
}

pub fn get_json<T>(key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    let cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    let bytes = cache.get(key)?.data.clone();
    drop(cache);
    serde_json::from_slice::<T>(&bytes).ok()
}

pub fn put_json<T>(key: impl Into<String>, value: &T, expiry_hours: Option<u32>) -> bool
where
    T: Serialize,
{
    let Ok(bytes) = serde_json::to_vec(value) else {
        return false;
    };
    let expiry = Duration::hours(effective_expiry_hours(expiry_hours) as i64);

    let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.put(key.into(), CacheEntry::new(bytes, expiry));
    cache.save_to_storage();
    true
}

pub fn clear_all() {
    let mut cache = CACHE.lock().unwrap_or_else(|e| e.into_inner());
    cache.clear();
    cache.save_to_storage();
}
