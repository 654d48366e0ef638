//! Simple cache system for Podcastr
//! Keeps fetched episode pages around until their revalidation window passes

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cache entry with expiration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Vec<u8>,
    pub stored_at: DateTime<Utc>,
    pub expiry_secs: i64,
}

impl CacheEntry {
    pub fn new(data: Vec<u8>, expiry: Duration) -> Self {
        Self::stored_at(data, expiry, Utc::now())
    }

    pub fn stored_at(data: Vec<u8>, expiry: Duration, stored_at: DateTime<Utc>) -> Self {
        Self {
            data,
            stored_at,
            expiry_secs: expiry.num_seconds(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.stored_at).num_seconds() >= self.expiry_secs
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len() + std::mem::size_of::<DateTime<Utc>>() + std::mem::size_of::<i64>()
    }
}

/// Size-bounded cache; evicts the oldest entries first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleCache {
    entries: HashMap<String, CacheEntry>,
    max_size_bytes: usize,
    current_size_bytes: usize,
}

impl SimpleCache {
    pub fn new(max_size_mb: u32) -> Self {
        Self {
            entries: HashMap::new(),
            max_size_bytes: (max_size_mb as usize) * 1024 * 1024,
            current_size_bytes: 0,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry> {
        self.get_at(key, Utc::now())
    }

    pub fn get_at(&self, key: &str, now: DateTime<Utc>) -> Option<&CacheEntry> {
        self.entries.get(key).filter(|entry| !entry.is_expired_at(now))
    }

    pub fn put(&mut self, key: String, entry: CacheEntry) {
        self.clean_expired_at(Utc::now());

        if let Some(old_entry) = self.entries.remove(&key) {
            self.current_size_bytes = self.current_size_bytes.saturating_sub(old_entry.size_bytes());
        }

        let entry_size = entry.size_bytes();
        while self.current_size_bytes + entry_size > self.max_size_bytes && !self.entries.is_empty() {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.stored_at)
                .map(|(key, _)| key.clone());
            let Some(oldest) = oldest else {
                break;
            };
            self.remove(&oldest);
        }

        self.entries.insert(key, entry);
        self.current_size_bytes += entry_size;
    }

    pub fn remove(&mut self, key: &str) -> bool {
        if let Some(entry) = self.entries.remove(key) {
            self.current_size_bytes = self.current_size_bytes.saturating_sub(entry.size_bytes());
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.current_size_bytes = 0;
    }

    pub fn clean_expired_at(&mut self, now: DateTime<Utc>) {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in expired_keys {
            self.remove(&key);
        }
    }
}

#[cfg(test)]
impl SimpleCache {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn size_bytes(&self) -> usize {
        self.current_size_bytes
    }
}

impl Default for SimpleCache {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Cache key generation utilities
pub mod keys {
    use base64::{engine::general_purpose, Engine as _};

    fn scoped(kind: &str, base_url: &str, params: &str) -> String {
        let combined = format!("{base_url}:{params}");
        format!("{kind}:{}", general_purpose::URL_SAFE_NO_PAD.encode(combined))
    }

    pub fn episode(base_url: &str, slug: &str) -> String {
        scoped("episode", base_url, slug)
    }

    pub fn episode_list(base_url: &str, limit: usize) -> String {
        scoped("episodes", base_url, &limit.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_impl {
    use super::*;
    use web_sys::{window, Storage};

    const STORAGE_KEY: &str = "podcastr_cache";

    impl SimpleCache {
        pub fn load_from_storage() -> Option<Self> {
            let data = Self::get_local_storage()?.get_item(STORAGE_KEY).ok()??;
            serde_json::from_str::<SimpleCache>(&data).ok()
        }

        pub fn save_to_storage(&self) {
            if let (Ok(data), Some(storage)) = (serde_json::to_string(self), Self::get_local_storage()) {
                let _ = storage.set_item(STORAGE_KEY, &data);
            }
        }

        fn get_local_storage() -> Option<Storage> {
            window()?.local_storage().ok()?
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native_impl {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    impl SimpleCache {
        pub fn load_from_storage() -> Option<Self> {
            Self::get_cache_file_path()
                .and_then(|path| fs::read_to_string(path).ok())
                .and_then(|data| serde_json::from_str::<SimpleCache>(&data).ok())
        }

        pub fn save_to_storage(&self) {
            if let Some(path) = Self::get_cache_file_path() {
                if let Ok(data) = serde_json::to_string(self) {
                    let _ = fs::write(path, data);
                }
            }
        }

        fn get_cache_file_path() -> Option<PathBuf> {
            let dir = dirs::cache_dir()?.join("podcastr");
            fs::create_dir_all(&dir).ok()?;
            Some(dir.join("cache.json"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hours: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap() + Duration::hours(hours)
    }

    #[test]
    fn entry_expires_after_window() {
        let entry = CacheEntry::stored_at(vec![1, 2, 3], Duration::hours(24), at(0));
        assert!(!entry.is_expired_at(at(23)));
        assert!(entry.is_expired_at(at(24)));
        assert!(entry.is_expired_at(at(48)));
    }

    #[test]
    fn get_at_hides_expired_entries() {
        let mut cache = SimpleCache::new(1);
        cache.put(
            "k".to_string(),
            CacheEntry::stored_at(b"page".to_vec(), Duration::hours(24), Utc::now()),
        );
        let now = Utc::now();
        assert!(cache.get_at("k", now).is_some());
        assert!(cache.get_at("k", now + Duration::hours(25)).is_none());
    }

    #[test]
    fn replacing_a_key_keeps_size_accounting() {
        let mut cache = SimpleCache::new(1);
        cache.put("k".to_string(), CacheEntry::new(vec![0; 100], Duration::hours(1)));
        let one = cache.size_bytes();
        cache.put("k".to_string(), CacheEntry::new(vec![0; 100], Duration::hours(1)));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.size_bytes(), one);
        assert!(cache.remove("k"));
        assert_eq!(cache.size_bytes(), 0);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut cache = SimpleCache::new(1);
        let half = 600 * 1024;
        let now = Utc::now();
        cache.put(
            "old".to_string(),
            CacheEntry::stored_at(vec![0; half], Duration::hours(1), now - Duration::minutes(5)),
        );
        cache.put(
            "new".to_string(),
            CacheEntry::stored_at(vec![0; half], Duration::hours(1), now),
        );
        assert!(cache.get("old").is_none());
        assert!(cache.get("new").is_some());
    }

    #[test]
    fn keys_are_scoped_by_server() {
        assert_ne!(
            keys::episode("http://a", "slug"),
            keys::episode("http://b", "slug")
        );
        assert!(keys::episode("http://a", "slug").starts_with("episode:"));
        assert!(keys::episode_list("http://a", 12).starts_with("episodes:"));
    }
}
