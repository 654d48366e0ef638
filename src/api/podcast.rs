use super::{ApiError, Episode, EpisodeRecord};
use crate::cache::keys;
use crate::cache_service::{
    get_json as cache_get_json, listing_expiry_hours, put_json as cache_put_json,
};
use dioxus::logger::tracing::{debug, warn};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
pub const LATEST_EPISODES_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct PodcastClient {
    base_url: String,
}

impl PodcastClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let trimmed = base_url.as_ref().trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            DEFAULT_API_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };
        Self { base_url }
    }

    #[cfg(test)]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn episode_url(&self, slug: &str) -> String {
        format!("{}/episodes/{}", self.base_url, urlencoding::encode(slug))
    }

    pub fn latest_episodes_url(&self, limit: usize) -> String {
        format!(
            "{}/episodes?_limit={}&_sort=published_at&_order=desc",
            self.base_url, limit
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!(url, "fetching");
        let response = HTTP_CLIENT.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "episode api returned an error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            warn!(url, error = %e, "could not decode episode api response");
            ApiError::from(e)
        })
    }

    /// Fetches one episode, bypassing the cache.
    pub async fn fetch_episode(&self, slug: &str) -> Result<Episode, ApiError> {
        let record: EpisodeRecord = self.get_json(&self.episode_url(slug)).await?;
        Episode::try_from(record)
    }

    /// Fetches the newest episodes, bypassing the cache.
    pub async fn fetch_latest_episodes(&self, limit: usize) -> Result<Vec<Episode>, ApiError> {
        let records: Vec<EpisodeRecord> = self.get_json(&self.latest_episodes_url(limit)).await?;
        records.into_iter().map(Episode::try_from).collect()
    }

    /// Episode detail page data. The first request waits on the network;
    /// afterwards the cached copy is served until it expires.
    pub async fn get_episode(&self, slug: &str) -> Result<Episode, ApiError> {
        let key = keys::episode(&self.base_url, slug);
        if let Some(episode) = cache_get_json::<Episode>(&key) {
            debug!(slug, "episode cache hit");
            return Ok(episode);
        }

        debug!(slug, "episode cache miss");
        let episode = self.fetch_episode(slug).await?;
        cache_put_json(key, &episode, None);
        Ok(episode)
    }

    pub async fn get_latest_episodes(&self, limit: usize) -> Result<Vec<Episode>, ApiError> {
        let key = keys::episode_list(&self.base_url, limit);
        if let Some(episodes) = cache_get_json::<Vec<Episode>>(&key) {
            debug!(count = episodes.len(), "episode list cache hit");
            return Ok(episodes);
        }

        let episodes = self.fetch_latest_episodes(limit).await?;
        cache_put_json(key, &episodes, Some(listing_expiry_hours()));
        Ok(episodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_base_url_and_falls_back_to_default() {
        assert_eq!(
            PodcastClient::new("https://api.example/ ").base_url(),
            "https://api.example"
        );
        assert_eq!(
            PodcastClient::new("https://api.example///").base_url(),
            "https://api.example"
        );
        assert_eq!(PodcastClient::new("  ").base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn builds_episode_urls() {
        let client = PodcastClient::new("https://api.example");
        assert_eq!(
            client.episode_url("como-virar-lider-desenvolvendo"),
            "https://api.example/episodes/como-virar-lider-desenvolvendo"
        );
        assert_eq!(
            client.episode_url("a b/c"),
            "https://api.example/episodes/a%20b%2Fc"
        );
        assert_eq!(
            client.latest_episodes_url(12),
            "https://api.example/episodes?_limit=12&_sort=published_at&_order=desc"
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn cached_episode_is_served_without_the_network() {
        // Nothing listens on the discard port, so a miss would fail.
        let client = PodcastClient::new("http://127.0.0.1:9");
        let cached = Episode {
            id: "read-through-episode".to_string(),
            title: "Do cache".to_string(),
            duration: 3981,
            duration_as_string: "01:06:21".to_string(),
            ..Episode::default()
        };
        let key = keys::episode(client.base_url(), &cached.id);
        assert!(cache_put_json(key, &cached, None));

        let episode = client.get_episode(&cached.id).await.expect("cache hit");
        assert_eq!(episode, cached);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn cached_listing_is_served_without_the_network() {
        let client = PodcastClient::new("http://127.0.0.1:9");
        let listing = vec![Episode {
            id: "read-through-listing".to_string(),
            ..Episode::default()
        }];
        let key = keys::episode_list(client.base_url(), 3);
        assert!(cache_put_json(key, &listing, Some(listing_expiry_hours())));

        let episodes = client.get_latest_episodes(3).await.expect("cache hit");
        assert_eq!(episodes, listing);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn cache_miss_reaches_the_network() {
        let client = PodcastClient::new("http://127.0.0.1:9");
        let result = client.get_episode("never-cached-episode").await;
        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
