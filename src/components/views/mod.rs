mod episode;
mod home;
mod settings;

pub use episode::EpisodeView;
pub use home::HomeView;
pub use settings::SettingsView;

use crate::api::PodcastClient;

/// Client for view data, or `None` while stored settings are still loading.
fn client_when_ready(settings_loaded: bool, base_url: String) -> Option<PodcastClient> {
    settings_loaded.then(|| PodcastClient::new(base_url))
}
