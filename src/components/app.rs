use crate::cache_service;
use crate::components::{
    view_label, ApiBaseUrl, AppView, AudioController, Icon, Player, PlayerController,
    ProgressSignal, SettingsLoaded, VolumeSignal,
};
use crate::db::{initialize_database, load_settings, save_settings, AppSettings};
use crate::player_state::PlayerState;
use crate::utils::format_header_date;
use chrono::Utc;
use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;

#[component]
pub fn AppShell() -> Element {
    let player_state = use_signal(PlayerState::default);
    let progress = use_signal(Default::default);
    let mut volume = use_signal(|| 0.8f64);
    let mut app_settings = use_signal(AppSettings::default);
    let mut settings_loaded = use_signal(|| false);
    let view = use_route::<AppView>();
    let api_base_url = use_memo(move || app_settings.read().runtime_api_base_url());

    // Provide state via context
    use_context_provider(|| PlayerController::new(player_state));
    use_context_provider(|| ProgressSignal(progress));
    use_context_provider(|| VolumeSignal(volume));
    use_context_provider(|| app_settings);
    use_context_provider(|| SettingsLoaded(settings_loaded));
    use_context_provider(|| ApiBaseUrl(api_base_url));

    // Load saved settings on mount
    use_effect(move || {
        spawn(async move {
            if let Err(err) = initialize_database().await {
                warn!(error = %err, "failed to initialize settings storage");
            }

            let settings = match load_settings().await {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(error = %err, "failed to load settings, using defaults");
                    AppSettings::default()
                }
            }
            .normalized();

            info!(api = %settings.runtime_api_base_url(), "settings loaded");
            cache_service::apply_settings(&settings);
            volume.set(settings.volume);
            app_settings.set(settings);
            settings_loaded.set(true);
        });
    });

    // Persist settings when they change
    use_effect(move || {
        let settings = app_settings();
        if !settings_loaded() {
            return;
        }
        cache_service::apply_settings(&settings);
        volume.set(settings.volume);
        spawn(async move {
            if let Err(err) = save_settings(settings).await {
                warn!(error = %err, "failed to save settings");
            }
        });
    });

    let today = format_header_date(Utc::now());

    rsx! {
        div { class: "app-container",
            main { class: "app-main",
                header { class: "app-header",
                    Link { to: AppView::HomeView {}, class: "app-logo",
                        Icon { name: "headphones".to_string(), class: "w-6 h-6".to_string() }
                        span { "Podcastr" }
                    }
                    p { class: "app-tagline", "O melhor para você ouvir, sempre" }
                    span { class: "app-date", "{today}" }
                    span { class: "app-view-label", "{view_label(&view)}" }
                    Link {
                        to: AppView::SettingsView {},
                        class: "app-settings-link",
                        Icon { name: "settings".to_string(), class: "w-5 h-5".to_string() }
                    }
                }

                div { class: "page-shell", Outlet::<AppView> {} }
            }

            Player {}
        }

        // Audio controller - manages playback separately from UI
        AudioController {}
    }
}
