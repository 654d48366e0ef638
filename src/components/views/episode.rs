use super::client_when_ready;
use crate::components::{ApiBaseUrl, AppView, Icon, PlayerController, SettingsLoaded};
use dioxus::prelude::*;

#[component]
pub fn EpisodeView(slug: String) -> Element {
    let settings_loaded = use_context::<SettingsLoaded>().0;
    let api_base_url = use_context::<ApiBaseUrl>().0;
    let mut player = use_context::<PlayerController>();

    let episode = use_resource(use_reactive((&slug,), move |(slug,)| {
        let client = client_when_ready(settings_loaded(), api_base_url());
        async move {
            let Some(client) = client else {
                return None;
            };
            Some(client.get_episode(&slug).await)
        }
    }));

    let data = episode.read();
    match &*data {
        None | Some(None) => rsx! {
            div { class: "page-loading",
                Icon { name: "loader".to_string(), class: "w-8 h-8".to_string() }
            }
        },
        Some(Some(Err(err))) => rsx! {
            div { class: "episode",
                Link { to: AppView::HomeView {}, class: "back-link",
                    Icon { name: "arrow-left".to_string(), class: "w-5 h-5".to_string() }
                    "Voltar"
                }
                p { class: "page-error", "Não foi possível carregar o episódio: {err}" }
            }
        },
        Some(Some(Ok(episode))) => {
            let to_play = episode.clone();
            rsx! {
                document::Title { "{episode.title} | Podcastr" }
                div { class: "episode",
                    div { class: "thumbnail-container",
                        Link { to: AppView::HomeView {},
                            button { r#type: "button", aria_label: "Voltar",
                                Icon { name: "arrow-left".to_string(), class: "w-5 h-5".to_string() }
                            }
                        }
                        img {
                            src: "{episode.thumbnail}",
                            alt: "{episode.title}",
                            class: "episode-cover",
                        }
                        button {
                            r#type: "button",
                            aria_label: "Tocar episódio",
                            onclick: move |_| player.play(to_play.clone()),
                            Icon { name: "play".to_string(), class: "w-6 h-6".to_string() }
                        }
                    }

                    header {
                        h1 { "{episode.title}" }
                        span { "{episode.members}" }
                        span {
                            Icon { name: "calendar".to_string(), class: "w-4 h-4".to_string() }
                            "{episode.published_at}"
                        }
                        span { "{episode.duration_as_string}" }
                    }

                    div {
                        class: "description",
                        dangerous_inner_html: "{episode.description}",
                    }
                }
            }
        }
    }
}
