use super::client_when_ready;
use crate::api::*;
use crate::components::{ApiBaseUrl, AppView, Icon, PlayerController, SettingsLoaded};
use dioxus::prelude::*;

/// Number of episodes highlighted as cards above the table.
const LATEST_RELEASES: usize = 2;

/// Splits the listing into highlighted releases and the rest.
fn split_latest(episodes: &[Episode]) -> (&[Episode], &[Episode]) {
    episodes.split_at(episodes.len().min(LATEST_RELEASES))
}

#[component]
pub fn HomeView() -> Element {
    let settings_loaded = use_context::<SettingsLoaded>().0;
    let api_base_url = use_context::<ApiBaseUrl>().0;

    // Waits for stored settings so the first request uses the saved backend.
    let episodes = use_resource(move || {
        let client = client_when_ready(settings_loaded(), api_base_url());
        async move {
            let Some(client) = client else {
                return None;
            };
            Some(client.get_latest_episodes(LATEST_EPISODES_LIMIT).await)
        }
    });

    rsx! {
        document::Title { "Home | Podcastr" }
        div { class: "homepage",
            {
                match &*episodes.read() {
                    None | Some(None) => rsx! {
                        div { class: "page-loading",
                            Icon { name: "loader".to_string(), class: "w-8 h-8".to_string() }
                        }
                    },
                    Some(Some(Err(err))) => rsx! {
                        p { class: "page-error", "Não foi possível carregar os episódios: {err}" }
                    },
                    Some(Some(Ok(list))) => {
                        let (latest, rest) = split_latest(list);
                        rsx! {
                            section { class: "latest-episodes",
                                h2 { "Últimos lançamentos" }
                                ul {
                                    for (index, episode) in latest.iter().enumerate() {
                                        LatestEpisodeCard {
                                            key: "{episode.id}",
                                            episode: episode.clone(),
                                            playlist: list.clone(),
                                            index: index,
                                        }
                                    }
                                }
                            }
                            section { class: "all-episodes",
                                h2 { "Todos episódios" }
                                table {
                                    thead {
                                        tr {
                                            th {}
                                            th { "Podcast" }
                                            th { "Integrantes" }
                                            th { class: "date-column", "Data" }
                                            th { "Duração" }
                                            th {}
                                        }
                                    }
                                    tbody {
                                        for (position, episode) in rest.iter().enumerate() {
                                            EpisodeRow {
                                                key: "{episode.id}",
                                                episode: episode.clone(),
                                                playlist: list.clone(),
                                                index: position + latest.len(),
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LatestEpisodeCard(episode: Episode, playlist: Vec<Episode>, index: usize) -> Element {
    let mut player = use_context::<PlayerController>();

    rsx! {
        li {
            img {
                src: "{episode.thumbnail}",
                alt: "{episode.title}",
                class: "episode-thumbnail",
                loading: "lazy",
            }
            div { class: "episode-details",
                Link {
                    to: AppView::EpisodeView {
                        slug: episode.id.clone(),
                    },
                    "{episode.title}"
                }
                p { "{episode.members}" }
                span { "{episode.published_at}" }
                span { "{episode.duration_as_string}" }
            }
            button {
                r#type: "button",
                aria_label: "Tocar episódio",
                onclick: move |_| player.play_list(playlist.clone(), index),
                Icon { name: "play".to_string(), class: "w-5 h-5".to_string() }
            }
        }
    }
}

#[component]
fn EpisodeRow(episode: Episode, playlist: Vec<Episode>, index: usize) -> Element {
    let mut player = use_context::<PlayerController>();

    rsx! {
        tr {
            td { style: "width: 72px",
                img {
                    src: "{episode.thumbnail}",
                    alt: "{episode.title}",
                    class: "episode-row-thumbnail",
                    loading: "lazy",
                }
            }
            td {
                Link {
                    to: AppView::EpisodeView {
                        slug: episode.id.clone(),
                    },
                    "{episode.title}"
                }
            }
            td { "{episode.members}" }
            td { class: "date-column", "{episode.published_at}" }
            td { "{episode.duration_as_string}" }
            td {
                button {
                    r#type: "button",
                    aria_label: "Tocar episódio",
                    onclick: move |_| player.play_list(playlist.clone(), index),
                    Icon { name: "play".to_string(), class: "w-4 h-4".to_string() }
                }
            }
        }
    }
}
