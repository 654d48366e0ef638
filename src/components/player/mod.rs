use crate::components::{seek_to, Icon, PlayerController, ProgressSignal};
use crate::player_state::{IndexPicker, PlayerState};
use crate::utils::convert_duration_to_time_string;
use dioxus::prelude::*;

mod controls;

use controls::{LoopButton, NextButton, PlayPauseButton, PrevButton, ShuffleButton};

/// "2 de 12" style label; hidden for single-episode playlists.
fn queue_position<P: IndexPicker>(state: &PlayerState<P>) -> Option<String> {
    let total = state.episode_list().len();
    (total > 1).then(|| format!("{} de {}", state.current_episode_index() + 1, total))
}

#[component]
pub fn Player() -> Element {
    let player = use_context::<PlayerController>();
    let progress = use_context::<ProgressSignal>().0;

    let episode = player.current_episode();
    let position_label = queue_position(&*player.state().read());
    let elapsed = progress().elapsed();
    let duration = episode.as_ref().map(|e| e.duration).unwrap_or(0);

    let on_seek = move |e: Event<FormData>| {
        if let Ok(amount) = e.value().parse::<f64>() {
            let amount = amount.clamp(0.0, duration as f64).floor() as u32;
            seek_to(progress, amount);
        }
    };

    rsx! {
        div { class: "player-container",
            header { class: "player-header",
                Icon { name: "headphones".to_string(), class: "w-8 h-8".to_string() }
                strong { "Tocando agora" }
            }

            {
                match &episode {
                    Some(episode) => rsx! {
                        div { class: "current-episode",
                            img {
                                src: "{episode.thumbnail}",
                                alt: "{episode.title}",
                                class: "current-episode-thumbnail",
                            }
                            strong { "{episode.title}" }
                            span { "{episode.members}" }
                            if let Some(position) = &position_label {
                                small { class: "queue-position", "{position}" }
                            }
                        }
                    },
                    None => rsx! {
                        div { class: "empty-player",
                            strong { "Selecione um podcast para ouvir" }
                        }
                    },
                }
            }

            footer { class: if episode.is_none() { "player-footer empty" } else { "player-footer" },
                div { class: "player-progress",
                    span { "{convert_duration_to_time_string(elapsed)}" }
                    div { class: "player-slider",
                        if episode.is_some() {
                            input {
                                r#type: "range",
                                min: "0",
                                max: "{duration}",
                                value: "{elapsed}",
                                class: "player-range",
                                oninput: on_seek,
                            }
                        } else {
                            div { class: "empty-slider" }
                        }
                    }
                    span { "{convert_duration_to_time_string(duration)}" }
                }

                div { class: "player-buttons",
                    ShuffleButton {}
                    PrevButton {}
                    PlayPauseButton {}
                    NextButton {}
                    LoopButton {}
                }
            }
        }
    }
}
