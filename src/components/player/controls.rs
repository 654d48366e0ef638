use crate::components::{Icon, PlayerController};
use dioxus::prelude::*;

fn toggle_class(active: bool) -> &'static str {
    if active {
        "player-button is-active"
    } else {
        "player-button"
    }
}

/// Shuffle needs more than one episode to mean anything.
#[component]
pub(super) fn ShuffleButton() -> Element {
    let mut player = use_context::<PlayerController>();
    let state = player.state();
    let (has_episode, list_len, shuffling) = {
        let state = state.read();
        (
            state.current_episode().is_some(),
            state.episode_list().len(),
            state.is_shuffling(),
        )
    };

    rsx! {
        button {
            id: "shuffle-btn",
            r#type: "button",
            disabled: !has_episode || list_len == 1,
            class: toggle_class(shuffling),
            aria_label: "Aleatório",
            onclick: move |_| player.toggle_shuffle(),
            Icon { name: "shuffle".to_string(), class: "w-5 h-5".to_string() }
        }
    }
}

#[component]
pub(super) fn PrevButton() -> Element {
    let mut player = use_context::<PlayerController>();
    let state = player.state();
    let (has_episode, has_previous) = {
        let state = state.read();
        (state.current_episode().is_some(), state.has_previous())
    };

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            disabled: !has_episode || !has_previous,
            class: "player-button",
            aria_label: "Tocar anterior",
            onclick: move |_| player.play_previous(),
            Icon { name: "prev".to_string(), class: "w-5 h-5".to_string() }
        }
    }
}

/// Play/Pause button - only flips the flag; the audio controller applies it
#[component]
pub(super) fn PlayPauseButton() -> Element {
    let mut player = use_context::<PlayerController>();
    let state = player.state();
    let (has_episode, playing) = {
        let state = state.read();
        (state.current_episode().is_some(), state.is_playing())
    };

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            disabled: !has_episode,
            class: "player-button play-button",
            aria_label: "Tocar/Pausar",
            onclick: move |_| player.toggle_play(),
            if playing {
                Icon { name: "pause".to_string(), class: "w-6 h-6".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "w-6 h-6".to_string() }
            }
        }
    }
}

#[component]
pub(super) fn NextButton() -> Element {
    let mut player = use_context::<PlayerController>();
    let state = player.state();
    let (has_episode, has_next) = {
        let state = state.read();
        (state.current_episode().is_some(), state.has_next())
    };

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            disabled: !has_episode || !has_next,
            class: "player-button",
            aria_label: "Tocar próxima",
            onclick: move |_| player.play_next(),
            Icon { name: "next".to_string(), class: "w-5 h-5".to_string() }
        }
    }
}

#[component]
pub(super) fn LoopButton() -> Element {
    let mut player = use_context::<PlayerController>();
    let state = player.state();
    let (has_episode, looping) = {
        let state = state.read();
        (state.current_episode().is_some(), state.is_looping())
    };

    rsx! {
        button {
            id: "loop-btn",
            r#type: "button",
            disabled: !has_episode,
            class: toggle_class(looping),
            aria_label: "Repetir",
            onclick: move |_| player.toggle_loop(),
            Icon { name: "repeat".to_string(), class: "w-5 h-5".to_string() }
        }
    }
}
