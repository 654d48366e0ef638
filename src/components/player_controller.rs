use crate::api::Episode;
use crate::components::audio_manager::ProgressTracker;
use crate::player_state::PlayerState;
use dioxus::prelude::*;

/// Handle to the shared player state, provided once by the app shell.
#[derive(Clone, Copy, PartialEq)]
pub struct PlayerController {
    state: Signal<PlayerState>,
}

impl PlayerController {
    pub fn new(state: Signal<PlayerState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> Signal<PlayerState> {
        self.state
    }

    pub fn current_episode(&self) -> Option<Episode> {
        self.state.read().current_episode().cloned()
    }

    pub fn play(&mut self, episode: Episode) {
        self.state.with_mut(|state| state.play(episode));
    }

    pub fn play_list(&mut self, list: Vec<Episode>, index: usize) {
        self.state.with_mut(|state| state.play_list(list, index));
    }

    pub fn toggle_play(&mut self) {
        self.state.with_mut(|state| state.toggle_play());
    }

    pub fn play_next(&mut self) {
        self.state.with_mut(|state| state.play_next());
    }

    pub fn play_previous(&mut self) {
        self.state.with_mut(|state| state.play_previous());
    }

    pub fn toggle_loop(&mut self) {
        self.state.with_mut(|state| state.toggle_loop());
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.with_mut(|state| state.toggle_shuffle());
    }
}

#[derive(Clone, Copy)]
pub struct ProgressSignal(pub Signal<ProgressTracker>);

#[derive(Clone, Copy)]
pub struct VolumeSignal(pub Signal<f64>);

/// Set once stored settings have been read.
#[derive(Clone, Copy)]
pub struct SettingsLoaded(pub Signal<bool>);

/// Backend address for requests, including runtime overrides.
#[derive(Clone, Copy)]
pub struct ApiBaseUrl(pub Memo<String>);
