//! Player state <-> audio element reconciliation, independent of the target.

use crate::player_state::{IndexPicker, PlayerState};
use dioxus::logger::tracing::debug;
use serde::Serialize;

/// Notifications emitted by the audio element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    PlayStarted,
    PauseStarted,
    MetadataLoaded,
    TimeElapsed(f64),
    Ended,
}

impl SurfaceEvent {
    /// Maps a DOM media event name. `timeupdate` carries the element's
    /// current time.
    pub fn from_dom(name: &str, current_time: f64) -> Option<Self> {
        match name {
            "play" => Some(Self::PlayStarted),
            "pause" => Some(Self::PauseStarted),
            "loadedmetadata" => Some(Self::MetadataLoaded),
            "timeupdate" => Some(Self::TimeElapsed(current_time)),
            "ended" => Some(Self::Ended),
            _ => None,
        }
    }
}

/// Instructions for the audio element. Serialized as the desktop bridge
/// command format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceCommand {
    Load { src: String },
    Play,
    Pause,
    SetLoop { enabled: bool },
    Seek { position: f64 },
    Volume { value: f64 },
    Clear,
}

/// Elapsed time of the current source, in whole seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressTracker {
    elapsed: u32,
}

impl ProgressTracker {
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    pub fn on_time_elapsed(&mut self, seconds: f64) {
        self.elapsed = whole_seconds(seconds);
    }

    /// Optimistic update for a user seek; returns the command to send.
    pub fn seek(&mut self, amount: u32) -> SurfaceCommand {
        self.elapsed = amount;
        SurfaceCommand::Seek {
            position: amount as f64,
        }
    }
}

fn whole_seconds(seconds: f64) -> u32 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.floor().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Folds one surface event into the player state and progress.
/// Returns any commands the surface must run in response.
pub fn apply_surface_event<P: IndexPicker>(
    state: &mut PlayerState<P>,
    progress: &mut ProgressTracker,
    event: SurfaceEvent,
) -> Vec<SurfaceCommand> {
    match event {
        SurfaceEvent::PlayStarted => {
            state.set_playing_state(true);
            Vec::new()
        }
        SurfaceEvent::PauseStarted => {
            state.set_playing_state(false);
            Vec::new()
        }
        SurfaceEvent::MetadataLoaded => {
            progress.reset();
            vec![SurfaceCommand::Seek { position: 0.0 }]
        }
        SurfaceEvent::TimeElapsed(seconds) => {
            progress.on_time_elapsed(seconds);
            Vec::new()
        }
        SurfaceEvent::Ended => {
            if state.has_next() {
                debug!("episode ended, advancing");
                state.play_next();
            } else {
                debug!("episode ended with nothing queued, clearing player");
                state.clear_player_state();
            }
            Vec::new()
        }
    }
}

/// Remembers what the surface was last told so only changes are sent.
#[derive(Debug, Clone, Default)]
pub struct SurfaceSync {
    src: Option<String>,
    playing: Option<bool>,
    looping: Option<bool>,
}

impl SurfaceSync {
    pub fn diff<P: IndexPicker>(&mut self, state: &PlayerState<P>) -> Vec<SurfaceCommand> {
        let mut commands = Vec::new();
        let src = state.current_episode().map(|episode| episode.url.clone());

        if self.looping != Some(state.is_looping()) {
            self.looping = Some(state.is_looping());
            commands.push(SurfaceCommand::SetLoop {
                enabled: state.is_looping(),
            });
        }

        if src != self.src {
            self.src = src.clone();
            self.playing = Some(state.is_playing());
            match src {
                Some(src) => {
                    debug!(%src, "loading episode audio");
                    commands.push(SurfaceCommand::Load { src });
                    // New sources always autoplay; the play event then
                    // reconciles `is_playing`.
                    commands.push(SurfaceCommand::Play);
                }
                None => commands.push(SurfaceCommand::Clear),
            }
            return commands;
        }

        if self.src.is_some() && self.playing != Some(state.is_playing()) {
            self.playing = Some(state.is_playing());
            commands.push(if state.is_playing() {
                SurfaceCommand::Play
            } else {
                SurfaceCommand::Pause
            });
        }

        commands
    }
}
