//! The components module contains all shared components for our app.

mod app;
mod app_view;
pub mod audio_manager;
mod icons;
mod player;
mod player_controller;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::{seek_to, AudioController};
pub use icons::*;
pub use player::*;
pub use player_controller::*;
