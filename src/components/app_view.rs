//! Routes of the application.

use crate::components::views::{EpisodeView, HomeView, SettingsView};
use crate::components::AppShell;
use dioxus::prelude::*;

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum AppView {
    #[layout(AppShell)]
        #[route("/")]
        HomeView {},
        #[route("/episodes/:slug")]
        EpisodeView { slug: String },
        #[route("/settings")]
        SettingsView {},
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::HomeView {} => "Início",
        AppView::EpisodeView { .. } => "Episódio",
        AppView::SettingsView {} => "Configurações",
    }
}
