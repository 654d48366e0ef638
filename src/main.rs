use dioxus::prelude::*;

mod api;
mod cache;
mod cache_service;
mod components;
mod db;
mod player_state;
mod utils;

use components::AppView;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#8257e5" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Podcastr" }

        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
