use crate::cache_service;
use crate::components::{Icon, SettingsLoaded};
use crate::db::AppSettings;
use dioxus::prelude::*;

/// Editable copy of the stored settings.
#[derive(Debug, Clone, PartialEq)]
struct SettingsForm {
    api_base_url: String,
    volume: f64,
    cache_expiry_hours: u32,
}

impl From<&AppSettings> for SettingsForm {
    fn from(settings: &AppSettings) -> Self {
        Self {
            api_base_url: settings.api_base_url.clone(),
            volume: settings.volume,
            cache_expiry_hours: settings.cache_expiry_hours,
        }
    }
}

impl SettingsForm {
    fn to_settings(&self) -> AppSettings {
        AppSettings {
            api_base_url: self.api_base_url.clone(),
            volume: self.volume,
            cache_expiry_hours: self.cache_expiry_hours,
        }
        .normalized()
    }
}

#[component]
pub fn SettingsView() -> Element {
    let mut app_settings = use_context::<Signal<AppSettings>>();
    let settings_loaded = use_context::<SettingsLoaded>().0;

    let mut form = use_signal(|| SettingsForm::from(&*app_settings.peek()));
    let mut saved = use_signal(|| false);
    let mut cache_cleared = use_signal(|| false);

    // Follow stored settings, including the initial load.
    use_effect(move || {
        let settings = app_settings();
        form.set(SettingsForm::from(&settings));
    });

    let on_save = move |_| {
        let settings = form.read().to_settings();
        app_settings.set(settings);
        saved.set(true);
    };

    let on_clear_cache = move |_| {
        cache_service::clear_all();
        cache_cleared.set(true);
    };

    if !settings_loaded() {
        return rsx! {
            div { class: "page-loading",
                Icon { name: "loader".to_string(), class: "w-8 h-8".to_string() }
            }
        };
    }

    let current = form();

    rsx! {
        document::Title { "Configurações | Podcastr" }
        div { class: "settings",
            h2 { "Configurações" }

            label { class: "settings-field",
                span { "Endereço da API" }
                input {
                    r#type: "url",
                    value: "{current.api_base_url}",
                    oninput: move |e: Event<FormData>| {
                        form.write().api_base_url = e.value();
                        saved.set(false);
                    },
                }
            }

            label { class: "settings-field",
                span { "Volume" }
                input {
                    r#type: "range",
                    min: "0",
                    max: "100",
                    value: (current.volume * 100.0).round() as i32,
                    oninput: move |e: Event<FormData>| {
                        if let Ok(val) = e.value().parse::<f64>() {
                            form.write().volume = (val / 100.0).clamp(0.0, 1.0);
                            saved.set(false);
                        }
                    },
                }
            }

            label { class: "settings-field",
                span { "Atualizar episódios a cada (horas)" }
                input {
                    r#type: "number",
                    min: "1",
                    max: "720",
                    value: "{current.cache_expiry_hours}",
                    oninput: move |e: Event<FormData>| {
                        if let Ok(hours) = e.value().parse::<u32>() {
                            form.write().cache_expiry_hours = hours;
                            saved.set(false);
                        }
                    },
                }
            }

            div { class: "settings-actions",
                button { r#type: "button", onclick: on_save, "Salvar" }
                button { r#type: "button", onclick: on_clear_cache, "Limpar cache" }
            }

            if saved() {
                p { class: "settings-status", "Configurações salvas." }
            }
            if cache_cleared() {
                p { class: "settings-status", "Cache limpo." }
            }
        }
    }
}
