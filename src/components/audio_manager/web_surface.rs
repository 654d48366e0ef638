// Browser audio element: created once and reused across pages.
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

#[cfg(target_arch = "wasm32")]
const AUDIO_ELEMENT_ID: &str = "podcastr-audio";

#[cfg(target_arch = "wasm32")]
const SURFACE_EVENTS: [&str; 5] = ["play", "pause", "loadedmetadata", "timeupdate", "ended"];

/// Initialize the global audio element once.
#[cfg(target_arch = "wasm32")]
fn get_or_create_audio_element() -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(AUDIO_ELEMENT_ID) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(AUDIO_ELEMENT_ID);
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

#[cfg(target_arch = "wasm32")]
fn setup_surface(state: Signal<PlayerState>, progress: Signal<ProgressTracker>) {
    let Some(audio) = get_or_create_audio_element() else {
        dioxus::logger::tracing::warn!("could not create audio element");
        return;
    };

    let runtime = Runtime::current();
    for name in SURFACE_EVENTS {
        let runtime = runtime.clone();
        let element = audio.clone();
        let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let _guard = RuntimeGuard::new(runtime.clone());
            if let Some(event) = SurfaceEvent::from_dom(name, element.current_time()) {
                handle_surface_event(state, progress, event);
            }
        }) as Box<dyn FnMut(_)>);
        let _ = audio.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        callback.forget();
    }
}

#[cfg(target_arch = "wasm32")]
fn run_command(command: SurfaceCommand) {
    let Some(audio) = get_or_create_audio_element() else {
        return;
    };

    match command {
        SurfaceCommand::Load { src } => audio.set_src(&src),
        // Autoplay can be refused; the missing play event keeps state honest.
        SurfaceCommand::Play => {
            let _ = audio.play();
        }
        SurfaceCommand::Pause => {
            let _ = audio.pause();
        }
        SurfaceCommand::SetLoop { enabled } => audio.set_loop(enabled),
        SurfaceCommand::Seek { position } => audio.set_current_time(position.max(0.0)),
        SurfaceCommand::Volume { value } => audio.set_volume(value.clamp(0.0, 1.0)),
        SurfaceCommand::Clear => {
            let _ = audio.pause();
            let _ = audio.remove_attribute("src");
            audio.load();
        }
    }
}
