//! Audio Manager - Drives the audio element outside of the component render cycle.
//! Player state flows out as surface commands; surface events flow back in.

mod binding;

pub use binding::*;

use crate::components::{PlayerController, ProgressSignal, VolumeSignal};
use crate::player_state::PlayerState;
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

// Browser audio element backend (wasm).
include!("web_surface.rs");
// Desktop-webview JavaScript bridge backend (non-wasm).
include!("native_bridge.rs");
// Public playback utility API.
include!("playback_api.rs");

fn handle_surface_event(
    mut state: Signal<PlayerState>,
    mut progress: Signal<ProgressTracker>,
    event: SurfaceEvent,
) {
    if let SurfaceEvent::TimeElapsed(seconds) = event {
        // Skip writes while the whole-second value is unchanged.
        let mut next = *progress.peek();
        next.on_time_elapsed(seconds);
        if next != *progress.peek() {
            progress.set(next);
        }
        return;
    }

    let commands = {
        let mut state = state.write();
        let mut progress = progress.write();
        apply_surface_event(&mut *state, &mut *progress, event)
    };
    for command in commands {
        run_command(command);
    }
}

#[component]
pub fn AudioController() -> Element {
    let player = use_context::<PlayerController>();
    let progress = use_context::<ProgressSignal>().0;
    let volume = use_context::<VolumeSignal>().0;
    let sync = use_hook(|| Rc::new(RefCell::new(SurfaceSync::default())));

    // One-time setup: create the element and subscribe to its events.
    use_effect(move || {
        setup_surface(player.state(), progress);
    });

    use_effect(move || {
        let state = player.state();
        let commands = sync.borrow_mut().diff(&*state.read());
        for command in commands {
            run_command(command);
        }
    });

    use_effect(move || {
        run_command(SurfaceCommand::Volume { value: volume() });
    });

    rsx! {}
}
