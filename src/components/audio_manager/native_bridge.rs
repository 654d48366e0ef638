// Desktop-webview JavaScript bridge used by non-wasm native targets.
#[cfg(not(target_arch = "wasm32"))]
use serde::Deserialize;

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_POLL_INTERVAL_MS: u64 = 250;

#[cfg(not(target_arch = "wasm32"))]
const NATIVE_AUDIO_BOOTSTRAP_JS: &str = r#"
(() => {
  if (window.__podcastrAudioBridge) {
    return true;
  }

  const existing = document.getElementById("podcastr-audio-native");
  const audio = existing || document.createElement("audio");
  if (!existing) {
    audio.id = "podcastr-audio-native";
    audio.preload = "metadata";
    audio.style.display = "none";
    audio.setAttribute("playsinline", "true");
    document.body.appendChild(audio);
  }

  const safePlay = async () => {
    try {
      await audio.play();
    } catch (_err) {}
  };

  const bridge = {
    audio,
    events: [],
    apply(cmd) {
      if (!cmd || !cmd.type) return;

      switch (cmd.type) {
        case "load":
          if (cmd.src && audio.src !== cmd.src) {
            audio.src = cmd.src;
          }
          break;
        case "play":
          safePlay();
          break;
        case "pause":
          audio.pause();
          break;
        case "set_loop":
          audio.loop = !!cmd.enabled;
          break;
        case "seek":
          if (typeof cmd.position === "number" && Number.isFinite(cmd.position)) {
            try {
              audio.currentTime = Math.max(0, cmd.position);
            } catch (_err) {}
          }
          break;
        case "volume":
          if (typeof cmd.value === "number") {
            audio.volume = Math.max(0, Math.min(1, cmd.value));
          }
          break;
        case "clear":
          audio.pause();
          audio.removeAttribute("src");
          audio.load();
          break;
      }
    },
    drain() {
      const events = bridge.events;
      bridge.events = [];
      return {
        current_time: Number.isFinite(audio.currentTime) ? audio.currentTime : 0,
        events,
      };
    },
  };

  for (const name of ["play", "pause", "loadedmetadata", "timeupdate", "ended"]) {
    audio.addEventListener(name, () => {
      // Only the latest timeupdate between polls matters.
      if (name === "timeupdate" && bridge.events[bridge.events.length - 1] === name) {
        return;
      }
      bridge.events.push(name);
    });
  }

  window.__podcastrAudioBridge = bridge;
  return true;
})();
"#;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Default, Deserialize)]
struct NativeAudioSnapshot {
    #[serde(default)]
    current_time: f64,
    #[serde(default)]
    events: Vec<String>,
}

#[cfg(not(target_arch = "wasm32"))]
fn ensure_native_audio_bridge() {
    let _ = document::eval(NATIVE_AUDIO_BOOTSTRAP_JS);
}

#[cfg(not(target_arch = "wasm32"))]
fn run_command(command: SurfaceCommand) {
    ensure_native_audio_bridge();
    let payload = serde_json::to_string(&command).unwrap_or_else(|_| "{}".to_string());
    let script = format!(
        r#"(function () {{
            const bridge = window.__podcastrAudioBridge;
            if (!bridge) return false;
            bridge.apply({payload});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

#[cfg(not(target_arch = "wasm32"))]
async fn native_audio_snapshot() -> Option<NativeAudioSnapshot> {
    let eval = document::eval(
        r#"return (function () {
            const bridge = window.__podcastrAudioBridge;
            return bridge ? bridge.drain() : { current_time: 0, events: [] };
        })();"#,
    );
    eval.join::<NativeAudioSnapshot>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
fn setup_surface(state: Signal<PlayerState>, progress: Signal<ProgressTracker>) {
    ensure_native_audio_bridge();

    spawn(async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_millis(NATIVE_POLL_INTERVAL_MS)).await;

            let Some(snapshot) = native_audio_snapshot().await else {
                continue;
            };
            for name in &snapshot.events {
                if let Some(event) = SurfaceEvent::from_dom(name, snapshot.current_time) {
                    handle_surface_event(state, progress, event);
                }
            }
        }
    });
}
