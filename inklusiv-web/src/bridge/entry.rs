//! WASM entry points and the page's gesture runtime
//!
//! One runtime per page, held in a thread-local. No borrow of it survives an
//! `.await`; the async enable path re-enters through `with_runtime` after
//! each suspension point.

use std::cell::RefCell;

use js_sys::Function;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

use super::camera::WebCameraStream;
use super::features::{self, WebFeatureHost};
use super::feed;
use super::notify::WebNotifier;
use super::page::WebPage;
use super::source::JsLandmarkSource;
use crate::capture::{EnableOutcome, SessionId};
use crate::classifier::decode_frame;
use crate::config::GestureConfig;
use crate::error::page_error;
use crate::renderer;
use crate::runtime::GestureRuntime;
use crate::settings::RuntimeMessage;
use crate::{Error, Result};

pub(crate) type WebRuntime =
    GestureRuntime<WebCameraStream, JsLandmarkSource, WebPage, WebNotifier>;

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static RUNTIME: RefCell<Option<WebRuntime>> = const { RefCell::new(None) };
    static PAGEHIDE: RefCell<Option<Closure<dyn FnMut()>>> = const { RefCell::new(None) };
}

/// Run `f` against the page runtime.
///
/// A JS callback fired synchronously from inside a dispatch (a click handler,
/// say) that calls back in gets [`Error::Busy`] instead of a borrow panic.
pub(crate) fn with_runtime<T>(f: impl FnOnce(&mut WebRuntime) -> T) -> Result<T> {
    RUNTIME.with(|cell| {
        let mut slot = cell.try_borrow_mut().map_err(|_| Error::Busy)?;
        slot.as_mut().map(f).ok_or(Error::NotInitialized)
    })
}

// ============================================================================
// SETUP
// ============================================================================

/// Create the runtime. `config_json` overrides any subset of the defaults.
///
/// Calling it again replaces the runtime, releasing any running capture, so
/// the landmark source and sinks must be registered again afterwards.
#[wasm_bindgen]
pub fn init_gesture_input(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => GestureConfig::from_json(&json)?,
        None => GestureConfig::default(),
    };
    let runtime = GestureRuntime::new(
        config,
        JsLandmarkSource::default(),
        WebPage::default(),
        WebNotifier,
    );
    // Drop the old runtime outside the borrow; its stream stops on drop
    let previous = RUNTIME.with(|cell| {
        cell.try_borrow_mut()
            .map(|mut slot| slot.replace(runtime))
            .map_err(|_| Error::Busy)
    })?;
    drop(previous);

    install_pagehide_listener()?;
    info!("🖐️ Gesture input initialized");
    Ok(())
}

/// Register the landmark model: `send(video, session)` returns a Promise that
/// settles once the frame's results were delivered through
/// [`apply_hand_results`], tagged with that same `session`;
/// `configure(options)` receives the detection options when capture starts.
#[wasm_bindgen]
pub fn set_landmark_source(send: Function, configure: Option<Function>) -> Result<(), JsValue> {
    with_runtime(|rt| rt.source_mut().bind(send, configure))?;
    Ok(())
}

#[wasm_bindgen]
pub fn set_landmark_model_ready(ready: bool) -> Result<(), JsValue> {
    with_runtime(|rt| rt.source_mut().set_ready(ready))?;
    debug!(ready, "landmark model readiness changed");
    Ok(())
}

/// `handler(feature, value)` applies features other than gesture input.
#[wasm_bindgen]
pub fn set_feature_handler(handler: Function) {
    features::set_handler(handler);
}

/// `sink(feature, value)` persists a feature change made by a gesture.
#[wasm_bindgen]
pub fn set_settings_sink(sink: Function) -> Result<(), JsValue> {
    with_runtime(|rt| rt.page_mut().set_settings_sink(sink))?;
    Ok(())
}

fn install_pagehide_listener() -> Result<()> {
    PAGEHIDE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| Error::Page("no window".into()))?;
        let listener = Closure::<dyn FnMut()>::new(|| {
            if let Err(err) = with_runtime(|rt| rt.disable()) {
                debug!(%err, "nothing to release on pagehide");
            }
        });
        window
            .add_event_listener_with_callback("pagehide", listener.as_ref().unchecked_ref())
            .map_err(page_error)?;
        *slot = Some(listener);
        Ok(())
    })
}

// ============================================================================
// CAPTURE LIFECYCLE
// ============================================================================

/// Start the camera and the landmark feed. Resolves once capture is running
/// (or was already running).
#[wasm_bindgen]
pub async fn enable_gesture_input() -> Result<(), JsValue> {
    enable().await?;
    Ok(())
}

pub(crate) async fn enable() -> Result<()> {
    let pending = match with_runtime(|rt| rt.begin_enable())?? {
        EnableOutcome::Pending(id) => id,
        EnableOutcome::AlreadyRunning => return Ok(()),
    };
    let camera = with_runtime(|rt| rt.config().camera.clone())?;

    let opened = WebCameraStream::open(pending, &camera).await;
    let elements = opened.as_ref().ok().map(|stream| {
        stream.show_preview();
        (stream.video(), stream.canvas())
    });

    let session = with_runtime(move |rt| rt.finish_enable(pending, opened))??;
    info!(session, "📷 Gesture capture started");

    if let Some((video, canvas)) = elements {
        feed::start(session, video);
        spawn_local(async move {
            match renderer::initialize_preview(canvas).await {
                Ok(state) => {
                    if !renderer::install_preview(session, state, is_live(session)) {
                        debug!(session, "discarding preview for ended session");
                    }
                }
                Err(err) => warn!(%err, "hand preview unavailable"),
            }
        });
    }
    Ok(())
}

#[wasm_bindgen]
pub fn disable_gesture_input() -> Result<(), JsValue> {
    let previous = with_runtime(|rt| rt.disable())?;
    debug!(?previous, "gesture capture disabled");
    Ok(())
}

/// The running capture session, if any.
///
/// Results must carry the session passed to `send`, not this value: a frame
/// captured before a restart would otherwise pass as the new session's.
#[wasm_bindgen]
pub fn gesture_session_id() -> Option<SessionId> {
    with_runtime(|rt| rt.active_session()).ok().flatten()
}

pub(crate) fn is_live(session: SessionId) -> bool {
    gesture_session_id() == Some(session)
}

// ============================================================================
// FRAME RESULTS
// ============================================================================

/// Deliver one frame of landmark results captured under `session`.
///
/// `flat_data` holds 63 floats per hand (21 points × x, y, z) and
/// `handedness` one "Left"/"Right" label per hand. Returns how many page
/// actions were dispatched.
#[wasm_bindgen]
pub fn apply_hand_results(
    session: SessionId,
    flat_data: &[f32],
    handedness: Vec<String>,
) -> Result<usize, JsValue> {
    let hands: Vec<_> = decode_frame(flat_data, &handedness)
        .into_iter()
        .filter_map(|hand| match hand {
            Ok(hand) => Some(hand),
            Err(err) => {
                debug!(%err, "skipping hand");
                None
            }
        })
        .collect();

    let actions = with_runtime(|rt| {
        if rt.active_session() == Some(session) {
            renderer::render_hands(&hands);
        }
        rt.handle_frame(session, &hands, js_sys::Date::now())
    })?;
    Ok(actions.len())
}

// ============================================================================
// SETTINGS & HELP
// ============================================================================

/// Route a message from the background service (JSON with an `action` tag).
/// Messages meant for other handlers are ignored.
#[wasm_bindgen]
pub fn handle_runtime_message(message_json: &str) -> Result<(), JsValue> {
    let message = match RuntimeMessage::from_json(message_json) {
        Ok(message) => message,
        Err(err) => {
            debug!(%err, "ignoring runtime message");
            return Ok(());
        }
    };
    message.apply(&mut WebFeatureHost)?;
    Ok(())
}

#[wasm_bindgen]
pub fn show_gesture_help() -> Result<(), JsValue> {
    with_runtime(|rt| rt.show_help())?;
    Ok(())
}
