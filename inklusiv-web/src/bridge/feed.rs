//! Frame pump
//!
//! Once per animation frame, push the current video frame through the
//! landmark model and wait for it to finish before asking for the next one.
//! Each frame goes out with the session it was captured under, and JS hands
//! that id back with the results. The loop ends by itself when its session
//! is no longer the active one.

use js_sys::Promise;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::HtmlVideoElement;

use super::entry::with_runtime;
use crate::capture::SessionId;

/// HTMLMediaElement.HAVE_CURRENT_DATA
const HAVE_CURRENT_DATA: u16 = 2;

pub(crate) fn start(session: SessionId, video: HtmlVideoElement) {
    schedule(session, video);
}

fn schedule(session: SessionId, video: HtmlVideoElement) {
    let Some(window) = web_sys::window() else {
        warn!(session, "no window, landmark feed stopped");
        return;
    };
    let tick = Closure::once_into_js(move || spawn_local(pump(session, video)));
    if let Err(err) = window.request_animation_frame(tick.unchecked_ref()) {
        warn!(session, error = ?err, "requestAnimationFrame failed, landmark feed stopped");
    }
}

async fn pump(session: SessionId, video: HtmlVideoElement) {
    let send = with_runtime(|rt| {
        if rt.active_session() == Some(session) {
            rt.source_mut().send_fn()
        } else {
            None
        }
    });
    let send = match send {
        Ok(Some(send)) => send,
        Ok(None) => {
            debug!(session, "landmark feed finished");
            return;
        }
        Err(err) => {
            debug!(session, %err, "landmark feed finished");
            return;
        }
    };

    if video.ready_state() >= HAVE_CURRENT_DATA {
        match send.call2(&JsValue::NULL, &video, &JsValue::from(session)) {
            Ok(result) => {
                if let Ok(promise) = result.dyn_into::<Promise>() {
                    if let Err(err) = JsFuture::from(promise).await {
                        debug!(session, error = ?err, "landmark frame failed");
                    }
                }
            }
            Err(err) => debug!(session, error = ?err, "landmark send threw"),
        }
    }

    schedule(session, video);
}
