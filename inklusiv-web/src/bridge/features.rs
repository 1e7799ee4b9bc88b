//! Feature host for the page
//!
//! Gesture input is owned here. Voice input is mirrored for the thumbs-up
//! toggle and then forwarded; every other feature goes straight to the
//! handler registered from JavaScript.

use std::cell::RefCell;

use js_sys::Function;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use super::entry::{enable, with_runtime};
use crate::capture::CaptureStatus;
use crate::settings::{Feature, FeatureHost};

thread_local! {
    static FEATURE_HANDLER: RefCell<Option<Function>> = const { RefCell::new(None) };
}

pub(crate) fn set_handler(handler: Function) {
    FEATURE_HANDLER.with(|slot| *slot.borrow_mut() = Some(handler));
}

fn forward(feature: Feature, value: JsValue) {
    // Clone out so the handler may re-register itself
    let Some(handler) = FEATURE_HANDLER.with(|slot| slot.borrow().clone()) else {
        debug!(feature = feature.as_str(), "no feature handler registered");
        return;
    };
    if let Err(err) = handler.call2(&JsValue::NULL, &JsValue::from_str(feature.as_str()), &value) {
        warn!(feature = feature.as_str(), error = ?err, "feature handler failed");
    }
}

pub(crate) struct WebFeatureHost;

impl FeatureHost for WebFeatureHost {
    fn voice_input(&mut self, enabled: bool) {
        if let Err(err) = with_runtime(|rt| rt.page_mut().mirror_voice_input(enabled)) {
            debug!(%err, "voice input state not mirrored");
        }
        forward(Feature::VoiceInput, JsValue::from_bool(enabled));
    }

    /// Only acts on a change, so full-snapshot broadcasts leave a running
    /// capture alone.
    fn gesture_input(&mut self, enabled: bool) {
        let status = match with_runtime(|rt| rt.status()) {
            Ok(status) => status,
            Err(err) => {
                warn!(%err, enabled, "gesture input toggle ignored");
                return;
            }
        };
        match (enabled, status) {
            (true, CaptureStatus::Disabled) => spawn_local(async {
                if let Err(err) = enable().await {
                    info!(%err, "gesture input not started");
                }
            }),
            (false, CaptureStatus::Starting | CaptureStatus::Active) => {
                if let Err(err) = with_runtime(|rt| rt.disable()) {
                    warn!(%err, "gesture input not stopped");
                }
            }
            _ => {}
        }
    }

    fn dyslexia_font(&mut self, enabled: bool) {
        forward(Feature::DyslexiaFont, JsValue::from_bool(enabled));
    }

    fn text_to_speech(&mut self, enabled: bool) {
        forward(Feature::TextToSpeech, JsValue::from_bool(enabled));
    }

    fn adhd_mode(&mut self, enabled: bool) {
        forward(Feature::AdhdMode, JsValue::from_bool(enabled));
    }

    fn high_contrast(&mut self, enabled: bool) {
        forward(Feature::HighContrast, JsValue::from_bool(enabled));
    }

    fn dark_mode(&mut self, enabled: bool) {
        forward(Feature::DarkMode, JsValue::from_bool(enabled));
    }

    fn colorblind_mode(&mut self, mode: &str) {
        forward(Feature::ColorblindMode, JsValue::from_str(mode));
    }

    fn widget_position(&mut self, position: &str) {
        forward(Feature::WidgetPosition, JsValue::from_str(position));
    }
}
