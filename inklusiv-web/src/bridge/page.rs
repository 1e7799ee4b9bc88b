//! Page primitives on the live document

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::dispatch::PageActions;
use crate::error::page_error;
use crate::settings::Feature;
use crate::{Error, Result};

/// Fallback targets when nothing clickable has focus
const BUTTON_SELECTOR: &str = r#"button, input[type="submit"], input[type="button"]"#;

/// The floating widget's gesture button
const GESTURE_BUTTON_SELECTOR: &str = ".inklusiv-widget-gesture";

#[derive(Default)]
pub(crate) struct WebPage {
    voice_input: bool,
    settings_sink: Option<Function>,
}

impl WebPage {
    /// Where feature changes made by a gesture are persisted: `sink(feature, value)`
    pub(crate) fn set_settings_sink(&mut self, sink: Function) {
        self.settings_sink = Some(sink);
    }

    /// Track the stored voice input state.
    pub(crate) fn mirror_voice_input(&mut self, enabled: bool) {
        self.voice_input = enabled;
    }
}

impl PageActions for WebPage {
    fn scroll_by(&mut self, dy: f64) -> Result<()> {
        window()?.scroll_by_with_x_and_y(0.0, dy);
        Ok(())
    }

    fn history_back(&mut self) -> Result<()> {
        window()?.history().map_err(page_error)?.back().map_err(page_error)
    }

    fn reload(&mut self) -> Result<()> {
        window()?.location().reload().map_err(page_error)
    }

    fn click_focused(&mut self) -> Result<bool> {
        let Some(focused) = document()?.active_element() else {
            return Ok(false);
        };
        if !matches!(focused.tag_name().as_str(), "BUTTON" | "A") {
            return Ok(false);
        }
        match focused.dyn_into::<HtmlElement>() {
            Ok(element) => {
                element.click();
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    fn click_first_button(&mut self) -> Result<bool> {
        let button = document()?
            .query_selector(BUTTON_SELECTOR)
            .map_err(page_error)?
            .and_then(|element| element.dyn_into::<HtmlElement>().ok());
        match button {
            Some(button) => {
                button.click();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn is_speaking(&self) -> bool {
        web_sys::window()
            .and_then(|window| window.speech_synthesis().ok())
            .map(|synth| synth.speaking())
            .unwrap_or(false)
    }

    fn stop_speaking(&mut self) -> Result<()> {
        window()?.speech_synthesis().map_err(page_error)?.cancel();
        Ok(())
    }

    fn voice_input_enabled(&self) -> bool {
        self.voice_input
    }

    fn set_voice_input(&mut self, enabled: bool) -> Result<()> {
        let sink = self
            .settings_sink
            .as_ref()
            .ok_or_else(|| Error::Page("no settings sink registered".into()))?;
        sink.call2(
            &JsValue::NULL,
            &JsValue::from_str(Feature::VoiceInput.as_str()),
            &JsValue::from_bool(enabled),
        )
        .map_err(page_error)?;
        self.voice_input = enabled;
        Ok(())
    }

    fn set_gesture_indicator(&mut self, active: bool) -> Result<()> {
        // The widget is optional
        let Some(button) = document()?
            .query_selector(GESTURE_BUTTON_SELECTOR)
            .map_err(page_error)?
        else {
            return Ok(());
        };
        button
            .class_list()
            .toggle_with_force("active", active)
            .map_err(page_error)?;
        Ok(())
    }
}

fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Page("no window".into()))
}

fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| Error::Page("no document".into()))
}
