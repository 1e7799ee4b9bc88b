//! Landmark model handle
//!
//! MediaPipe Hands lives in JavaScript. The page registers a
//! `send(video, session)` function that pushes one frame through the model
//! and returns a Promise, plus an optional `configure(options)` for detection
//! settings. Results come back through `apply_hand_results` with the same
//! session id.

use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::capture::LandmarkSource;
use crate::config::LandmarkOptions;
use crate::error::js_message;
use crate::{Error, Result};

#[derive(Default)]
pub(crate) struct JsLandmarkSource {
    send: Option<Function>,
    configure: Option<Function>,
    ready: bool,
}

impl JsLandmarkSource {
    pub(crate) fn bind(&mut self, send: Function, configure: Option<Function>) {
        self.send = Some(send);
        self.configure = configure;
    }

    pub(crate) fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub(crate) fn send_fn(&self) -> Option<Function> {
        self.send.clone()
    }
}

impl LandmarkSource for JsLandmarkSource {
    fn is_available(&self) -> bool {
        self.ready && self.send.is_some()
    }

    fn configure(&mut self, options: &LandmarkOptions) -> Result<()> {
        let Some(configure) = &self.configure else {
            return Ok(());
        };
        let options = js_sys::JSON::parse(&serde_json::to_string(options)?)
            .map_err(|err| Error::LandmarkSource(js_message(&err)))?;
        configure
            .call1(&JsValue::NULL, &options)
            .map_err(|err| Error::LandmarkSource(js_message(&err)))?;
        Ok(())
    }
}
