//! Camera stream and the page elements that belong to it
//!
//! A hidden `<video>` carries the camera feed into the landmark model and a
//! small fixed canvas shows the tracked hands. Both are created with the
//! stream and removed with it.

use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Document, DomException, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};

use crate::capture::{CameraStream, SessionId};
use crate::config::CameraConfig;
use crate::error::js_message;
use crate::renderer;
use crate::{Error, Result};

pub(crate) const VIDEO_ID: &str = "inklusiv-gesture-video";
pub(crate) const CANVAS_ID: &str = "inklusiv-gesture-canvas";

const CANVAS_STYLE: &str = "position: fixed; top: 10px; right: 10px; width: 160px; \
    height: 120px; border: 2px solid #007acc; border-radius: 8px; \
    z-index: 2147483646; background: black; display: none;";

pub(crate) struct WebCameraStream {
    session: SessionId,
    stream: MediaStream,
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
    _toggle: Closure<dyn FnMut()>,
    stopped: bool,
}

impl WebCameraStream {
    /// Ask for the camera for `session` and attach the video and preview
    /// elements.
    pub(crate) async fn open(session: SessionId, config: &CameraConfig) -> Result<Self> {
        let window = web_sys::window().ok_or(Error::CameraUnsupported)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| Error::CameraUnsupported)?;

        let video_constraints = js_sys::JSON::parse(&serde_json::to_string(config)?)
            .map_err(|err| Error::Camera(js_message(&err)))?;
        let constraints = MediaStreamConstraints::new();
        constraints.set_video(&video_constraints);

        let request = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(camera_error)?;
        let stream: MediaStream = JsFuture::from(request)
            .await
            .map_err(camera_error)?
            .dyn_into()
            .map_err(|_| Error::Camera("getUserMedia did not return a MediaStream".into()))?;

        let document = window
            .document()
            .ok_or_else(|| Error::Page("no document".into()))?;
        let camera = match Self::attach(&document, session, stream.clone(), config) {
            Ok(camera) => camera,
            Err(err) => {
                stop_tracks(&stream);
                return Err(err);
            }
        };

        // Dropping `camera` on failure releases the device
        let playing = camera.video.play().map_err(camera_error)?;
        JsFuture::from(playing).await.map_err(camera_error)?;

        Ok(camera)
    }

    fn attach(
        document: &Document,
        session: SessionId,
        stream: MediaStream,
        config: &CameraConfig,
    ) -> Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| Error::Page("no document body".into()))?;

        let video: HtmlVideoElement = create(document, "video")?;
        video.set_id(VIDEO_ID);
        video.set_autoplay(true);
        video.set_muted(true);
        video.set_attribute("playsinline", "").map_err(camera_error)?;
        video.style().set_css_text("display: none;");
        video.set_src_object(Some(&stream));

        let canvas: HtmlCanvasElement = create(document, "canvas")?;
        canvas.set_id(CANVAS_ID);
        canvas.set_width(config.width);
        canvas.set_height(config.height);
        canvas.style().set_css_text(CANVAS_STYLE);

        body.append_child(&video).map_err(camera_error)?;
        if let Err(err) = body.append_child(&canvas) {
            video.remove();
            return Err(camera_error(err));
        }

        let target = canvas.clone();
        let toggle = Closure::<dyn FnMut()>::new(move || {
            let style = target.style();
            let hidden = style.get_property_value("display").ok().as_deref() == Some("none");
            if let Err(err) = style.set_property("display", if hidden { "block" } else { "none" }) {
                debug!(error = ?err, "preview visibility not toggled");
            }
        });
        canvas
            .add_event_listener_with_callback("dblclick", toggle.as_ref().unchecked_ref())
            .map_err(camera_error)?;

        Ok(Self {
            session,
            stream,
            video,
            canvas,
            _toggle: toggle,
            stopped: false,
        })
    }

    pub(crate) fn video(&self) -> HtmlVideoElement {
        self.video.clone()
    }

    pub(crate) fn canvas(&self) -> HtmlCanvasElement {
        self.canvas.clone()
    }

    pub(crate) fn show_preview(&self) {
        if let Err(err) = self.canvas.style().set_property("display", "block") {
            debug!(session = self.session, error = ?err, "preview not shown");
        }
    }
}

impl CameraStream for WebCameraStream {
    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        stop_tracks(&self.stream);
        self.video.set_src_object(None);
        self.video.remove();
        self.canvas.remove();
        renderer::release_preview(self.session);
    }
}

impl Drop for WebCameraStream {
    fn drop(&mut self) {
        self.stop();
    }
}

fn stop_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T> {
    document
        .create_element(tag)
        .map_err(camera_error)?
        .dyn_into::<T>()
        .map_err(|_| Error::Page(format!("<{}> has an unexpected type", tag)))
}

/// Map a getUserMedia rejection onto the error the user is told about.
fn camera_error(err: JsValue) -> Error {
    match err.dyn_ref::<DomException>() {
        Some(exception) => match exception.name().as_str() {
            "NotAllowedError" | "SecurityError" => Error::PermissionDenied,
            name => Error::Camera(format!("{}: {}", name, exception.message())),
        },
        None => Error::Camera(js_message(&err)),
    }
}
