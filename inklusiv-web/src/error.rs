//! Error types for the gesture pipeline

use std::sync::Arc;

use wasm_bindgen::JsValue;

/// Errors raised by the gesture input pipeline.
///
/// None of these are fatal to the host page; the worst outcome of any of
/// them is gesture input falling back to disabled.
#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    /// The hand landmark model has not been loaded.
    #[error("gesture tracking not available")]
    Unavailable,

    /// The browser has no camera capture API.
    #[error("camera access not supported")]
    CameraUnsupported,

    /// The user refused camera access.
    #[error("camera access denied")]
    PermissionDenied,

    /// Camera acquisition failed for any other reason.
    #[error("camera error: {0}")]
    Camera(String),

    /// A start completed after the capture session was cancelled.
    #[error("capture session {0} was cancelled")]
    Cancelled(u32),

    /// A frame result could not be decoded into hand detections.
    #[error("invalid landmarks: {0}")]
    InvalidLandmarks(String),

    /// A settings message or config value could not be decoded.
    #[error("json error: {0}")]
    Json(Arc<serde_json::Error>),

    /// A setting arrived with a value of the wrong shape.
    #[error("invalid value for {0}")]
    InvalidSetting(&'static str),

    /// The JS landmark source rejected a call.
    #[error("landmark source error: {0}")]
    LandmarkSource(String),

    /// A page primitive (scroll, click, navigation) failed.
    #[error("page error: {0}")]
    Page(String),

    /// `init_gesture_input` has not been called yet.
    #[error("gesture input not initialized")]
    NotInitialized,

    /// A JS callback re-entered the runtime while it was dispatching.
    #[error("gesture input is busy")]
    Busy,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// Wrap in an Arc so it is Clone
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(Arc::new(err))
    }
}

impl From<Error> for JsValue {
    fn from(err: Error) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for an opaque JS error value
pub(crate) fn js_message(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

/// Page primitives fail with opaque JS values; keep whatever text they carry.
pub(crate) fn page_error(err: JsValue) -> Error {
    Error::Page(js_message(&err))
}
