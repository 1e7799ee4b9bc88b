//! Capture module - camera stream and landmark source lifecycle
//!
//! Re-exports only. All logic in submodules.

mod controller;
mod source;

#[cfg(test)]
pub(crate) use controller::fakes;

pub use controller::{CaptureController, CaptureSession, CaptureStatus, EnableOutcome, SessionId};
pub use source::{CameraStream, LandmarkSource};
