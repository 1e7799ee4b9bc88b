//! Collaborators the capture controller binds together

use crate::config::LandmarkOptions;
use crate::Result;

/// A live camera stream owned by a capture session
pub trait CameraStream {
    /// Stop every track and release the device. Must tolerate repeat calls.
    fn stop(&mut self);
}

/// The hand landmark model
pub trait LandmarkSource {
    /// Whether the model has finished loading
    fn is_available(&self) -> bool;

    /// Apply detection options before frames start flowing.
    fn configure(&mut self, options: &LandmarkOptions) -> Result<()>;
}
