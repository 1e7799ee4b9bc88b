//! Gesture input tunables
//!
//! Every field has a default, so the content script can pass a partial JSON
//! object (or nothing at all) to `init_gesture_input`.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level configuration for gesture input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GestureConfig {
    /// Minimum time between two dispatched gestures (ms).
    pub debounce_ms: f64,
    /// Thumb-tip to index-tip distance (normalized) below which a hand reads as "ok".
    pub ok_distance: f32,
    /// Pixels scrolled by the point and peace gestures.
    pub scroll_step: f64,
    /// How long gesture feedback stays on screen (ms).
    pub feedback_ms: u32,
    /// How long the gesture help text stays on screen (ms).
    pub help_ms: u32,
    pub landmarks: LandmarkOptions,
    pub camera: CameraConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500.0,
            ok_distance: 0.05,
            scroll_step: 200.0,
            feedback_ms: 1500,
            help_ms: 6000,
            landmarks: LandmarkOptions::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl GestureConfig {
    /// Parse a (possibly partial) JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Options handed to the landmark source when a capture session starts.
///
/// Serialized with the field names MediaPipe Hands' `setOptions` expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandmarkOptions {
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for LandmarkOptions {
    fn default() -> Self {
        Self {
            max_num_hands: 2,
            model_complexity: 1,
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

/// Video constraints for the camera stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub facing_mode: String,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            facing_mode: "user".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = GestureConfig::from_json("{}").unwrap();
        assert_eq!(config, GestureConfig::default());
        assert_eq!(config.debounce_ms, 500.0);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.landmarks.max_num_hands, 2);
    }

    #[test]
    fn test_partial_override() {
        let config =
            GestureConfig::from_json(r#"{"debounceMs": 750, "landmarks": {"maxNumHands": 1}}"#)
                .unwrap();
        assert_eq!(config.debounce_ms, 750.0);
        assert_eq!(config.landmarks.max_num_hands, 1);
        assert_eq!(config.landmarks.min_tracking_confidence, 0.5);
        assert_eq!(config.scroll_step, 200.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(GestureConfig::from_json("{debounceMs").is_err());
    }

    #[test]
    fn test_landmark_options_use_mediapipe_names() {
        let json = serde_json::to_value(LandmarkOptions::default()).unwrap();
        assert_eq!(json["maxNumHands"], 2);
        assert_eq!(json["modelComplexity"], 1);
        assert_eq!(json["minDetectionConfidence"], 0.5);
    }
}
