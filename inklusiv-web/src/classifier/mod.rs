//! Classifier module - static hand gesture recognition
//!
//! Note: landmark inference runs in JavaScript using MediaPipe Hands.
//! Rust decodes the landmarks and turns each hand into a gesture label.

mod fingers;
mod gesture;
mod landmarks;

pub use fingers::{Finger, FingerState};
pub use gesture::{classify, Gesture};
pub use landmarks::{
    decode_frame, HandDetection, Handedness, Landmark, FLOATS_PER_HAND, HAND_SKELETON,
    LANDMARK_COUNT,
};

#[cfg(test)]
pub(crate) use gesture::posed_hand;
