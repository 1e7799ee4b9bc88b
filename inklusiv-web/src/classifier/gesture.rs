//! Static gesture classification
//!
//! A fixed rule set over the finger extension vector plus one distance check.
//! Cheap enough to run on every hand of every frame.

use super::fingers::{Finger, FingerState};
use super::landmarks::{HandDetection, Landmark, INDEX_TIP, THUMB_TIP};

/// Gesture vocabulary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Index finger only
    Point,
    /// Index and middle finger
    Peace,
    /// Thumb and index tips touching
    Ok,
    /// No fingers up
    Fist,
    /// All five fingers up
    Open,
    /// Thumb only
    ThumbsUp,
    /// Anything else
    None,
}

impl Gesture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gesture::Point => "point",
            Gesture::Peace => "peace",
            Gesture::Ok => "ok",
            Gesture::Fist => "fist",
            Gesture::Open => "open",
            Gesture::ThumbsUp => "thumbsup",
            Gesture::None => "none",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Gesture::None
    }
}

/// Classify one hand.
///
/// Rules are checked in order and the first match wins: point, peace, ok,
/// fist, open, thumbs up. The ok check sits after point/peace, so touching
/// tips on an index-only hand still read as point, but it overrides every
/// finger-count rule below it (a fist whose thumb rests on the index tip is ok).
///
/// Non-finite coordinates classify as [`Gesture::None`].
pub fn classify(hand: &HandDetection, ok_distance: f32) -> Gesture {
    if !hand.landmarks.iter().all(Landmark::is_finite) {
        return Gesture::None;
    }

    let fingers = FingerState::from_hand(hand);
    let count = fingers.count();

    if fingers.only(Finger::Index) {
        return Gesture::Point;
    }

    if fingers.is_up(Finger::Index) && fingers.is_up(Finger::Middle) && count == 2 {
        return Gesture::Peace;
    }

    let pinch = hand.landmark(THUMB_TIP).planar_distance(&hand.landmark(INDEX_TIP));
    if pinch < ok_distance {
        return Gesture::Ok;
    }

    match count {
        0 => Gesture::Fist,
        5 => Gesture::Open,
        1 if fingers.only(Finger::Thumb) => Gesture::ThumbsUp,
        _ => Gesture::None,
    }
}

/// Build a hand in a given finger pose, thumb..pinky.
///
/// Fingers sit side by side with their PIP joints on y = 0.5; an extended
/// finger's tip is drawn above the joint, a curled one below. Thumb and
/// index tips never come within 0.1 of each other.
#[cfg(test)]
pub(crate) fn posed_hand(
    up: [bool; 5],
    handedness: super::landmarks::Handedness,
) -> HandDetection {
    use super::landmarks::*;

    let mut landmarks = [Landmark::new(0.5, 0.8, 0.0); LANDMARK_COUNT];

    landmarks[THUMB_IP] = Landmark::new(0.3, 0.6, 0.0);
    landmarks[THUMB_TIP] = Landmark::new(if up[0] { 0.35 } else { 0.25 }, 0.6, 0.0);

    let fingers = [
        (INDEX_PIP, INDEX_TIP, 0.4),
        (MIDDLE_PIP, MIDDLE_TIP, 0.5),
        (RING_PIP, RING_TIP, 0.6),
        (PINKY_PIP, PINKY_TIP, 0.7),
    ];
    for (i, (pip, tip, x)) in fingers.iter().enumerate() {
        landmarks[*pip] = Landmark::new(*x, 0.5, 0.0);
        landmarks[*tip] = Landmark::new(*x, if up[i + 1] { 0.3 } else { 0.7 }, 0.0);
    }

    HandDetection::new(landmarks, handedness)
}
