//! Finger extension from landmark geometry
//!
//! Assumes an upright hand facing the camera: a finger is up when its tip
//! sits higher on screen (smaller y) than its PIP joint. The thumb folds
//! sideways, so it compares x against its IP joint instead. Handedness is not
//! taken into account, so a mirrored thumb reads the wrong way round.

use super::landmarks::{
    HandDetection, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP,
    RING_TIP, THUMB_IP, THUMB_TIP,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// (tip, reference joint) landmark indices
    fn joints(&self) -> (usize, usize) {
        match self {
            Finger::Thumb => (THUMB_TIP, THUMB_IP),
            Finger::Index => (INDEX_TIP, INDEX_PIP),
            Finger::Middle => (MIDDLE_TIP, MIDDLE_PIP),
            Finger::Ring => (RING_TIP, RING_PIP),
            Finger::Pinky => (PINKY_TIP, PINKY_PIP),
        }
    }
}

/// Which fingers are extended, in thumb..pinky order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerState([bool; 5]);

impl FingerState {
    pub fn from_hand(hand: &HandDetection) -> Self {
        let mut up = [false; 5];
        for (i, finger) in Finger::ALL.iter().enumerate() {
            let (tip, joint) = finger.joints();
            let tip = hand.landmark(tip);
            let joint = hand.landmark(joint);
            up[i] = match finger {
                Finger::Thumb => tip.x > joint.x,
                _ => tip.y < joint.y,
            };
        }
        Self(up)
    }

    pub fn from_bits(up: [bool; 5]) -> Self {
        Self(up)
    }

    pub fn is_up(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }

    /// True when `finger` is the only one extended
    pub fn only(&self, finger: Finger) -> bool {
        self.is_up(finger) && self.count() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::landmarks::{Handedness, Landmark, LANDMARK_COUNT};

    #[test]
    fn test_flat_hand_has_nothing_up() {
        let hand = HandDetection::new([Landmark::default(); LANDMARK_COUNT], Handedness::Left);
        let state = FingerState::from_hand(&hand);
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn test_thumb_uses_x_axis() {
        let mut landmarks = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        landmarks[THUMB_TIP] = Landmark::new(0.6, 0.9, 0.0);
        let state = FingerState::from_hand(&HandDetection::new(landmarks, Handedness::Right));
        assert!(state.only(Finger::Thumb));
    }

    #[test]
    fn test_finger_uses_y_axis() {
        let mut landmarks = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        landmarks[MIDDLE_TIP] = Landmark::new(0.9, 0.2, 0.0);
        let state = FingerState::from_hand(&HandDetection::new(landmarks, Handedness::Right));
        assert!(state.is_up(Finger::Middle));
        assert_eq!(state.count(), 1);
    }
}
