//! Hand landmark types and the flat JS layout they arrive in
//!
//! MediaPipe Hands reports 21 points per hand. JavaScript flattens every
//! detected hand into one Float32Array (hand-major, x/y/z per point) and
//! sends the handedness labels alongside.

use crate::{Error, Result};

// ============================================================================
// HAND LANDMARK INDICES (MediaPipe Hands - 21 total)
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

pub const LANDMARK_COUNT: usize = 21;

/// Floats per hand in the flat layout
pub const FLOATS_PER_HAND: usize = LANDMARK_COUNT * 3;

/// Hand skeleton connections for the preview overlay
pub const HAND_SKELETON: [(usize, usize); 23] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (WRIST, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (WRIST, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (WRIST, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    // Palm
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, RING_MCP), (RING_MCP, PINKY_MCP),
];

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single 3D landmark point (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,  // 0-1 normalized
    pub y: f32,  // 0-1 normalized
    pub z: f32,  // Relative depth
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Distance to another landmark in the image plane (depth ignored)
    pub fn planar_distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Which hand the landmark model believes it saw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse MediaPipe's label ("Left" / "Right"), case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        if label.eq_ignore_ascii_case("left") {
            Some(Handedness::Left)
        } else if label.eq_ignore_ascii_case("right") {
            Some(Handedness::Right)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "left",
            Handedness::Right => "right",
        }
    }
}

/// One detected hand in one frame
#[derive(Clone, Debug, PartialEq)]
pub struct HandDetection {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl HandDetection {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self { landmarks, handedness }
    }

    pub fn landmark(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    /// Decode hand `hand` out of the flat layout.
    pub fn from_flat(flat_data: &[f32], hand: usize, handedness: Handedness) -> Result<Self> {
        let start = hand * FLOATS_PER_HAND;
        let end = start + FLOATS_PER_HAND;
        let data = flat_data.get(start..end).ok_or_else(|| {
            Error::InvalidLandmarks(format!(
                "hand {} needs floats {}..{}, got {}",
                hand,
                start,
                end,
                flat_data.len()
            ))
        })?;

        let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
        for (i, point) in data.chunks_exact(3).enumerate() {
            landmarks[i] = Landmark::new(point[0], point[1], point[2]);
        }

        Ok(Self { landmarks, handedness })
    }
}

/// Decode every hand of a frame result.
///
/// Hands that cannot be decoded are reported individually so one bad hand
/// does not cost the other one its frame.
pub fn decode_frame(flat_data: &[f32], handedness: &[String]) -> Vec<Result<HandDetection>> {
    handedness
        .iter()
        .enumerate()
        .map(|(hand, label)| {
            let handedness = Handedness::parse(label)
                .ok_or_else(|| Error::InvalidLandmarks(format!("unknown handedness {:?}", label)))?;
            HandDetection::from_flat(flat_data, hand, handedness)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hands(count: usize) -> Vec<f32> {
        (0..count * FLOATS_PER_HAND).map(|i| i as f32 / 1000.0).collect()
    }

    #[test]
    fn test_handedness_parse() {
        assert_eq!(Handedness::parse("Left"), Some(Handedness::Left));
        assert_eq!(Handedness::parse("right"), Some(Handedness::Right));
        assert_eq!(Handedness::parse("both"), None);
    }

    #[test]
    fn test_from_flat_second_hand() {
        let data = flat_hands(2);
        let hand = HandDetection::from_flat(&data, 1, Handedness::Right).unwrap();
        let base = FLOATS_PER_HAND as f32 / 1000.0;
        assert_eq!(hand.landmarks[WRIST].x, base);
        assert_eq!(hand.landmarks[PINKY_TIP].z, data[2 * FLOATS_PER_HAND - 1]);
        assert_eq!(hand.handedness, Handedness::Right);
    }

    #[test]
    fn test_from_flat_short_buffer() {
        let data = flat_hands(1);
        assert!(matches!(
            HandDetection::from_flat(&data[..60], 0, Handedness::Left),
            Err(Error::InvalidLandmarks(_))
        ));
    }

    #[test]
    fn test_decode_frame_isolates_bad_hand() {
        let data = flat_hands(1);
        let hands = decode_frame(&data, &["Left".to_string(), "Right".to_string()]);
        assert_eq!(hands.len(), 2);
        assert!(hands[0].is_ok());
        assert!(hands[1].is_err());
    }

    #[test]
    fn test_planar_distance_ignores_depth() {
        let a = Landmark::new(0.0, 0.0, 5.0);
        let b = Landmark::new(0.3, 0.4, -5.0);
        assert!((a.planar_distance(&b) - 0.5).abs() < 1e-6);
    }
}
