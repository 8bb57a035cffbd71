//! Core types for hand observations
//!
//! Defines the data structures handed from the detector to the gesture
//! interpreter. Coordinates are normalized to the camera frame so the
//! interpreter's thresholds stay resolution-independent.

use serde::{Deserialize, Serialize};

/// Hand landmark indices (MediaPipe hand landmark model convention)
///
/// Only the tips consumed by the gesture layer are named here in code;
/// the full table is kept for protocol validation and future gestures.
#[allow(dead_code)]
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_TIP: usize = 20;

    /// Number of landmarks in a complete hand
    pub const COUNT: usize = 21;
}

/// A point in normalized camera-frame coordinates (0.0 to 1.0 on each axis)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Create a new normalized point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another normalized point
    pub fn distance(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Scale to absolute pixel coordinates on the target screen
    pub fn to_screen(&self, screen: ScreenSize) -> (i32, i32) {
        (
            (self.x * screen.width as f64) as i32,
            (self.y * screen.height as f64) as i32,
        )
    }
}

/// Which hand an observation belongs to
///
/// The side selects the gesture policy: Right drives the pointer and
/// scroll, Left drives click and drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Parse a detector classification label
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Left" => Some(HandSide::Left),
            "Right" => Some(HandSide::Right),
            _ => None,
        }
    }

    /// Both sides, in a fixed order
    pub fn both() -> [HandSide; 2] {
        [HandSide::Left, HandSide::Right]
    }
}

impl std::fmt::Display for HandSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HandSide::Left => write!(f, "Left"),
            HandSide::Right => write!(f, "Right"),
        }
    }
}

/// One detected hand in one frame
///
/// Created fresh each frame by the detector; never persisted. A present
/// observation is always complete: the detector layer rejects hands
/// with missing landmarks before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandObservation {
    /// Which hand this is
    pub side: HandSide,
    /// Index-finger tip, normalized
    pub index_tip: Point2D,
    /// Thumb tip, normalized
    pub thumb_tip: Point2D,
}

impl HandObservation {
    /// Thumb-to-index pinch distance, the primary gesture signal
    pub fn pinch_distance(&self) -> f64 {
        self.thumb_tip.distance(&self.index_tip)
    }
}

/// Target screen resolution in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}
