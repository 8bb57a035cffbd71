//! Pointer intents
//!
//! The output vocabulary of the gesture interpreter. Intents are produced
//! per frame and consumed immediately by an injector; they also appear in
//! recorded session traces.

use serde::{Deserialize, Serialize};

/// A single pointer action requested by the gesture layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerIntent {
    /// Move the pointer to absolute screen pixel coordinates
    MoveTo { x: i32, y: i32 },
    /// Press the left mouse button
    PressLeft,
    /// Release the left mouse button
    ReleaseLeft,
    /// Scroll vertically by the given amount in device scroll units
    ScrollBy { dy: i32 },
}

impl PointerIntent {
    /// Check if this is a pointer movement
    pub fn is_move(&self) -> bool {
        matches!(self, PointerIntent::MoveTo { .. })
    }

    /// Check if this is a button edge (press or release)
    pub fn is_button_edge(&self) -> bool {
        matches!(self, PointerIntent::PressLeft | PointerIntent::ReleaseLeft)
    }

    /// Check if this is a scroll
    pub fn is_scroll(&self) -> bool {
        matches!(self, PointerIntent::ScrollBy { .. })
    }
}

impl std::fmt::Display for PointerIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PointerIntent::MoveTo { x, y } => write!(f, "move({x}, {y})"),
            PointerIntent::PressLeft => write!(f, "press(left)"),
            PointerIntent::ReleaseLeft => write!(f, "release(left)"),
            PointerIntent::ScrollBy { dy } => write!(f, "scroll({dy})"),
        }
    }
}
