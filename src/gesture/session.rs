//! Gesture session state
//!
//! Owns one [`InterpreterState`] per hand side and feeds the interpreter
//! in strict frame order. Also applies the lost-hand policy: by default a
//! side that disappears from detection keeps its state untouched, which
//! can leave a button pressed if the hand leaves the frame mid-drag;
//! setting `release_after_lost_frames` force-releases a stuck session
//! after that many unseen frames.

use crate::gesture::intent::PointerIntent;
use crate::gesture::interpreter::{GestureInterpreter, GestureParams, InterpreterState};
use crate::tracking::types::{HandObservation, HandSide, ScreenSize};
use tracing::warn;

/// Per-side bookkeeping
#[derive(Debug, Default)]
struct SideState {
    state: InterpreterState,
    /// Consecutive frames this side went undetected
    unseen_frames: u32,
}

/// A running gesture session: interpreter plus per-side state
pub struct GestureSession {
    interpreter: GestureInterpreter,
    left: SideState,
    right: SideState,
    /// Total frames advanced, including empty ones
    frames: u64,
}

impl GestureSession {
    pub fn new(params: GestureParams, screen: ScreenSize) -> Self {
        Self {
            interpreter: GestureInterpreter::new(params, screen),
            left: SideState::default(),
            right: SideState::default(),
            frames: 0,
        }
    }

    /// Frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Read-only view of a side's gesture state
    pub fn state(&self, side: HandSide) -> &InterpreterState {
        &self.side(side).state
    }

    fn side(&self, side: HandSide) -> &SideState {
        match side {
            HandSide::Left => &self.left,
            HandSide::Right => &self.right,
        }
    }

    fn side_mut(&mut self, side: HandSide) -> &mut SideState {
        match side {
            HandSide::Left => &mut self.left,
            HandSide::Right => &mut self.right,
        }
    }

    /// Advance one frame with the hands detected in it.
    ///
    /// Observations are interpreted in the order the detector produced
    /// them, at most one per side per frame; the gesture state is
    /// order-dependent, so frames must be fed in capture order.
    pub fn advance(&mut self, observations: &[HandObservation]) -> Vec<(HandSide, PointerIntent)> {
        self.frames += 1;
        let mut intents = Vec::new();
        let mut seen = [false; 2];

        for obs in observations {
            let slot = match obs.side {
                HandSide::Left => 0,
                HandSide::Right => 1,
            };
            if seen[slot] {
                // The detector occasionally reports duplicate sides; the
                // first observation wins to keep one interpretation per
                // side per frame
                continue;
            }
            seen[slot] = true;

            let interpreter = self.interpreter;
            let side_state = self.side_mut(obs.side);
            side_state.unseen_frames = 0;
            for intent in interpreter.interpret(obs, &mut side_state.state) {
                intents.push((obs.side, intent));
            }
        }

        let limit = self.interpreter.params.release_after_lost_frames;
        for (slot, side) in HandSide::both().into_iter().enumerate() {
            if seen[slot] {
                continue;
            }
            let side_state = self.side_mut(side);
            side_state.unseen_frames = side_state.unseen_frames.saturating_add(1);

            if limit > 0 && side_state.unseen_frames >= limit && side_state.state.is_engaged() {
                warn!(
                    "{} hand lost for {} frames with an active gesture, forcing release",
                    side, side_state.unseen_frames
                );
                if side_state.state.drag_active {
                    intents.push((side, PointerIntent::ReleaseLeft));
                }
                side_state.state = InterpreterState::default();
            }
        }

        intents
    }
}
