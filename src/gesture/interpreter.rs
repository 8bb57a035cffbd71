//! Per-frame gesture interpretation
//!
//! The core state machine: thumb-to-index pinch distances are thresholded
//! into drag and scroll sessions, with edge-triggered transitions so
//! intents fire on the frame a threshold is crossed, not on every frame
//! the condition holds.
//!
//! The Right hand drives the pointer and scroll; the Left hand drives
//! click and drag. Each side owns one [`InterpreterState`], mutated only
//! here, which makes the interpreter testable without a camera or a real
//! pointer device.

use crate::gesture::intent::PointerIntent;
use crate::tracking::types::{HandObservation, HandSide, Point2D, ScreenSize};
use serde::{Deserialize, Serialize};

/// Gesture thresholds
///
/// All distances are in normalized camera-frame units, so the same
/// parameters work at any capture resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureParams {
    /// Thumb-to-index distance below which the Left hand is pinching (click/drag)
    pub pinch_threshold: f64,
    /// Thumb-to-index distance below which the Right hand enters scroll mode
    pub scroll_threshold: f64,
    /// Multiplier converting vertical pixel delta to scroll units
    pub scroll_sensitivity: f64,
    /// Minimum normalized index-tip movement required to move the pointer
    pub movement_epsilon: f64,
    /// Force-release a stuck drag/scroll after this many frames without a
    /// detection for the side (0 = never)
    pub release_after_lost_frames: u32,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            pinch_threshold: 0.06,
            scroll_threshold: 0.05,
            scroll_sensitivity: 0.01,
            movement_epsilon: 0.005,
            release_after_lost_frames: 0,
        }
    }
}

/// Gesture state for one hand side
///
/// Lives for the whole process; reset to empty at startup. The previous
/// index tip keeps raw normalized coordinates (never screen pixels) so
/// the movement epsilon stays resolution-independent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterpreterState {
    /// Index tip from the previous frame, normalized
    pub prev_index_tip: Option<Point2D>,
    /// A drag session (Left-hand pinch) is in progress
    pub drag_active: bool,
    /// Screen position where the drag started
    pub drag_anchor: Option<(i32, i32)>,
    /// A scroll session (Right-hand pinch) is in progress
    pub scroll_active: bool,
    /// Screen position where the scroll started; fixed for the whole session
    pub scroll_anchor: Option<(i32, i32)>,
}

impl InterpreterState {
    /// True if any gesture session is in progress
    pub fn is_engaged(&self) -> bool {
        self.drag_active || self.scroll_active
    }
}

/// The gesture interpretation engine
#[derive(Debug, Clone, Copy)]
pub struct GestureInterpreter {
    /// Thresholds in effect
    pub params: GestureParams,
    /// Target screen resolution for pointer mapping
    pub screen: ScreenSize,
}

impl GestureInterpreter {
    pub fn new(params: GestureParams, screen: ScreenSize) -> Self {
        Self { params, screen }
    }

    /// Interpret one observation, mutating the side's state and returning
    /// the intents to inject this frame.
    ///
    /// Must be called at most once per side per frame, in frame order:
    /// the anchors and previous-position history are order-dependent.
    pub fn interpret(
        &self,
        observation: &HandObservation,
        state: &mut InterpreterState,
    ) -> Vec<PointerIntent> {
        match observation.side {
            HandSide::Right => self.interpret_right(observation, state),
            HandSide::Left => self.interpret_left(observation, state),
        }
    }

    /// Right hand: pointer movement with jitter suppression, plus
    /// pinch-anchored scrolling.
    fn interpret_right(
        &self,
        observation: &HandObservation,
        state: &mut InterpreterState,
    ) -> Vec<PointerIntent> {
        let mut intents = Vec::new();
        let (x, y) = observation.index_tip.to_screen(self.screen);

        match state.prev_index_tip {
            Some(prev) => {
                if observation.index_tip.distance(&prev) > self.params.movement_epsilon {
                    intents.push(PointerIntent::MoveTo { x, y });
                }
            }
            // First observation for this side always moves
            None => intents.push(PointerIntent::MoveTo { x, y }),
        }
        state.prev_index_tip = Some(observation.index_tip);

        if observation.pinch_distance() < self.params.scroll_threshold {
            if !state.scroll_active {
                // Anchor frame: record where the pinch started, no scroll yet
                state.scroll_active = true;
                state.scroll_anchor = Some((x, y));
            } else if let Some((_, anchor_y)) = state.scroll_anchor {
                // The anchor stays fixed for the whole session: the delta is
                // cumulative displacement from pinch start, not frame-to-frame
                let dy = (self.params.scroll_sensitivity * (anchor_y - y) as f64) as i32;
                intents.push(PointerIntent::ScrollBy { dy });
            }
        } else if state.scroll_active {
            state.scroll_active = false;
            state.scroll_anchor = None;
        }

        intents
    }

    /// Left hand: pinch to press, hold to drag, release on un-pinch.
    fn interpret_left(
        &self,
        observation: &HandObservation,
        state: &mut InterpreterState,
    ) -> Vec<PointerIntent> {
        let mut intents = Vec::new();
        let (x, y) = observation.index_tip.to_screen(self.screen);

        if observation.pinch_distance() < self.params.pinch_threshold {
            if !state.drag_active {
                state.drag_active = true;
                state.drag_anchor = Some((x, y));
                intents.push(PointerIntent::PressLeft);
            } else {
                // Continuous drag tracking while the pinch holds
                intents.push(PointerIntent::MoveTo { x, y });
            }
        } else if state.drag_active {
            state.drag_active = false;
            state.drag_anchor = None;
            intents.push(PointerIntent::ReleaseLeft);
        }

        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 1000,
        height: 1000,
    };

    fn interpreter() -> GestureInterpreter {
        GestureInterpreter::new(GestureParams::default(), SCREEN)
    }

    /// A hand with its index tip at (x, y) and the thumb `pinch` away on x
    fn hand(side: HandSide, x: f64, y: f64, pinch: f64) -> HandObservation {
        HandObservation {
            side,
            index_tip: Point2D::new(x, y),
            thumb_tip: Point2D::new(x + pinch, y),
        }
    }

    #[test]
    fn test_no_press_above_pinch_threshold() {
        let engine = interpreter();
        let mut state = InterpreterState::default();

        for pinch in [0.061, 0.10, 0.5] {
            let intents = engine.interpret(&hand(HandSide::Left, 0.5, 0.5, pinch), &mut state);
            assert!(
                !intents.contains(&PointerIntent::PressLeft),
                "press emitted at distance {pinch}"
            );
            assert!(!state.drag_active);
        }
    }

    #[test]
    fn test_pinch_then_release_is_one_press_one_release() {
        let engine = interpreter();
        let mut state = InterpreterState::default();
        let mut all = Vec::new();

        // Hold the pinch for many frames, then let go
        for _ in 0..50 {
            all.extend(engine.interpret(&hand(HandSide::Left, 0.5, 0.5, 0.03), &mut state));
        }
        all.extend(engine.interpret(&hand(HandSide::Left, 0.5, 0.5, 0.10), &mut state));

        let presses = all.iter().filter(|i| **i == PointerIntent::PressLeft).count();
        let releases = all.iter().filter(|i| **i == PointerIntent::ReleaseLeft).count();
        assert_eq!(presses, 1);
        assert_eq!(releases, 1);
        // Release comes after the press
        let press_at = all.iter().position(|i| *i == PointerIntent::PressLeft).unwrap();
        let release_at = all.iter().position(|i| *i == PointerIntent::ReleaseLeft).unwrap();
        assert!(press_at < release_at);
    }

    #[test]
    fn test_drag_hold_emits_one_move_per_frame() {
        let engine = interpreter();
        let mut state = InterpreterState::default();
        let obs = hand(HandSide::Left, 0.25, 0.75, 0.03);

        // Activation frame: press only
        let first = engine.interpret(&obs, &mut state);
        assert_eq!(first, vec![PointerIntent::PressLeft]);

        // Identical held frames: exactly one MoveTo each, same coordinates
        for _ in 0..10 {
            let intents = engine.interpret(&obs, &mut state);
            assert_eq!(intents, vec![PointerIntent::MoveTo { x: 250, y: 750 }]);
        }
    }

    #[test]
    fn test_left_scenario_press_move_release() {
        // distance 0.10 -> 0.03 -> 0.03 -> 0.10 over four frames
        let engine = interpreter();
        let mut state = InterpreterState::default();
        let mut all = Vec::new();

        all.extend(engine.interpret(&hand(HandSide::Left, 0.5, 0.5, 0.10), &mut state));
        all.extend(engine.interpret(&hand(HandSide::Left, 0.5, 0.5, 0.03), &mut state));
        all.extend(engine.interpret(&hand(HandSide::Left, 0.5, 0.5, 0.03), &mut state));
        all.extend(engine.interpret(&hand(HandSide::Left, 0.5, 0.5, 0.10), &mut state));

        assert_eq!(
            all,
            vec![
                PointerIntent::PressLeft,
                PointerIntent::MoveTo { x: 500, y: 500 },
                PointerIntent::ReleaseLeft,
            ]
        );
    }

    #[test]
    fn test_first_right_observation_always_moves() {
        let engine = interpreter();
        let mut state = InterpreterState::default();

        let intents = engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.20), &mut state);
        assert_eq!(intents, vec![PointerIntent::MoveTo { x: 500, y: 500 }]);
        assert_eq!(state.prev_index_tip, Some(Point2D::new(0.5, 0.5)));
    }

    #[test]
    fn test_movement_suppression_below_epsilon() {
        let engine = interpreter();
        let mut state = InterpreterState::default();

        engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.20), &mut state);

        // 0.004 normalized movement: suppressed (strictly-greater rule)
        let intents = engine.interpret(&hand(HandSide::Right, 0.504, 0.5, 0.20), &mut state);
        assert!(intents.is_empty());
        // But the stored previous position still advanced
        assert_eq!(state.prev_index_tip, Some(Point2D::new(0.504, 0.5)));

        // Past epsilon: moves
        let intents = engine.interpret(&hand(HandSide::Right, 0.52, 0.5, 0.20), &mut state);
        assert_eq!(intents, vec![PointerIntent::MoveTo { x: 520, y: 500 }]);
    }

    #[test]
    fn test_scroll_anchor_frame_emits_nothing() {
        let engine = interpreter();
        let mut state = InterpreterState::default();

        engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.20), &mut state);

        // Pinch closes: anchor recorded, no scroll this frame
        let intents = engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.03), &mut state);
        assert!(intents.iter().all(|i| !i.is_scroll()));
        assert!(state.scroll_active);
        assert_eq!(state.scroll_anchor, Some((500, 500)));
    }

    #[test]
    fn test_scroll_delta_is_fixed_anchor_cumulative() {
        // Anchor at y=500, hand at y=300: 0.01 * 200 = 2 every held frame
        let engine = interpreter();
        let mut state = InterpreterState::default();

        engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.03), &mut state); // anchor frame

        for _ in 0..5 {
            let intents = engine.interpret(&hand(HandSide::Right, 0.5, 0.3, 0.03), &mut state);
            let scrolls: Vec<_> = intents.iter().filter(|i| i.is_scroll()).collect();
            assert_eq!(scrolls, vec![&PointerIntent::ScrollBy { dy: 2 }]);
            // Anchor never advances while the pinch holds
            assert_eq!(state.scroll_anchor, Some((500, 500)));
        }
    }

    #[test]
    fn test_scroll_deactivates_on_unpinch() {
        let engine = interpreter();
        let mut state = InterpreterState::default();

        engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.03), &mut state);
        engine.interpret(&hand(HandSide::Right, 0.5, 0.3, 0.03), &mut state);

        let intents = engine.interpret(&hand(HandSide::Right, 0.5, 0.3, 0.20), &mut state);
        assert!(intents.iter().all(|i| !i.is_scroll()));
        assert!(!state.scroll_active);
        assert_eq!(state.scroll_anchor, None);
    }

    #[test]
    fn test_open_right_hand_never_scrolls() {
        let engine = interpreter();
        let mut state = InterpreterState::default();
        let mut all = Vec::new();

        // Thumb-index distance 0.20 the whole session, hand wandering
        for i in 0..20 {
            let x = 0.1 + i as f64 * 0.02;
            all.extend(engine.interpret(&hand(HandSide::Right, x, 0.5, 0.20), &mut state));
        }

        assert!(all.iter().all(|i| !i.is_scroll()));
        // Movement well above epsilon each frame: every frame moved
        assert_eq!(all.iter().filter(|i| i.is_move()).count(), 20);
    }

    #[test]
    fn test_scroll_downward_pull_is_negative() {
        let engine = interpreter();
        let mut state = InterpreterState::default();

        engine.interpret(&hand(HandSide::Right, 0.5, 0.3, 0.03), &mut state); // anchor y=300
        let intents = engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.03), &mut state);
        let scrolls: Vec<_> = intents.iter().filter(|i| i.is_scroll()).collect();
        assert_eq!(scrolls, vec![&PointerIntent::ScrollBy { dy: -2 }]);
    }

    #[test]
    fn test_sides_do_not_share_state() {
        let engine = interpreter();
        let mut left = InterpreterState::default();
        let mut right = InterpreterState::default();

        engine.interpret(&hand(HandSide::Left, 0.5, 0.5, 0.03), &mut left);
        engine.interpret(&hand(HandSide::Right, 0.5, 0.5, 0.03), &mut right);

        assert!(left.drag_active && !left.scroll_active);
        assert!(right.scroll_active && !right.drag_active);
    }

    #[test]
    fn test_default_params_match_documented_values() {
        let p = GestureParams::default();
        assert_eq!(p.pinch_threshold, 0.06);
        assert_eq!(p.scroll_threshold, 0.05);
        assert_eq!(p.scroll_sensitivity, 0.01);
        assert_eq!(p.movement_epsilon, 0.005);
        assert_eq!(p.release_after_lost_frames, 0);
    }
}
