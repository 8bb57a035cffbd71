//! Integration tests for the gesture pipeline
//!
//! These tests verify the complete flow:
//! Observation stream -> Gesture session -> Intent dispatch -> Injector

use airmouse::gesture::{GestureParams, GestureSession, PointerIntent};
use airmouse::inject::{dispatch, InjectedCall, MouseButton, RecordingInjector};
use airmouse::tracking::{HandObservation, HandSide, Point2D, ScreenSize};

const SCREEN: ScreenSize = ScreenSize {
    width: 1920,
    height: 1080,
};

/// A hand with its index tip at (x, y) and thumb `pinch` away on the x axis
fn hand(side: HandSide, x: f64, y: f64, pinch: f64) -> HandObservation {
    HandObservation {
        side,
        index_tip: Point2D::new(x, y),
        thumb_tip: Point2D::new(x + pinch, y),
    }
}

/// Drive a scripted sequence of frames through a session and an injector
fn drive(session: &mut GestureSession, injector: &mut RecordingInjector, frames: &[Vec<HandObservation>]) {
    for frame in frames {
        for (_, intent) in session.advance(frame) {
            dispatch(injector, intent).expect("injection failed");
        }
    }
}

#[test]
fn test_point_and_click_session() {
    let mut session = GestureSession::new(GestureParams::default(), SCREEN);
    let mut injector = RecordingInjector::new();

    drive(
        &mut session,
        &mut injector,
        &[
            // Right hand steers the pointer to a target
            vec![hand(HandSide::Right, 0.25, 0.25, 0.20)],
            vec![hand(HandSide::Right, 0.50, 0.50, 0.20)],
            // Left hand joins and clicks while the right hand rests
            vec![
                hand(HandSide::Right, 0.50, 0.50, 0.20),
                hand(HandSide::Left, 0.30, 0.60, 0.03),
            ],
            vec![
                hand(HandSide::Right, 0.50, 0.50, 0.20),
                hand(HandSide::Left, 0.30, 0.60, 0.10),
            ],
        ],
    );

    assert_eq!(
        injector.calls,
        vec![
            InjectedCall::SetPosition { x: 480, y: 270 },
            InjectedCall::SetPosition { x: 960, y: 540 },
            // Resting right hand is below the movement epsilon: no move
            InjectedCall::Press(MouseButton::Left),
            InjectedCall::Release(MouseButton::Left),
        ]
    );
}

#[test]
fn test_drag_session_tracks_pointer() {
    let mut session = GestureSession::new(GestureParams::default(), SCREEN);
    let mut injector = RecordingInjector::new();

    drive(
        &mut session,
        &mut injector,
        &[
            vec![hand(HandSide::Left, 0.10, 0.10, 0.03)], // press
            vec![hand(HandSide::Left, 0.20, 0.20, 0.03)], // drag
            vec![hand(HandSide::Left, 0.30, 0.30, 0.03)], // drag
            vec![hand(HandSide::Left, 0.30, 0.30, 0.10)], // release
        ],
    );

    assert_eq!(
        injector.calls,
        vec![
            InjectedCall::Press(MouseButton::Left),
            InjectedCall::SetPosition { x: 384, y: 216 },
            InjectedCall::SetPosition { x: 576, y: 324 },
            InjectedCall::Release(MouseButton::Left),
        ]
    );
}

#[test]
fn test_scroll_session_cumulative_delta() {
    let mut session = GestureSession::new(GestureParams::default(), SCREEN);
    let mut injector = RecordingInjector::new();

    drive(
        &mut session,
        &mut injector,
        &[
            // Approach, then pinch at y = 0.5 (anchor y = 540)
            vec![hand(HandSide::Right, 0.50, 0.50, 0.20)],
            vec![hand(HandSide::Right, 0.50, 0.50, 0.03)],
            // Pull up to y = 0.25 (y = 270): delta = 0.01 * (540 - 270) = 2
            vec![hand(HandSide::Right, 0.50, 0.25, 0.03)],
            // Hold there: same delta again, anchor unchanged
            vec![hand(HandSide::Right, 0.50, 0.25, 0.03)],
            // Open the pinch: scrolling stops
            vec![hand(HandSide::Right, 0.50, 0.25, 0.20)],
        ],
    );

    let scrolls: Vec<_> = injector
        .calls
        .iter()
        .filter(|c| matches!(c, InjectedCall::Scroll { .. }))
        .collect();
    assert_eq!(
        scrolls,
        vec![
            &InjectedCall::Scroll { dx: 0, dy: 2 },
            &InjectedCall::Scroll { dx: 0, dy: 2 },
        ]
    );
}

#[test]
fn test_hands_alternate_without_interference() {
    let mut session = GestureSession::new(GestureParams::default(), SCREEN);
    let mut injector = RecordingInjector::new();

    // A full left-hand click while the right hand scrolls: both state
    // machines run side by side off the same frames
    drive(
        &mut session,
        &mut injector,
        &[
            vec![
                hand(HandSide::Right, 0.50, 0.50, 0.03),
                hand(HandSide::Left, 0.20, 0.20, 0.03),
            ],
            vec![
                hand(HandSide::Right, 0.50, 0.30, 0.03),
                hand(HandSide::Left, 0.20, 0.20, 0.03),
            ],
            vec![
                hand(HandSide::Right, 0.50, 0.30, 0.20),
                hand(HandSide::Left, 0.20, 0.20, 0.10),
            ],
        ],
    );

    assert_eq!(injector.presses(), 1);
    assert_eq!(injector.releases(), 1);
    assert_eq!(
        injector
            .calls
            .iter()
            .filter(|c| matches!(c, InjectedCall::Scroll { .. }))
            .count(),
        1
    );
}

#[test]
fn test_repeated_clicks_pair_press_release() {
    let mut session = GestureSession::new(GestureParams::default(), SCREEN);
    let mut injector = RecordingInjector::new();

    // Three quick pinch-release cycles
    let mut frames = Vec::new();
    for _ in 0..3 {
        frames.push(vec![hand(HandSide::Left, 0.5, 0.5, 0.03)]);
        frames.push(vec![hand(HandSide::Left, 0.5, 0.5, 0.10)]);
    }
    drive(&mut session, &mut injector, &frames);

    assert_eq!(injector.presses(), 3);
    assert_eq!(injector.releases(), 3);

    // Strict alternation: press, release, press, release...
    let edges: Vec<_> = injector
        .calls
        .iter()
        .filter(|c| matches!(c, InjectedCall::Press(_) | InjectedCall::Release(_)))
        .collect();
    for pair in edges.chunks(2) {
        assert!(matches!(pair[0], InjectedCall::Press(_)));
        assert!(matches!(pair[1], InjectedCall::Release(_)));
    }
}

#[test]
fn test_lost_hand_hardening_end_to_end() {
    let params = GestureParams {
        release_after_lost_frames: 2,
        ..Default::default()
    };
    let mut session = GestureSession::new(params, SCREEN);
    let mut injector = RecordingInjector::new();

    drive(
        &mut session,
        &mut injector,
        &[
            vec![hand(HandSide::Left, 0.5, 0.5, 0.03)], // press
            vec![],                                     // lost 1
            vec![],                                     // lost 2: forced release
            vec![],
        ],
    );

    assert_eq!(
        injector.calls,
        vec![
            InjectedCall::Press(MouseButton::Left),
            InjectedCall::Release(MouseButton::Left),
        ]
    );
}

#[test]
fn test_intent_stream_matches_injector_calls() {
    // The same script interpreted twice: once collecting intents, once
    // dispatched; dispatch must be a 1:1 mapping
    let script = [
        vec![hand(HandSide::Right, 0.1, 0.1, 0.20)],
        vec![hand(HandSide::Right, 0.9, 0.9, 0.03)],
        vec![hand(HandSide::Right, 0.9, 0.5, 0.03)],
    ];

    let mut session_a = GestureSession::new(GestureParams::default(), SCREEN);
    let mut intents = Vec::new();
    for frame in &script {
        intents.extend(session_a.advance(frame).into_iter().map(|(_, i)| i));
    }

    let mut session_b = GestureSession::new(GestureParams::default(), SCREEN);
    let mut injector = RecordingInjector::new();
    drive(&mut session_b, &mut injector, &script);

    assert_eq!(intents.len(), injector.calls.len());
    for (intent, call) in intents.iter().zip(&injector.calls) {
        match (intent, call) {
            (PointerIntent::MoveTo { x, y }, InjectedCall::SetPosition { x: cx, y: cy }) => {
                assert_eq!((x, y), (cx, cy));
            }
            (PointerIntent::PressLeft, InjectedCall::Press(MouseButton::Left)) => {}
            (PointerIntent::ReleaseLeft, InjectedCall::Release(MouseButton::Left)) => {}
            (PointerIntent::ScrollBy { dy }, InjectedCall::Scroll { dx: 0, dy: cdy }) => {
                assert_eq!(dy, cdy);
            }
            other => panic!("intent/call mismatch: {other:?}"),
        }
    }
}
