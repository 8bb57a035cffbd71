//! # Airmouse
//!
//! A hand-gesture pointer-control engine: an external hand-landmark
//! detector streams per-frame observations, and this library turns them
//! into debounced OS pointer actions.
//!
//! ## Overview
//!
//! The hard part of the system, hand pose estimation from pixels, lives
//! in a MediaPipe sidecar process. This crate consumes its landmark
//! stream, applies distance thresholds with edge-triggered state
//! transitions (a sustained pinch is one press and one release, not a
//! press per frame), and injects the resulting pointer intents.
//!
//! ## Quick Start
//!
//! ```no_run
//! use airmouse::gesture::{GestureParams, GestureSession};
//! use airmouse::inject::{dispatch, RecordingInjector};
//! use airmouse::tracking::{HandObservation, HandSide, Point2D, ScreenSize};
//!
//! let mut session = GestureSession::new(GestureParams::default(), ScreenSize::new(1920, 1080));
//! let mut injector = RecordingInjector::new();
//!
//! // One frame: a Right hand pointing at the screen centre.
//! let obs = HandObservation {
//!     side: HandSide::Right,
//!     index_tip: Point2D::new(0.5, 0.5),
//!     thumb_tip: Point2D::new(0.7, 0.7),
//! };
//! for (_, intent) in session.advance(&[obs]) {
//!     dispatch(&mut injector, intent).expect("injection failed");
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`tracking`]: observation types and the detector seam
//! - [`gesture`]: the per-frame gesture interpreter and session state
//! - [`inject`]: pointer injection backends (system, trace-only, recording)
//! - [`trace`]: recorded sessions, with save/load and replay
//! - [`app`]: CLI, configuration, and the frame loop
//!
//! ## Pipeline
//!
//! ```text
//! ┌─────────────┐    ┌──────────────┐    ┌─────────────┐    ┌─────────────┐
//! │  MediaPipe  │───▶│ Observations │───▶│   Gesture   │───▶│   Pointer   │
//! │   sidecar   │    │  (per frame) │    │ Interpreter │    │  Injector   │
//! └─────────────┘    └──────────────┘    └─────────────┘    └─────────────┘
//!                                               │
//!                                               ▼
//!                                        ┌─────────────┐
//!                                        │Session trace│
//!                                        │ (optional)  │
//!                                        └─────────────┘
//! ```

pub mod app;
pub mod gesture;
pub mod inject;
pub mod trace;
pub mod tracking;

// Re-export commonly used types
pub use gesture::{GestureParams, GestureSession, InterpreterState, PointerIntent};
pub use inject::PointerInjector;
pub use tracking::{HandObservation, HandSide, Point2D, ScreenSize};

/// Result type alias for airmouse
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for airmouse
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Detector error: {0}")]
    Detector(String),

    #[error("Injection error: {0}")]
    Injection(String),

    #[error("Trace error: {0}")]
    Trace(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
