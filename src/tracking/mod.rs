//! Hand tracking input layer
//!
//! Observation types produced by the external hand-landmark detector and
//! the detector seam itself. Nothing in here estimates pose: the model
//! runs in a sidecar process and this module only speaks its protocol.

pub mod detector;
pub mod types;

pub use detector::{HandDetector, SubprocessDetector};
pub use types::{landmarks, HandObservation, HandSide, Point2D, ScreenSize};
