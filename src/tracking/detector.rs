//! Hand detector seam
//!
//! The landmark model runs in a sidecar process (MediaPipe behind a small
//! Python script) that owns the camera and streams one JSON line per
//! captured frame. This module launches the sidecar, performs the READY
//! handshake, and parses its output into [`HandObservation`]s.
//!
//! # Protocol
//!
//! First line from the sidecar is `READY`. After that, one line per frame:
//!
//! ```text
//! {"hands":[{"handedness":"Right","score":0.93,"landmarks":[{"x":..,"y":..,"z":..} x21]}]}
//! ```
//!
//! An empty `hands` array is a normal no-detection tick. A present hand
//! with the wrong landmark count is a hard error: silently substituting
//! defaults would mask detector bugs.

use crate::tracking::types::{landmarks, HandObservation, HandSide, Point2D};
use crate::{Error, Result};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Read};
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::{debug, info, warn};

/// Source of per-frame hand observations
///
/// One call per frame, in frame order. `Ok(Some(vec![]))` means the frame
/// was captured but no hand was detected: a normal tick, not an error.
/// `Ok(None)` means the stream has ended (sidecar exited cleanly).
pub trait HandDetector {
    /// Block until the next frame's observations are available
    fn next_frame(&mut self) -> Result<Option<Vec<HandObservation>>>;
}

/// Wire format: one landmark from the sidecar
#[derive(Deserialize, Debug)]
struct LandmarkWire {
    x: f64,
    y: f64,
    #[allow(dead_code)]
    #[serde(default)]
    z: f64,
}

/// Wire format: one detected hand
#[derive(Deserialize, Debug)]
struct HandWire {
    handedness: String,
    score: f64,
    landmarks: Vec<LandmarkWire>,
}

/// Wire format: one frame
#[derive(Deserialize, Debug)]
struct FrameWire {
    hands: Vec<HandWire>,
    #[serde(default)]
    error: Option<String>,
}

/// Hand detector backed by a sidecar subprocess
pub struct SubprocessDetector {
    process: Child,
    stdout: BufReader<ChildStdout>,
    /// Hands scoring below this are skipped
    min_confidence: f64,
}

impl SubprocessDetector {
    /// Spawn the sidecar and wait for its READY handshake.
    ///
    /// `command` is the full argv of the sidecar, e.g.
    /// `["python3", "scripts/hand_stream.py"]`.
    pub fn spawn(command: &[String], min_confidence: f64) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| Error::Config("detector command is empty".to_string()))?;

        info!("Starting hand detector sidecar: {:?}", command);

        let mut process = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| Error::Detector(format!("failed to start sidecar {program:?}: {e}")))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| Error::Detector("failed to capture sidecar stdout".to_string()))?;
        let mut stdout = BufReader::new(stdout);

        let mut ready_line = String::new();
        stdout.read_line(&mut ready_line)?;
        if ready_line.trim() != "READY" {
            let _ = process.kill();
            return Err(Error::Detector(format!(
                "sidecar did not signal ready, got: {}",
                ready_line.trim()
            )));
        }

        info!("Hand detector ready");

        Ok(Self {
            process,
            stdout,
            min_confidence,
        })
    }

    /// Build a detector from an already-open observation stream.
    ///
    /// Used by tests and by `replay`-style tooling that feeds canned
    /// frames; the protocol is identical minus the READY line.
    pub fn from_reader<R: Read + Send + 'static>(reader: R, min_confidence: f64) -> PipedDetector {
        PipedDetector {
            lines: Box::new(BufReader::new(reader)),
            min_confidence,
        }
    }

    fn parse_frame(line: &str, min_confidence: f64) -> Result<Vec<HandObservation>> {
        let frame: FrameWire = serde_json::from_str(line)
            .map_err(|e| Error::Detector(format!("malformed frame line: {e}")))?;

        if let Some(err) = frame.error {
            // Sidecar-side transient capture failure: skip the frame
            warn!("Detector reported: {}", err);
            return Ok(Vec::new());
        }

        let mut observations = Vec::with_capacity(frame.hands.len());
        for hand in frame.hands {
            if hand.score < min_confidence {
                debug!(
                    "Skipping {} hand below confidence threshold ({:.2})",
                    hand.handedness, hand.score
                );
                continue;
            }

            let side = HandSide::from_label(&hand.handedness).ok_or_else(|| {
                Error::Detector(format!("unknown handedness label: {}", hand.handedness))
            })?;

            if hand.landmarks.len() != landmarks::COUNT {
                return Err(Error::Detector(format!(
                    "expected {} landmarks for {} hand, got {}",
                    landmarks::COUNT,
                    side,
                    hand.landmarks.len()
                )));
            }

            let index = &hand.landmarks[landmarks::INDEX_FINGER_TIP];
            let thumb = &hand.landmarks[landmarks::THUMB_TIP];
            observations.push(HandObservation {
                side,
                index_tip: Point2D::new(index.x, index.y),
                thumb_tip: Point2D::new(thumb.x, thumb.y),
            });
        }

        Ok(observations)
    }
}

impl HandDetector for SubprocessDetector {
    fn next_frame(&mut self) -> Result<Option<Vec<HandObservation>>> {
        let mut line = String::new();
        let n = self.stdout.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        Self::parse_frame(&line, self.min_confidence).map(Some)
    }
}

impl Drop for SubprocessDetector {
    fn drop(&mut self) {
        // Kill the sidecar when the detector is dropped
        let _ = self.process.kill();
    }
}

/// Detector reading frames from an arbitrary stream (no subprocess)
pub struct PipedDetector {
    lines: Box<dyn BufRead + Send>,
    min_confidence: f64,
}

impl HandDetector for PipedDetector {
    fn next_frame(&mut self) -> Result<Option<Vec<HandObservation>>> {
        let mut line = String::new();
        let n = self.lines.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        SubprocessDetector::parse_frame(&line, self.min_confidence).map(Some)
    }
}
