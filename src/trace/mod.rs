//! Session traces
//!
//! Defines the serialization format for recorded gesture sessions: the
//! sequence of pointer intents a run produced, with enough metadata to
//! inspect or replay it later without a camera.

use crate::gesture::intent::PointerIntent;
use crate::inject::{dispatch, PointerInjector};
use crate::tracking::types::HandSide;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Current trace format version
pub const CURRENT_FORMAT_VERSION: &str = "1.0";

/// Trace metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceMetadata {
    /// Unique trace ID
    pub id: Uuid,
    /// Trace name
    pub name: String,
    /// Session start time
    pub started_at: DateTime<Utc>,
    /// Session end time
    pub ended_at: Option<DateTime<Utc>>,
    /// Frames processed, including empty ones
    pub frame_count: u64,
    /// Total intents recorded
    pub intent_count: usize,
    /// Version of the trace format
    pub format_version: String,
}

impl TraceMetadata {
    /// Create new metadata for a session
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            started_at: Utc::now(),
            ended_at: None,
            frame_count: 0,
            intent_count: 0,
            format_version: CURRENT_FORMAT_VERSION.to_string(),
        }
    }

    /// Finalize with end time and counters
    pub fn finalize(&mut self, frame_count: u64, intent_count: usize) {
        self.ended_at = Some(Utc::now());
        self.frame_count = frame_count;
        self.intent_count = intent_count;
    }
}

/// One intent with its frame number and originating hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedIntent {
    /// Frame index within the session, starting at 1
    pub frame: u64,
    /// Hand that produced the intent
    pub side: HandSide,
    /// The intent itself
    pub intent: PointerIntent,
}

/// A complete recorded session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTrace {
    /// Trace metadata
    pub metadata: TraceMetadata,
    /// Intents in emission order
    pub intents: Vec<TimedIntent>,
}

impl SessionTrace {
    /// Create a new empty trace
    pub fn new(name: String) -> Self {
        Self {
            metadata: TraceMetadata::new(name),
            intents: Vec::new(),
        }
    }

    /// Record one intent
    pub fn record(&mut self, frame: u64, side: HandSide, intent: PointerIntent) {
        self.intents.push(TimedIntent { frame, side, intent });
    }

    /// Number of recorded intents
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }

    /// Finalize the trace
    pub fn finalize(&mut self, frame_count: u64) {
        self.metadata.finalize(frame_count, self.intents.len());
    }

    /// Save to a file as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let trace: Self = serde_json::from_str(&json)?;
        if trace.metadata.format_version != CURRENT_FORMAT_VERSION {
            return Err(Error::Trace(format!(
                "unsupported trace format version: {}",
                trace.metadata.format_version
            )));
        }
        Ok(trace)
    }

    /// Replay every recorded intent into an injector, honoring frame
    /// boundaries with `frame_delay` between them (zero for as-fast-as-
    /// possible replay).
    pub fn replay<I: PointerInjector + ?Sized>(
        &self,
        injector: &mut I,
        frame_delay: std::time::Duration,
    ) -> Result<()> {
        let mut last_frame = None;
        for timed in &self.intents {
            if !frame_delay.is_zero() {
                if let Some(prev) = last_frame {
                    if timed.frame != prev {
                        std::thread::sleep(frame_delay);
                    }
                }
            }
            last_frame = Some(timed.frame);
            dispatch(injector, timed.intent)?;
        }
        Ok(())
    }
}
