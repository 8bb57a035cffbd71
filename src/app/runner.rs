//! The frame loop
//!
//! Drives one gesture session: pull a frame of observations from the
//! detector, advance the session, forward the intents to the injector,
//! and optionally record them to a trace. The loop itself is generic
//! over the detector and injector seams so it runs in tests against
//! canned frames and a recording injector.

use crate::gesture::GestureSession;
use crate::inject::{dispatch, PointerInjector};
use crate::trace::SessionTrace;
use crate::tracking::detector::HandDetector;
use crate::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Options for one run
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after this many seconds (0 = until stopped)
    pub duration_secs: u64,
    /// Record intents to a trace with this name
    pub trace_name: Option<String>,
}

/// Run the frame loop until the stop flag is set, the duration elapses,
/// or the detector stream ends. Returns the recorded trace, if any.
pub fn run_session<D, I>(
    detector: &mut D,
    injector: &mut I,
    session: &mut GestureSession,
    options: &RunOptions,
    stop: &AtomicBool,
) -> Result<Option<SessionTrace>>
where
    D: HandDetector + ?Sized,
    I: PointerInjector + ?Sized,
{
    let started = Instant::now();
    let mut trace = options.trace_name.clone().map(SessionTrace::new);

    loop {
        if stop.load(Ordering::SeqCst) {
            info!("Stop requested");
            break;
        }
        if options.duration_secs > 0 && started.elapsed().as_secs() >= options.duration_secs {
            info!("Session duration reached");
            break;
        }

        let Some(observations) = detector.next_frame()? else {
            info!("Detector stream ended");
            break;
        };

        for (side, intent) in session.advance(&observations) {
            debug!("{side}: {intent}");
            dispatch(injector, intent)?;
            if let Some(trace) = &mut trace {
                trace.record(session.frame_count(), side, intent);
            }
        }
    }

    let frames = session.frame_count();
    info!(
        "Session ended after {:.1}s, {} frames",
        started.elapsed().as_secs_f64(),
        frames
    );

    if let Some(trace) = &mut trace {
        trace.finalize(frames);
    }
    Ok(trace)
}
