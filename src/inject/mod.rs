//! Pointer injection
//!
//! The narrow seam between gesture intents and the OS pointer. The
//! gesture layer never talks to the OS directly: it emits
//! [`PointerIntent`]s which are dispatched through a [`PointerInjector`].
//! Backends: the real system pointer ([`SystemInjector`]), a log-only
//! injector for dry runs, and a recording injector for tests and replay
//! verification.

pub mod system;

pub use system::SystemInjector;

use crate::gesture::intent::PointerIntent;
use crate::Result;
use tracing::info;

/// Mouse buttons the gesture layer can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// OS-level pointer primitive
///
/// Callers guarantee press/release pairing: a press for a button is
/// followed by exactly one release before the next press.
pub trait PointerInjector {
    /// Move the pointer to absolute screen pixel coordinates
    fn set_position(&mut self, x: i32, y: i32) -> Result<()>;
    /// Press a button
    fn press(&mut self, button: MouseButton) -> Result<()>;
    /// Release a button
    fn release(&mut self, button: MouseButton) -> Result<()>;
    /// Scroll by relative device scroll units
    fn scroll(&mut self, dx: i32, dy: i32) -> Result<()>;
}

/// Forward one intent to an injector
pub fn dispatch<I: PointerInjector + ?Sized>(injector: &mut I, intent: PointerIntent) -> Result<()> {
    match intent {
        PointerIntent::MoveTo { x, y } => injector.set_position(x, y),
        PointerIntent::PressLeft => injector.press(MouseButton::Left),
        PointerIntent::ReleaseLeft => injector.release(MouseButton::Left),
        PointerIntent::ScrollBy { dy } => injector.scroll(0, dy),
    }
}

/// Injector that only logs, for `--dry-run`
#[derive(Debug, Default)]
pub struct TraceInjector;

impl PointerInjector for TraceInjector {
    fn set_position(&mut self, x: i32, y: i32) -> Result<()> {
        info!("pointer -> ({x}, {y})");
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        info!("press {:?}", button);
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        info!("release {:?}", button);
        Ok(())
    }

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<()> {
        info!("scroll ({dx}, {dy})");
        Ok(())
    }
}

/// Injector that records every call, for tests
#[derive(Debug, Default)]
pub struct RecordingInjector {
    /// Calls in dispatch order
    pub calls: Vec<InjectedCall>,
}

/// One recorded injector call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedCall {
    SetPosition { x: i32, y: i32 },
    Press(MouseButton),
    Release(MouseButton),
    Scroll { dx: i32, dy: i32 },
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded button presses
    pub fn presses(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, InjectedCall::Press(_)))
            .count()
    }

    /// Recorded button releases
    pub fn releases(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, InjectedCall::Release(_)))
            .count()
    }
}

impl PointerInjector for RecordingInjector {
    fn set_position(&mut self, x: i32, y: i32) -> Result<()> {
        self.calls.push(InjectedCall::SetPosition { x, y });
        Ok(())
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        self.calls.push(InjectedCall::Press(button));
        Ok(())
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        self.calls.push(InjectedCall::Release(button));
        Ok(())
    }

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.calls.push(InjectedCall::Scroll { dx, dy });
        Ok(())
    }
}
