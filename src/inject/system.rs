//! System pointer injection via enigo
//!
//! The one module that actually touches the OS pointer. Screen geometry
//! comes from `rdev::display_size`, with a configured fallback for
//! headless or multi-display setups where autodetection misreports.

use crate::inject::{MouseButton, PointerInjector};
use crate::tracking::types::ScreenSize;
use crate::{Error, Result};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Mouse, Settings};
use tracing::debug;

/// Real pointer injector backed by enigo
pub struct SystemInjector {
    enigo: Enigo,
}

impl SystemInjector {
    pub fn new() -> Result<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| Error::Injection(format!("failed to initialize enigo: {e:?}")))?;
        Ok(Self { enigo })
    }

    /// Detect the primary display size, falling back to `fallback` when
    /// detection is unavailable.
    pub fn detect_screen_size(fallback: ScreenSize) -> ScreenSize {
        match rdev::display_size() {
            Ok((w, h)) => {
                debug!("Detected display size {}x{}", w, h);
                ScreenSize::new(w as u32, h as u32)
            }
            Err(e) => {
                debug!("Display size detection failed ({e:?}), using {}x{}", fallback.width, fallback.height);
                fallback
            }
        }
    }
}

fn map_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

impl PointerInjector for SystemInjector {
    fn set_position(&mut self, x: i32, y: i32) -> Result<()> {
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| Error::Injection(format!("move failed: {e:?}")))
    }

    fn press(&mut self, button: MouseButton) -> Result<()> {
        self.enigo
            .button(map_button(button), Direction::Press)
            .map_err(|e| Error::Injection(format!("press failed: {e:?}")))
    }

    fn release(&mut self, button: MouseButton) -> Result<()> {
        self.enigo
            .button(map_button(button), Direction::Release)
            .map_err(|e| Error::Injection(format!("release failed: {e:?}")))
    }

    fn scroll(&mut self, dx: i32, dy: i32) -> Result<()> {
        if dx != 0 {
            self.enigo
                .scroll(dx, Axis::Horizontal)
                .map_err(|e| Error::Injection(format!("scroll failed: {e:?}")))?;
        }
        if dy != 0 {
            self.enigo
                .scroll(dy, Axis::Vertical)
                .map_err(|e| Error::Injection(format!("scroll failed: {e:?}")))?;
        }
        Ok(())
    }
}
