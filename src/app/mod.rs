//! Windowed demo runners.
//!
//! Each demo is configured with a builder and blocks in `run()` until its
//! window is closed:
//!
//! ```ignore
//! use stardust::prelude::*;
//!
//! GalaxyDemo::new()
//!     .with_params(GalaxyParams::new(100_000, 4, 1.2))
//!     .run()?;
//! ```

mod ant;
mod galaxy;

pub use ant::AntDemo;
pub use galaxy::GalaxyDemo;

use std::sync::Arc;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::error::DemoError;

pub(crate) fn create_window(
    event_loop: &ActiveEventLoop,
    title: &str,
    size: (u32, u32),
) -> Result<Arc<Window>, DemoError> {
    let window_attrs = Window::default_attributes()
        .with_title(title)
        .with_inner_size(winit::dpi::LogicalSize::new(size.0, size.1));
    Ok(Arc::new(event_loop.create_window(window_attrs)?))
}

/// Left-button drag tracking.
#[derive(Debug, Default)]
pub(crate) struct MouseDrag {
    pressed: bool,
    last: Option<(f64, f64)>,
}

impl MouseDrag {
    pub fn button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.pressed = state == ElementState::Pressed;
            if !self.pressed {
                self.last = None;
            }
        }
    }

    /// Cursor moved; returns the drag delta in pixels while pressed.
    pub fn moved(&mut self, position: PhysicalPosition<f64>) -> Option<(f32, f32)> {
        if !self.pressed {
            return None;
        }
        let delta = self
            .last
            .map(|(x, y)| ((position.x - x) as f32, (position.y - y) as f32));
        self.last = Some((position.x, position.y));
        delta
    }
}

/// Wheel movement in lines.
pub(crate) fn scroll_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_needs_press() {
        let mut drag = MouseDrag::default();
        assert_eq!(drag.moved(PhysicalPosition::new(10.0, 10.0)), None);

        drag.button(MouseButton::Left, ElementState::Pressed);
        // First move after press only records the position.
        assert_eq!(drag.moved(PhysicalPosition::new(10.0, 10.0)), None);
        assert_eq!(drag.moved(PhysicalPosition::new(14.0, 7.0)), Some((4.0, -3.0)));

        drag.button(MouseButton::Left, ElementState::Released);
        assert_eq!(drag.moved(PhysicalPosition::new(20.0, 20.0)), None);
    }

    #[test]
    fn test_other_buttons_ignored() {
        let mut drag = MouseDrag::default();
        drag.button(MouseButton::Right, ElementState::Pressed);
        drag.moved(PhysicalPosition::new(0.0, 0.0));
        assert_eq!(drag.moved(PhysicalPosition::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_scroll_lines() {
        assert_eq!(scroll_lines(MouseScrollDelta::LineDelta(0.0, 2.0)), 2.0);
        assert_eq!(
            scroll_lines(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 30.0))),
            3.0
        );
    }
}
