//! Represents an OpenGL context and the window or environment around it.
pub mod events;
pub(crate) mod backends;

pub mod prelude {
    pub use super::events::{Event, Key};
    pub use super::Window;
    pub use crate::settings::WindowParams;
}

use crate::errors::*;
use crate::math::prelude::Vector2;
use crate::settings::WindowParams;

use self::backends::Visitor;
use self::events::Event;

/// The window and its current OpenGL context. Dropping it releases both.
pub struct Window {
    visitor: Box<dyn Visitor>,
}

impl Window {
    /// Creates a window with a OpenGL core context, makes that context current and
    /// loads the OpenGL function table into it.
    pub fn new(params: &WindowParams) -> Result<Self> {
        let visitor = backends::new(params)?;
        Ok(Window { visitor })
    }

    /// Creates a window without any surface. Every poll yields nothing.
    pub fn headless(dimensions: Vector2<u32>) -> Self {
        Window::scripted(dimensions, Vec::new())
    }

    /// Creates a window without any surface, which yields one batch of `frames`
    /// on every poll.
    pub fn scripted(dimensions: Vector2<u32>, frames: Vec<Vec<Event>>) -> Self {
        Window {
            visitor: backends::new_headless(dimensions, frames),
        }
    }

    /// Appends all the pending events to `events`. This never blocks.
    #[inline]
    pub fn poll_events(&mut self, events: &mut Vec<Event>) {
        self.visitor.poll_events(events);
    }

    /// Swaps the buffers in case of double or triple buffering.
    ///
    /// **Warning**: if you enabled vsync, this function will block until the next time the screen
    /// is refreshed.
    pub fn present(&mut self) -> Result<()> {
        self.visitor.swap_buffers()
    }

    /// Returns the size in pixels of the client area of the window.
    #[inline]
    pub fn dimensions(&self) -> Vector2<u32> {
        self.visitor.dimensions()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn scripted() {
        let frames = vec![vec![Event::Resized(300, 200)], vec![Event::Quit]];
        let mut window = Window::scripted(Vector2::new(600, 600), frames);
        assert_eq!(window.dimensions(), Vector2::new(600, 600));

        let mut events = Vec::new();
        window.poll_events(&mut events);
        window.present().unwrap();
        assert_eq!(window.dimensions(), Vector2::new(300, 200));

        window.poll_events(&mut events);
        window.poll_events(&mut events);
        assert_eq!(events, vec![Event::Resized(300, 200), Event::Quit]);
    }
}
