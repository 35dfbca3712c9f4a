mod headless;

use crate::errors::*;
use crate::math::prelude::Vector2;

use super::events::Event;
use super::WindowParams;

pub trait Visitor {
    /// Returns the size in pixels of the framebuffer.
    fn dimensions(&self) -> Vector2<u32>;
    /// Drains every pending event without blocking.
    fn poll_events(&mut self, events: &mut Vec<Event>);
    fn swap_buffers(&self) -> Result<()>;
}

pub fn new_headless(dimensions: Vector2<u32>, frames: Vec<Vec<Event>>) -> Box<dyn Visitor> {
    Box::new(self::headless::HeadlessVisitor::new(dimensions, frames))
}

mod glutin;

pub fn new(params: &WindowParams) -> Result<Box<dyn Visitor>> {
    let visitor = self::glutin::GlutinVisitor::new(params)?;
    Ok(Box::new(visitor))
}
