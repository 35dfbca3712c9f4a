use std::collections::HashSet;

use glutin::GlContext;

use crate::errors::*;
use crate::math::prelude::Vector2;
use crate::video::backends::gl as gl_loader;

use super::super::super::events::{Event, Key};
use super::super::super::WindowParams;
use super::super::Visitor;
use super::types;

pub struct GlutinVisitor {
    window: glutin::GlWindow,
    events_loop: glutin::EventsLoop,
    held: HashSet<Key>,
}

impl GlutinVisitor {
    pub fn new(params: &WindowParams) -> Result<Self> {
        let builder = glutin::WindowBuilder::new()
            .with_title(params.title.clone())
            .with_dimensions(glutin::dpi::LogicalSize::new(
                f64::from(params.size.x),
                f64::from(params.size.y),
            ));

        let (major, minor) = params.gl_version;
        let context = glutin::ContextBuilder::new()
            .with_gl(glutin::GlRequest::Specific(glutin::Api::OpenGl, (major, minor)))
            .with_gl_profile(glutin::GlProfile::Core)
            .with_vsync(params.vsync);

        let events_loop = glutin::EventsLoop::new();
        let window = glutin::GlWindow::new(builder, context, &events_loop).map_err(Error::from)?;

        window.set_position(glutin::dpi::LogicalPosition::new(
            f64::from(params.position.x),
            f64::from(params.position.y),
        ));

        info!(
            "[GlutinVisitor] created window \"{}\" ({}x{}) at ({}, {}).",
            params.title, params.size.x, params.size.y, params.position.x, params.position.y
        );

        let visitor = GlutinVisitor {
            window,
            events_loop,
            held: HashSet::new(),
        };

        visitor.make_current()?;
        gl_loader::load_with(|symbol| visitor.window.get_proc_address(symbol) as *const _)?;
        Ok(visitor)
    }

    fn make_current(&self) -> Result<()> {
        unsafe {
            self.window.make_current().map_err(Error::from)?;
            Ok(())
        }
    }

    #[inline]
    fn dpr(&self) -> f64 {
        self.window.get_hidpi_factor()
    }
}

impl Visitor for GlutinVisitor {
    fn dimensions(&self) -> Vector2<u32> {
        match self.window.get_inner_size() {
            Some(size) => {
                let size = size.to_physical(self.dpr());
                Vector2::new(size.width as u32, size.height as u32)
            }
            None => Vector2::new(0, 0),
        }
    }

    fn poll_events(&mut self, events: &mut Vec<Event>) {
        let dpr = self.dpr();
        let GlutinVisitor {
            ref window,
            ref mut events_loop,
            ref mut held,
        } = *self;

        events_loop.poll_events(|v| {
            if let Some(e) = types::from_event(v, dpr, held) {
                if let Event::Resized(w, h) = e {
                    window.resize(glutin::dpi::PhysicalSize::new(f64::from(w), f64::from(h)));
                }

                events.push(e);
            }
        });
    }

    #[inline]
    fn swap_buffers(&self) -> Result<()> {
        self.window.swap_buffers().map_err(Error::from)?;
        Ok(())
    }
}
