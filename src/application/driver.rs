use crate::math::prelude::Vector2;
use crate::scene::SceneObject;
use crate::video::prelude::{Batch, DrawCall, UniformLocation};
use crate::window::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Created, no frame has run yet.
    Idle,
    Running,
    /// A quit request was seen. The current frame still completes.
    Terminating,
}

/// The steady-state part of the loop: input, fixed-step simulation, draw
/// recording and frame accounting. Knows nothing about the window or GPU.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: DriverState,
    frame: u64,
    fixed_step: f32,
    objects: Vec<SceneObject>,
}

impl FrameDriver {
    pub fn new(fixed_step: f32, objects: Vec<SceneObject>) -> Self {
        FrameDriver {
            state: DriverState::Idle,
            frame: 0,
            fixed_step,
            objects,
        }
    }

    /// Enters `Running` from `Idle`. Has no effect in any other state.
    pub fn start(&mut self) {
        if self.state == DriverState::Idle {
            self.state = DriverState::Running;
        }
    }

    #[inline]
    pub fn state(&self) -> DriverState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// Number of frames presented so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn fixed_step(&self) -> f32 {
        self.fixed_step
    }

    #[inline]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Consumes every event of this tick and returns how many there were. An idle
    /// driver starts running first. A close request or the first press of `Escape`
    /// moves a running driver to `Terminating`. Key repeats and every other event
    /// are ignored.
    pub fn handle_input<T>(&mut self, events: T) -> usize
    where
        T: IntoIterator<Item = Event>,
    {
        self.start();

        let mut consumed = 0;
        for v in events {
            consumed += 1;

            if v.is_quit() && self.state == DriverState::Running {
                info!("[FrameDriver] quit requested by {:?}.", v);
                self.state = DriverState::Terminating;
            }
        }

        consumed
    }

    /// Advances every object by one fixed step.
    pub fn simulate(&mut self) {
        let dt = self.fixed_step;
        for v in &mut self.objects {
            v.simulate(dt);
        }
    }

    /// Records one draw of `count` vertices per object, in insertion order, each
    /// with its own position as translation.
    pub fn render(&self, batch: &mut Batch, translation: Option<UniformLocation>, count: u32) {
        for v in &self.objects {
            let mut dc = DrawCall::new(0, count);
            dc.set_uniform(translation, v.position);
            batch.draw(dc);
        }
    }

    /// Accounts for a presented frame and returns its zero-based index.
    pub fn end_frame(&mut self) -> u64 {
        let index = self.frame;
        self.frame += 1;
        index
    }

    /// Returns the translation each object would be drawn with.
    pub fn translations(&self) -> Vec<Vector2<f32>> {
        self.objects.iter().map(|v| v.position).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::window::events::Key;

    #[test]
    fn states() {
        let mut driver = FrameDriver::new(0.02, vec![]);
        assert_eq!(driver.state(), DriverState::Idle);

        driver.start();
        assert!(driver.is_running());

        driver.handle_input(vec![Event::KeyUp { key: Key::Escape }]);
        assert!(driver.is_running());

        driver.handle_input(vec![Event::Quit]);
        assert_eq!(driver.state(), DriverState::Terminating);

        driver.start();
        assert_eq!(driver.state(), DriverState::Terminating);
    }

    #[test]
    fn first_poll_starts_the_driver() {
        let mut driver = FrameDriver::new(0.02, vec![]);
        assert_eq!(driver.handle_input(vec![]), 0);
        assert!(driver.is_running());

        let mut driver = FrameDriver::new(0.02, vec![]);
        assert_eq!(driver.handle_input(vec![Event::Quit]), 1);
        assert_eq!(driver.state(), DriverState::Terminating);
    }

    #[test]
    fn frames() {
        let mut driver = FrameDriver::new(0.02, vec![]);
        assert_eq!(driver.frame(), 0);
        assert_eq!(driver.end_frame(), 0);
        assert_eq!(driver.end_frame(), 1);
        assert_eq!(driver.frame(), 2);
    }
}
