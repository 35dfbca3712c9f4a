use std::collections::VecDeque;

use crate::errors::*;
use crate::math::prelude::Vector2;

use super::super::events::Event;
use super::Visitor;

/// A window without any surface. Each poll yields the next scripted batch of
/// events, or nothing once the script is exhausted.
pub struct HeadlessVisitor {
    dimensions: Vector2<u32>,
    frames: VecDeque<Vec<Event>>,
}

impl HeadlessVisitor {
    pub fn new(dimensions: Vector2<u32>, frames: Vec<Vec<Event>>) -> Self {
        HeadlessVisitor {
            dimensions,
            frames: frames.into(),
        }
    }
}

impl Visitor for HeadlessVisitor {
    #[inline]
    fn dimensions(&self) -> Vector2<u32> {
        self.dimensions
    }

    fn poll_events(&mut self, events: &mut Vec<Event>) {
        if let Some(batch) = self.frames.pop_front() {
            for v in batch {
                if let Event::Resized(w, h) = v {
                    self.dimensions = Vector2::new(w, h);
                }

                events.push(v);
            }
        }
    }

    #[inline]
    fn swap_buffers(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn one_batch_per_poll() {
        let mut visitor = HeadlessVisitor::new(
            Vector2::new(4, 4),
            vec![vec![Event::Resized(8, 2), Event::Quit], vec![]],
        );

        let mut events = Vec::new();
        visitor.poll_events(&mut events);
        assert_eq!(events, vec![Event::Resized(8, 2), Event::Quit]);
        assert_eq!(visitor.dimensions(), Vector2::new(8, 2));

        events.clear();
        visitor.poll_events(&mut events);
        visitor.poll_events(&mut events);
        assert!(events.is_empty());
    }
}
