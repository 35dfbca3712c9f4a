//! The two moving objects the demo draws.

use crate::math::prelude::Vector2;

/// A point moving at constant velocity. Only its position is rendered, as the
/// translation of one triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub position: Vector2<f32>,
    pub velocity: Vector2<f32>,
}

impl SceneObject {
    pub fn new(position: Vector2<f32>, velocity: Vector2<f32>) -> Self {
        SceneObject { position, velocity }
    }

    /// Advances the object by one step of `dt` seconds.
    #[inline]
    pub fn simulate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

/// The initial layout: one object drifting up-right from the lower left, one
/// drifting up-left from the lower right.
pub fn default_objects() -> Vec<SceneObject> {
    vec![
        SceneObject::new(Vector2::new(-0.5, -0.5), Vector2::new(0.1, 0.1)),
        SceneObject::new(Vector2::new(0.8, -0.5), Vector2::new(-0.2, 0.15)),
    ]
}
