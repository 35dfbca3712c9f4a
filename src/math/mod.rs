//! This module contains the math utils that mainly comes from `cgmath`.

pub use cgmath::*;

pub mod color;
pub use self::color::Color;

pub mod prelude {
    pub use super::color::Color;
    pub use cgmath::{InnerSpace, Vector2, Zero};
}
