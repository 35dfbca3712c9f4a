//! Opens an OpenGL 3.3 core window and draws two textured triangles moving at
//! constant velocity until the window is closed or `Escape` is pressed.
//!
//! The window and video layers each sit on a `Visitor` trait with a real and a
//! headless implementation, so everything above them runs without a GPU.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate cgmath;
extern crate gl;
extern crate glutin;
extern crate image;
extern crate smallvec;

#[macro_use]
pub mod utils;

pub mod errors;
pub mod math;
pub mod settings;

pub mod video;
pub mod window;

pub mod application;
pub mod scene;

pub mod prelude {
    pub use crate::application::{DriverState, Engine, EngineAssets, FrameDriver};
    pub use crate::errors::{Error, Result};
    pub use crate::math::prelude::*;
    pub use crate::scene::SceneObject;
    pub use crate::settings::{AssetParams, EngineParams, Settings, WindowParams};
    pub use crate::video::prelude::*;
    pub use crate::window::prelude::*;
}
