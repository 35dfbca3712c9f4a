//! The frame loop.
//!
//! `Engine` creates the window, the video system and every GPU object once, then
//! hands each frame to `FrameDriver`, which owns the running state, the frame
//! counter and the scene:
//!
//! 1. drain input,
//! 2. advance the simulation by a fixed step,
//! 3. clear and draw,
//! 4. present.

pub mod driver;
pub mod engine;

pub use self::driver::{DriverState, FrameDriver};
pub use self::engine::{Engine, EngineAssets};
