//! Functions for loading demo settings.

use std::path::PathBuf;

use crate::math::prelude::{Color, Vector2};

/// A structure containing configuration data for the engine, which are used to
/// specify hardware setup stuff to create the window and other context information.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub engine: EngineParams,
    pub window: WindowParams,
    pub assets: AssetParams,
    pub headless: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct EngineParams {
    /// The constant amount of time (in seconds) simulated every frame.
    pub fixed_step: f32,
    /// The color used to clear the back buffer before drawing.
    pub clear_color: Color<f32>,
    /// Prints a `Frame: N` progress line to stdout after every present.
    pub progress: bool,
    /// Treats shader compile or link failures as fatal instead of only reporting them.
    pub strict_shaders: bool,
}

impl Default for EngineParams {
    fn default() -> Self {
        EngineParams {
            fixed_step: 0.02,
            clear_color: Color::red(),
            progress: true,
            strict_shaders: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the position of the window on the desktop.
    pub position: Vector2<i32>,
    /// Sets the size in *points* of the client area of the window. Width and height
    /// are kept equal, the clear and viewport calls assume a square surface.
    pub size: Vector2<u32>,
    /// Sets the requested OpenGL (major, minor) version of core profile.
    pub gl_version: (u8, u8),
    /// Specifies whether should we have vsync.
    pub vsync: bool,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "tritex".to_owned(),
            position: Vector2::new(100, 100),
            size: Vector2::new(600, 600),
            gl_version: (3, 3),
            vsync: false,
        }
    }
}

impl WindowParams {
    /// Uses the file name of executable as window title, stripping both kinds of
    /// path separators.
    pub fn with_title_from_exe<T: AsRef<str>>(mut self, exe: T) -> Self {
        let exe = exe.as_ref();
        let begin = exe.rfind(|c: char| c == '/' || c == '\\').map(|v| v + 1).unwrap_or(0);
        if begin < exe.len() {
            self.title = exe[begin..].to_owned();
        }

        self
    }
}

/// Locations of the assets loaded once during bootstrap, relative to the working
/// directory.
#[derive(Debug, Clone)]
pub struct AssetParams {
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
}

impl Default for AssetParams {
    fn default() -> Self {
        AssetParams {
            vertex_shader: "resources/shaders/vertex.glsl".into(),
            fragment_shader: "resources/shaders/fragment.glsl".into(),
            texture: "resources/textures/logo.png".into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn title_from_exe() {
        let params = WindowParams::default().with_title_from_exe("/usr/local/bin/tritex");
        assert_eq!(params.title, "tritex");

        let params = WindowParams::default().with_title_from_exe("C:\\games\\demo.exe");
        assert_eq!(params.title, "demo.exe");

        let params = WindowParams::default().with_title_from_exe("plain");
        assert_eq!(params.title, "plain");

        let params = WindowParams::default().with_title_from_exe("trailing/");
        assert_eq!(params.title, "tritex");
    }

    #[test]
    fn square_by_default() {
        let params = WindowParams::default();
        assert_eq!(params.size.x, params.size.y);
        assert_eq!(params.gl_version, (3, 3));
    }
}
