use std::io::{self, Write};

use crate::errors::*;
use crate::scene;
use crate::settings::{EngineParams, Settings};
use crate::video::backends::headless::Trace;
use crate::video::prelude::*;
use crate::video::program::read_source;
use crate::window::prelude::*;

use super::driver::FrameDriver;

/// The inputs loaded once during bootstrap.
pub struct EngineAssets<'a> {
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub image: &'a dyn ImageSource,
}

/// Owns the window, the video system with every GPU object, and the frame driver.
pub struct Engine {
    // GPU objects are released through `video`, which must go before `window`
    // drops the context.
    driver: FrameDriver,
    texture: TextureResource,
    vertex_array: VertexArray,
    geometry: GeometryBuffer,
    program: ShaderProgram,
    video: VideoSystem,
    window: Window,
    params: EngineParams,
    events: Vec<Event>,
}

impl Engine {
    /// Opens the window (or a headless surface), and loads the shaders and the
    /// texture from the paths in `settings`.
    pub fn new(settings: &Settings) -> Result<Self> {
        let (window, video) = if settings.headless {
            let window = Window::headless(settings.window.size);
            (window, VideoSystem::headless(Trace::new()))
        } else {
            let window = Window::new(&settings.window)?;
            let video = VideoSystem::new()?;
            (window, video)
        };

        let image = ImageFile::new(&settings.assets.texture);
        let assets = EngineAssets {
            vertex_shader: read_source(&settings.assets.vertex_shader),
            fragment_shader: read_source(&settings.assets.fragment_shader),
            image: &image,
        };

        Engine::with_assets(settings, window, video, assets)
    }

    /// Builds the program, the triangle geometry and the texture on `video`.
    pub fn with_assets(
        settings: &Settings,
        window: Window,
        mut video: VideoSystem,
        assets: EngineAssets,
    ) -> Result<Self> {
        let params = settings.engine;

        let program = ShaderProgramBuilder::new()
            .strict(params.strict_shaders)
            .build(
                &mut video,
                &[
                    (ShaderKind::Vertex, assets.vertex_shader.as_str()),
                    (ShaderKind::Fragment, assets.fragment_shader.as_str()),
                ],
            )?;

        let geometry = GeometryBuffer::upload(&mut video, &TexturedVertex::TRIANGLE)?;
        let vertex_array = geometry.bind_layout(&mut video, &program)?;
        let texture = TextureResource::load(&mut video, assets.image)?;

        info!(
            "[Engine] ready with {} GPU objects, {}x{} surface.",
            video.resources().len(),
            window.dimensions().x,
            window.dimensions().y
        );

        Ok(Engine {
            driver: FrameDriver::new(params.fixed_step, scene::default_objects()),
            texture,
            vertex_array,
            geometry,
            program,
            video,
            window,
            params,
            events: Vec::new(),
        })
    }

    /// Runs one iteration of the loop. Returns whether the driver is still
    /// running afterwards.
    pub fn tick(&mut self) -> Result<bool> {
        self.events.clear();
        self.window.poll_events(&mut self.events);
        self.driver.handle_input(self.events.drain(..));

        self.driver.simulate();

        let mut batch = Batch::new(self.program.handle(), self.vertex_array.handle);
        batch.clear(self.window.dimensions(), self.params.clear_color);

        if self.program.is_linked() {
            batch.texture(0, self.texture.handle(), self.program.uniform(Uniform::Sampler));
            self.driver.render(
                &mut batch,
                self.program.uniform(Uniform::Translation),
                self.vertex_array.len,
            );
        }

        self.video.submit(&mut batch)?;
        self.window.present()?;

        let frame = self.driver.end_frame();
        if self.params.progress {
            print!("\rFrame: {}", frame);
            if let Err(err) = io::stdout().flush() {
                trace!("[Engine] failed to flush progress: {}", err);
            }
        }

        trace!("[Engine] presented frame {}.", frame);
        Ok(self.driver.is_running())
    }

    /// Runs until a quit request is seen.
    pub fn run(&mut self) -> Result<()> {
        self.driver.start();
        while self.driver.is_running() {
            self.tick()?;
        }

        if self.params.progress {
            println!();
        }

        Ok(())
    }

    /// Runs at most `n` frames, stopping early on a quit request. Returns the
    /// number of frames presented.
    pub fn run_frames(&mut self, n: u64) -> Result<u64> {
        self.driver.start();

        let begin = self.driver.frame();
        while self.driver.is_running() && self.driver.frame() - begin < n {
            self.tick()?;
        }

        Ok(self.driver.frame() - begin)
    }

    #[inline]
    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    #[inline]
    pub fn window(&self) -> &Window {
        &self.window
    }

    #[inline]
    pub fn video(&self) -> &VideoSystem {
        &self.video
    }

    #[inline]
    pub fn program(&self) -> &ShaderProgram {
        &self.program
    }

    #[inline]
    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    #[inline]
    pub fn texture(&self) -> &TextureResource {
        &self.texture
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        info!("[Engine] cleaning up.");
    }
}
