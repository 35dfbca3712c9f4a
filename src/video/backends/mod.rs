//! The backend of renderer, which should be responsible for only one thing:
//! talking to the GPU through low-level OpenGL video APIs.

pub mod gl;
pub mod headless;

use super::assets::prelude::*;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};

pub trait Visitor {
    /// Creates and compiles a stage. A compile failure is not an error, the stage
    /// is returned with `StageStatus::Failed` holding the driver log.
    unsafe fn create_shader(
        &mut self,
        kind: ShaderKind,
        source: &str,
    ) -> Result<(ShaderHandle, StageStatus)>;

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()>;

    /// Creates an empty program object. Fails with `Error::ProgramCreation` if the
    /// driver hands out a null name.
    unsafe fn create_program(&mut self) -> Result<ProgramHandle>;

    /// Attaches every stage, links, then detaches them again.
    unsafe fn link_program(
        &mut self,
        handle: ProgramHandle,
        stages: &[ShaderHandle],
    ) -> Result<LinkStatus>;

    unsafe fn attribute_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<AttributeLocation>>;

    unsafe fn uniform_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<UniformLocation>>;

    unsafe fn delete_program(&mut self, handle: ProgramHandle) -> Result<()>;

    /// Copies `bytes` into a new static-draw vertex buffer.
    unsafe fn create_vertex_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle>;

    unsafe fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()>;

    /// Creates a vertex array that reads `buffer` through the given attribute
    /// slots. Both the array and the buffer are unbound before returning.
    unsafe fn create_vertex_array(
        &mut self,
        buffer: BufferHandle,
        stride: u8,
        slots: &[(AttributeLocation, VertexAttributeDesc)],
    ) -> Result<VertexArrayHandle>;

    unsafe fn delete_vertex_array(&mut self, handle: VertexArrayHandle) -> Result<()>;

    /// Uploads the base level of a texture, generating mipmaps if asked to.
    unsafe fn create_texture(
        &mut self,
        params: TextureParams,
        bytes: &[u8],
    ) -> Result<TextureHandle>;

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()>;

    /// Sets the viewport to the full `dimensions` and clears the color buffer.
    unsafe fn clear(&mut self, dimensions: Vector2<u32>, color: Color<f32>) -> Result<()>;

    unsafe fn bind_program(&mut self, handle: Option<ProgramHandle>) -> Result<()>;

    unsafe fn bind_vertex_array(&mut self, handle: Option<VertexArrayHandle>) -> Result<()>;

    unsafe fn bind_texture(&mut self, unit: u32, handle: Option<TextureHandle>) -> Result<()>;

    /// Sets a uniform of the currently bound program.
    unsafe fn bind_uniform(
        &mut self,
        location: UniformLocation,
        variable: UniformVariable,
    ) -> Result<()>;

    /// Draws `count` vertices as triangles, starting at `first`.
    unsafe fn draw(&mut self, first: u32, count: u32) -> Result<()>;
}

pub fn new() -> Result<Box<dyn Visitor>> {
    let visitor = unsafe { self::gl::visitor::GLVisitor::new()? };
    Ok(Box::new(visitor))
}

pub fn new_headless(trace: self::headless::Trace) -> Box<dyn Visitor> {
    Box::new(self::headless::HeadlessVisitor::new(trace))
}
