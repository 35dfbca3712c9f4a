//! Descriptions of the GPU objects, without any backend state.

pub mod image;
pub mod mesh;
pub mod shader;
pub mod texture;

impl_handle!(ShaderHandle);
impl_handle!(ProgramHandle);
impl_handle!(BufferHandle);
impl_handle!(VertexArrayHandle);
impl_handle!(TextureHandle);

/// Any GPU object owned by the video system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Shader(ShaderHandle),
    Program(ProgramHandle),
    Buffer(BufferHandle),
    VertexArray(VertexArrayHandle),
    Texture(TextureHandle),
}

pub mod prelude {
    pub use super::image::{invert_rows, ImageFile, ImageSource, PixelBuffer};
    pub use super::mesh::{
        TexturedVertex, VertexAttribute, VertexAttributeDesc, VertexFormat, VertexLayout,
        VertexLayoutBuilder,
    };
    pub use super::shader::{
        AttributeLocation, LinkStatus, ShaderKind, StageStatus, Uniform, UniformLocation,
        UniformVariable,
    };
    pub use super::texture::TextureParams;
    pub use super::{
        BufferHandle, ProgramHandle, Resource, ShaderHandle, TextureHandle, VertexArrayHandle,
    };
}
