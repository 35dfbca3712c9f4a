use crate::errors::*;

use super::assets::prelude::*;
use super::program::ShaderProgram;
use super::VideoSystem;

/// Interleaved vertex records uploaded once into a static-draw buffer.
#[derive(Debug, Clone, Copy)]
pub struct GeometryBuffer {
    buffer: BufferHandle,
    layout: VertexLayout,
    len: u32,
    size: usize,
}

/// A vertex array binding a `GeometryBuffer` to the attribute slots of a program.
#[derive(Debug, Clone, Copy)]
pub struct VertexArray {
    pub handle: VertexArrayHandle,
    /// Number of vertices reachable through this array.
    pub len: u32,
}

impl GeometryBuffer {
    /// Copies `vertices` into a new GPU buffer.
    pub fn upload(video: &mut VideoSystem, vertices: &[TexturedVertex]) -> Result<Self> {
        if vertices.is_empty() {
            bail!("[GeometryBuffer] refusing to upload an empty vertex array.");
        }

        let bytes = TexturedVertex::as_bytes(vertices);
        let buffer = video.create_vertex_buffer(bytes)?;

        Ok(GeometryBuffer {
            buffer,
            layout: TexturedVertex::layout(),
            len: vertices.len() as u32,
            size: bytes.len(),
        })
    }

    #[inline]
    pub fn handle(&self) -> BufferHandle {
        self.buffer
    }

    #[inline]
    pub fn layout(&self) -> &VertexLayout {
        &self.layout
    }

    /// Number of vertex records.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Size of the buffer in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Describes how `program` reads this buffer. Elements whose attribute is not
    /// active in `program` are skipped.
    pub fn bind_layout(&self, video: &mut VideoSystem, program: &ShaderProgram) -> Result<VertexArray> {
        let slots: Vec<_> = self
            .layout
            .iter()
            .filter_map(|v| match program.attribute(v.attribute) {
                Some(location) => Some((location, v)),
                None => {
                    warn!(
                        "[GeometryBuffer] skips attribute `{}` without slot.",
                        v.attribute.name()
                    );
                    None
                }
            })
            .collect();

        let handle = video.create_vertex_array(self.buffer, self.layout.stride(), &slots)?;
        Ok(VertexArray {
            handle,
            len: self.len,
        })
    }
}
