//! The video system: GPU object creation, ownership and per-frame submission.
//!
//! Every object created through `VideoSystem` is registered, and released in
//! reverse creation order when the system is dropped. Bootstrap code can bail out
//! with `?` at any point without leaking GPU state.

pub mod assets;
pub mod backends;
pub mod batch;
pub mod geometry;
pub mod program;
pub mod texture;

pub mod prelude {
    pub use super::assets::prelude::*;
    pub use super::batch::{Batch, DrawCall};
    pub use super::geometry::{GeometryBuffer, VertexArray};
    pub use super::program::{ShaderProgram, ShaderProgramBuilder, ShaderStage};
    pub use super::texture::TextureResource;
    pub use super::VideoSystem;
}

use crate::errors::*;

use self::assets::prelude::*;
use self::backends::headless::Trace;
use self::backends::Visitor;
use self::batch::Batch;

pub struct VideoSystem {
    visitor: Box<dyn Visitor>,
    resources: Vec<Resource>,
}

impl VideoSystem {
    /// Creates a video system on the OpenGL context current in this thread.
    pub fn new() -> Result<Self> {
        let visitor = backends::new()?;
        Ok(VideoSystem::from_visitor(visitor))
    }

    /// Creates a video system without GPU, which records everything into `trace`.
    pub fn headless(trace: Trace) -> Self {
        VideoSystem::from_visitor(backends::new_headless(trace))
    }

    fn from_visitor(visitor: Box<dyn Visitor>) -> Self {
        VideoSystem {
            visitor,
            resources: Vec::new(),
        }
    }

    /// Returns the live GPU objects in creation order.
    #[inline]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn create_shader(
        &mut self,
        kind: ShaderKind,
        source: &str,
    ) -> Result<(ShaderHandle, StageStatus)> {
        let (handle, status) = unsafe { self.visitor.create_shader(kind, source)? };
        self.resources.push(Resource::Shader(handle));
        Ok((handle, status))
    }

    pub fn create_program(&mut self) -> Result<ProgramHandle> {
        let handle = unsafe { self.visitor.create_program()? };
        self.resources.push(Resource::Program(handle));
        Ok(handle)
    }

    pub fn link_program(
        &mut self,
        handle: ProgramHandle,
        stages: &[ShaderHandle],
    ) -> Result<LinkStatus> {
        unsafe { self.visitor.link_program(handle, stages) }
    }

    pub fn attribute_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<AttributeLocation>> {
        unsafe { self.visitor.attribute_location(handle, name) }
    }

    pub fn uniform_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<UniformLocation>> {
        unsafe { self.visitor.uniform_location(handle, name) }
    }

    pub fn create_vertex_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle> {
        let handle = unsafe { self.visitor.create_vertex_buffer(bytes)? };
        self.resources.push(Resource::Buffer(handle));
        Ok(handle)
    }

    pub fn create_vertex_array(
        &mut self,
        buffer: BufferHandle,
        stride: u8,
        slots: &[(AttributeLocation, VertexAttributeDesc)],
    ) -> Result<VertexArrayHandle> {
        let handle = unsafe { self.visitor.create_vertex_array(buffer, stride, slots)? };
        self.resources.push(Resource::VertexArray(handle));
        Ok(handle)
    }

    pub fn create_texture(&mut self, params: TextureParams, bytes: &[u8]) -> Result<TextureHandle> {
        let handle = unsafe { self.visitor.create_texture(params, bytes)? };
        self.resources.push(Resource::Texture(handle));
        Ok(handle)
    }

    /// Releases a GPU object ahead of teardown. Unknown objects are ignored.
    pub fn delete(&mut self, resource: Resource) -> Result<()> {
        match self.resources.iter().rposition(|v| *v == resource) {
            Some(i) => {
                self.resources.remove(i);
                unsafe { Self::release(&mut *self.visitor, resource) }
            }
            None => Ok(()),
        }
    }

    /// Submits the commands recorded in `batch` and clears it. Returns the number
    /// of draw calls issued.
    pub fn submit(&mut self, batch: &mut Batch) -> Result<u32> {
        unsafe { batch.dispatch(&mut *self.visitor) }
    }

    unsafe fn release(visitor: &mut dyn Visitor, resource: Resource) -> Result<()> {
        match resource {
            Resource::Shader(v) => visitor.delete_shader(v),
            Resource::Program(v) => visitor.delete_program(v),
            Resource::Buffer(v) => visitor.delete_buffer(v),
            Resource::VertexArray(v) => visitor.delete_vertex_array(v),
            Resource::Texture(v) => visitor.delete_texture(v),
        }
    }
}

impl Drop for VideoSystem {
    fn drop(&mut self) {
        if !self.resources.is_empty() {
            info!(
                "[VideoSystem] releasing {} GPU objects.",
                self.resources.len()
            );
        }

        while let Some(v) = self.resources.pop() {
            if let Err(err) = unsafe { Self::release(&mut *self.visitor, v) } {
                warn!("[VideoSystem] failed to release {:?}: {}", v, err);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::backends::headless::Op;
    use super::*;

    #[test]
    fn release_in_reverse_order() {
        let trace = Trace::new();

        {
            let mut video = VideoSystem::headless(trace.clone());
            let buffer = video.create_vertex_buffer(&[0; 32]).unwrap();
            let vao = video.create_vertex_array(buffer, 32, &[]).unwrap();
            let program = video.create_program().unwrap();
            assert_eq!(video.resources().len(), 3);

            video.delete(Resource::VertexArray(vao)).unwrap();
            video.delete(Resource::VertexArray(vao)).unwrap();
            assert_eq!(
                video.resources(),
                &[Resource::Buffer(buffer), Resource::Program(program)]
            );

            trace.clear();
        }

        let ops = trace.ops();
        assert_eq!(ops.len(), 2);
        match (&ops[0], &ops[1]) {
            (Op::Delete(Resource::Program(_)), Op::Delete(Resource::Buffer(_))) => {}
            _ => panic!("unexpected release order {:?}", ops),
        }
    }
}
