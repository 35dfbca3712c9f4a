use smallvec::SmallVec;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};
use crate::utils::finally;

use super::assets::prelude::*;
use super::backends::Visitor;

type Uniforms = SmallVec<[(UniformLocation, UniformVariable); 4]>;

/// A draw call.
#[derive(Debug, Clone)]
pub struct DrawCall {
    pub first: u32,
    pub count: u32,
    uniforms: Uniforms,
}

impl DrawCall {
    /// Creates a new draw call of `count` vertices starting at `first`.
    pub fn new(first: u32, count: u32) -> Self {
        DrawCall {
            first,
            count,
            uniforms: SmallVec::new(),
        }
    }

    /// Binds the named uniform variable for this draw only. Absent locations are
    /// skipped.
    pub fn set_uniform<T>(&mut self, location: Option<UniformLocation>, variable: T) -> &mut Self
    where
        T: Into<UniformVariable>,
    {
        if let Some(location) = location {
            let variable = variable.into();
            match self.uniforms.iter_mut().find(|v| v.0 == location) {
                Some(v) => v.1 = variable,
                None => self.uniforms.push((location, variable)),
            }
        }

        self
    }

    #[inline]
    pub fn uniforms(&self) -> &[(UniformLocation, UniformVariable)] {
        &self.uniforms
    }
}

/// One render pass over a single program and vertex array. Draws are issued in
/// the order they were recorded.
pub struct Batch {
    program: ProgramHandle,
    vertex_array: VertexArrayHandle,
    clear: Option<(Vector2<u32>, Color<f32>)>,
    textures: SmallVec<[(u32, TextureHandle, Option<UniformLocation>); 4]>,
    draws: Vec<DrawCall>,
}

impl Batch {
    /// Creates a new and empty `Batch`.
    pub fn new(program: ProgramHandle, vertex_array: VertexArrayHandle) -> Self {
        Batch {
            program,
            vertex_array,
            clear: None,
            textures: SmallVec::new(),
            draws: Vec::with_capacity(8),
        }
    }

    /// Resets the viewport to `dimensions` and clears the color buffer before any draw.
    #[inline]
    pub fn clear(&mut self, dimensions: Vector2<u32>, color: Color<f32>) {
        self.clear = Some((dimensions, color));
    }

    /// Binds `texture` to `unit`, and points the `sampler` uniform at that unit.
    pub fn texture(
        &mut self,
        unit: u32,
        texture: TextureHandle,
        sampler: Option<UniformLocation>,
    ) -> &mut Self {
        self.textures.retain(|v| v.0 != unit);
        self.textures.push((unit, texture, sampler));
        self
    }

    #[inline]
    pub fn draw(&mut self, dc: DrawCall) {
        self.draws.push(dc);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Executes the pass and clears the recorded draws. The program and vertex
    /// array are unbound before returning, whether the pass succeeded or not.
    pub(crate) unsafe fn dispatch(&mut self, visitor: &mut dyn Visitor) -> Result<u32> {
        if let Some((dimensions, color)) = self.clear.take() {
            visitor.clear(dimensions, color)?;
        }

        if self.draws.is_empty() {
            return Ok(0);
        }

        visitor.bind_program(Some(self.program))?;

        let mut guard = finally(visitor, |v| {
            if let Err(err) = v.bind_vertex_array(None) {
                warn!("[Batch] failed to unbind vertex array: {}", err);
            }

            if let Err(err) = v.bind_program(None) {
                warn!("[Batch] failed to unbind program: {}", err);
            }
        });

        let visitor = guard.get_mut();
        visitor.bind_vertex_array(Some(self.vertex_array))?;

        for &(unit, texture, sampler) in &self.textures {
            visitor.bind_texture(unit, Some(texture))?;
            if let Some(location) = sampler {
                visitor.bind_uniform(location, UniformVariable::I32(unit as i32))?;
            }
        }

        let mut dc = 0;
        for v in self.draws.drain(..) {
            for &(location, variable) in v.uniforms.iter() {
                visitor.bind_uniform(location, variable)?;
            }

            visitor.draw(v.first, v.count)?;
            dc += 1;
        }

        Ok(dc)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn uniforms_are_replaced() {
        let mut dc = DrawCall::new(0, 3);
        dc.set_uniform(Some(1), 0.5f32)
            .set_uniform(None, 2.0f32)
            .set_uniform(Some(1), 1.5f32);

        assert_eq!(dc.uniforms(), &[(1, UniformVariable::F32(1.5))]);
    }
}
