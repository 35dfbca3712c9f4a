//! Compiles shader stages and links them into the textured program.

use std::fs;
use std::path::Path;

use crate::errors::*;

use super::assets::prelude::*;
use super::VideoSystem;

/// A compiled, not yet linked, shader stage.
#[derive(Debug, Clone)]
pub struct ShaderStage {
    pub kind: ShaderKind,
    pub handle: ShaderHandle,
    pub status: StageStatus,
}

/// A program object with its resolved attribute and uniform slots. Slots which
/// the linker dropped, or never saw, are `None`.
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    status: LinkStatus,
    attributes: [Option<AttributeLocation>; 3],
    uniforms: [Option<UniformLocation>; 2],
}

impl ShaderProgram {
    #[inline]
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    #[inline]
    pub fn status(&self) -> &LinkStatus {
        &self.status
    }

    #[inline]
    pub fn is_linked(&self) -> bool {
        self.status.is_ok()
    }

    pub fn attribute(&self, attribute: VertexAttribute) -> Option<AttributeLocation> {
        self.attributes[attribute as usize]
    }

    pub fn uniform(&self, uniform: Uniform) -> Option<UniformLocation> {
        self.uniforms[uniform as usize]
    }
}

/// Builds a `ShaderProgram` out of shader sources.
///
/// By default compile and link failures are reported through `error!` and the
/// program is still returned, unlinked. In strict mode they are returned as
/// `Error::ShaderCompilation` and `Error::ProgramLink` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShaderProgramBuilder {
    strict: bool,
}

impl ShaderProgramBuilder {
    pub fn new() -> Self {
        ShaderProgramBuilder::default()
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Compiles `source` as a stage of `kind`.
    pub fn compile(
        &self,
        video: &mut VideoSystem,
        kind: ShaderKind,
        source: &str,
    ) -> Result<ShaderStage> {
        let (handle, status) = video.create_shader(kind, source)?;

        if let StageStatus::Failed(ref log) = status {
            error!("[ShaderProgramBuilder] compile failure in {} shader:\n{}", kind.name(), log);

            if self.strict {
                let err = Error::ShaderCompilation(kind.name(), log.clone());
                video.delete(Resource::Shader(handle))?;
                return Err(err.into());
            }
        }

        Ok(ShaderStage {
            kind,
            handle,
            status,
        })
    }

    /// Links `stages` into a program. Every stage is detached and deleted
    /// afterwards, whatever the outcome.
    pub fn link(&self, video: &mut VideoSystem, stages: Vec<ShaderStage>) -> Result<ShaderProgram> {
        if stages.is_empty() {
            return Err(Error::ProgramLink("no shader stage to link.".to_owned()).into());
        }

        let handles: Vec<_> = stages.iter().map(|v| v.handle).collect();
        let linked = video
            .create_program()
            .and_then(|program| Ok((program, video.link_program(program, &handles)?)));

        for v in handles {
            video.delete(Resource::Shader(v))?;
        }

        let (handle, status) = linked?;
        let mut program = ShaderProgram {
            handle,
            status,
            attributes: [None; 3],
            uniforms: [None; 2],
        };

        if let LinkStatus::Failed(ref log) = program.status {
            error!("[ShaderProgramBuilder] linker failure: {}", log);

            if self.strict {
                let err = Error::ProgramLink(log.clone());
                video.delete(Resource::Program(handle))?;
                return Err(err.into());
            }

            return Ok(program);
        }

        for &v in VertexAttribute::ALL.iter() {
            program.attributes[v as usize] = video.attribute_location(handle, v.name())?;
            if program.attributes[v as usize].is_none() {
                warn!("[ShaderProgramBuilder] attribute `{}` is not active.", v.name());
            }
        }

        for &v in Uniform::ALL.iter() {
            program.uniforms[v as usize] = video.uniform_location(handle, v.name())?;
            if program.uniforms[v as usize].is_none() {
                warn!("[ShaderProgramBuilder] uniform `{}` is not active.", v.name());
            }
        }

        info!("[ShaderProgramBuilder] linked {}.", handle);
        Ok(program)
    }

    /// Compiles every `(kind, source)` pair and links the results.
    pub fn build(
        &self,
        video: &mut VideoSystem,
        sources: &[(ShaderKind, &str)],
    ) -> Result<ShaderProgram> {
        let mut stages = Vec::with_capacity(sources.len());
        for &(kind, source) in sources {
            match self.compile(video, kind, source) {
                Ok(stage) => stages.push(stage),
                Err(err) => {
                    for v in stages {
                        video.delete(Resource::Shader(v.handle))?;
                    }

                    return Err(err);
                }
            }
        }

        self.link(video, stages)
    }
}

/// Reads a shader source file. A missing or unreadable file is reported and
/// yields an empty source, which then fails to compile.
pub fn read_source<T: AsRef<Path>>(path: T) -> String {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            error!(
                "[ShaderProgramBuilder] could not read shader source {}: {}",
                path.display(),
                err
            );
            String::new()
        }
    }
}
