use std::ffi::CString;
use std::os::raw::c_void;

use gl::types::*;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};

use super::super::super::assets::prelude::*;
use super::super::Visitor;
use super::capabilities::Capabilities;
use super::types;

struct GLMutableState {
    binded_program: Option<ProgramHandle>,
    binded_vertex_array: Option<VertexArrayHandle>,
    binded_texture_index: u32,
}

pub struct GLVisitor {
    state: GLMutableState,
    capabilities: Capabilities,
}

impl GLVisitor {
    pub unsafe fn new() -> Result<Self> {
        let capabilities = Capabilities::parse()?;
        info!("[GLVisitor] {:#?}", capabilities);
        capabilities.require(3, 3)?;

        gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
        check()?;

        Ok(GLVisitor {
            state: GLMutableState {
                binded_program: None,
                binded_vertex_array: None,
                binded_texture_index: 0,
            },
            capabilities,
        })
    }
}

impl Visitor for GLVisitor {
    unsafe fn create_shader(
        &mut self,
        kind: ShaderKind,
        source: &str,
    ) -> Result<(ShaderHandle, StageStatus)> {
        let (id, status) = compile(kind.gl_enum(), source)?;
        Ok((ShaderHandle::new(id), status))
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        gl::DeleteShader(handle.index());
        check()
    }

    unsafe fn create_program(&mut self) -> Result<ProgramHandle> {
        let id = gl::CreateProgram();
        if id == 0 {
            check()?;
            return Err(Error::ProgramCreation.into());
        }

        Ok(ProgramHandle::new(id))
    }

    unsafe fn link_program(
        &mut self,
        handle: ProgramHandle,
        stages: &[ShaderHandle],
    ) -> Result<LinkStatus> {
        let status = link(handle.index(), stages.iter().map(|v| v.index()));
        for v in stages {
            gl::DetachShader(handle.index(), v.index());
        }

        check()?;
        Ok(status)
    }

    unsafe fn attribute_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<AttributeLocation>> {
        let c_name = CString::new(name.as_bytes())?;
        let location = gl::GetAttribLocation(handle.index(), c_name.as_ptr());
        check()?;

        if location < 0 {
            Ok(None)
        } else {
            Ok(Some(location as AttributeLocation))
        }
    }

    unsafe fn uniform_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<UniformLocation>> {
        let c_name = CString::new(name.as_bytes())?;
        let location = gl::GetUniformLocation(handle.index(), c_name.as_ptr());
        check()?;

        if location < 0 {
            Ok(None)
        } else {
            Ok(Some(location))
        }
    }

    unsafe fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        if self.state.binded_program == Some(handle) {
            gl::UseProgram(0);
            self.state.binded_program = None;
        }

        gl::DeleteProgram(handle.index());
        check()
    }

    unsafe fn create_vertex_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle> {
        if bytes.is_empty() {
            bail!("[GLVisitor] vertex buffer can not be empty.");
        }

        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        if id == 0 {
            check()?;
            bail!("[GLVisitor] failed to generate buffer object.");
        }

        gl::BindBuffer(gl::ARRAY_BUFFER, id);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            bytes.len() as GLsizeiptr,
            bytes.as_ptr() as *const c_void,
            gl::STATIC_DRAW,
        );
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);

        check()?;
        Ok(BufferHandle::new(id))
    }

    unsafe fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        gl::DeleteBuffers(1, &handle.index());
        check()
    }

    unsafe fn create_vertex_array(
        &mut self,
        buffer: BufferHandle,
        stride: u8,
        slots: &[(AttributeLocation, VertexAttributeDesc)],
    ) -> Result<VertexArrayHandle> {
        let mut vao = 0;
        gl::GenVertexArrays(1, &mut vao);
        if vao == 0 {
            check()?;
            bail!("[GLVisitor] failed to generate vertex array object.");
        }

        gl::BindVertexArray(vao);
        gl::BindBuffer(gl::ARRAY_BUFFER, buffer.index());

        for &(location, element) in slots {
            gl::EnableVertexAttribArray(location);
            gl::VertexAttribPointer(
                location,
                GLint::from(element.size),
                element.format.into(),
                element.normalized as GLboolean,
                GLsizei::from(stride),
                element.offset as usize as *const c_void,
            );
        }

        gl::BindVertexArray(0);
        gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        self.state.binded_vertex_array = None;

        check()?;
        Ok(VertexArrayHandle::new(vao))
    }

    unsafe fn delete_vertex_array(&mut self, handle: VertexArrayHandle) -> Result<()> {
        if self.state.binded_vertex_array == Some(handle) {
            gl::BindVertexArray(0);
            self.state.binded_vertex_array = None;
        }

        gl::DeleteVertexArrays(1, &handle.index());
        check()
    }

    unsafe fn create_texture(
        &mut self,
        params: TextureParams,
        bytes: &[u8],
    ) -> Result<TextureHandle> {
        if bytes.len() != params.len() {
            bail!(
                "[GLVisitor] texture of {}x{} can not be filled with {} bytes.",
                params.dimensions.x,
                params.dimensions.y,
                bytes.len()
            );
        }

        let mut id = 0;
        gl::GenTextures(1, &mut id);
        if id == 0 {
            check()?;
            bail!("[GLVisitor] failed to generate texture object.");
        }

        Self::active_texture(&mut self.state, 0);
        gl::BindTexture(gl::TEXTURE_2D, id);

        gl::TexImage2D(
            gl::TEXTURE_2D,
            0,
            gl::RGBA8 as GLint,
            params.dimensions.x as GLsizei,
            params.dimensions.y as GLsizei,
            0,
            gl::RGBA,
            gl::UNSIGNED_BYTE,
            bytes.as_ptr() as *const c_void,
        );

        if params.mipmap {
            gl::GenerateMipmap(gl::TEXTURE_2D);
        }

        Self::bind_texture_params();
        gl::BindTexture(gl::TEXTURE_2D, 0);

        check()?;
        Ok(TextureHandle::new(id))
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        gl::DeleteTextures(1, &handle.index());
        check()
    }

    unsafe fn clear(&mut self, dimensions: Vector2<u32>, color: Color<f32>) -> Result<()> {
        gl::Viewport(0, 0, dimensions.x as GLsizei, dimensions.y as GLsizei);
        gl::ClearColor(color.r, color.g, color.b, color.a);
        gl::Clear(gl::COLOR_BUFFER_BIT);
        check()
    }

    unsafe fn bind_program(&mut self, handle: Option<ProgramHandle>) -> Result<()> {
        if self.state.binded_program == handle {
            return Ok(());
        }

        gl::UseProgram(handle.map(|v| v.index()).unwrap_or(0));
        self.state.binded_program = handle;
        check()
    }

    unsafe fn bind_vertex_array(&mut self, handle: Option<VertexArrayHandle>) -> Result<()> {
        if self.state.binded_vertex_array == handle {
            return Ok(());
        }

        gl::BindVertexArray(handle.map(|v| v.index()).unwrap_or(0));
        self.state.binded_vertex_array = handle;
        check()
    }

    unsafe fn bind_texture(&mut self, unit: u32, handle: Option<TextureHandle>) -> Result<()> {
        if unit >= self.capabilities.max_combined_texture_image_units {
            bail!(
                "[GLVisitor] texture unit {} is out of range (< {}).",
                unit,
                self.capabilities.max_combined_texture_image_units
            );
        }

        Self::active_texture(&mut self.state, unit);
        gl::BindTexture(gl::TEXTURE_2D, handle.map(|v| v.index()).unwrap_or(0));
        check()
    }

    unsafe fn bind_uniform(
        &mut self,
        location: UniformLocation,
        variable: UniformVariable,
    ) -> Result<()> {
        match variable {
            UniformVariable::I32(v) => gl::Uniform1i(location, v),
            UniformVariable::F32(v) => gl::Uniform1f(location, v),
            UniformVariable::Vector2f(v) => gl::Uniform2f(location, v[0], v[1]),
        }

        check()
    }

    unsafe fn draw(&mut self, first: u32, count: u32) -> Result<()> {
        gl::DrawArrays(gl::TRIANGLES, first as GLint, count as GLsizei);
        check()
    }
}

impl GLVisitor {
    unsafe fn active_texture(state: &mut GLMutableState, index: u32) {
        if state.binded_texture_index != index {
            state.binded_texture_index = index;
            gl::ActiveTexture(gl::TEXTURE0 + index);
        }
    }

    /// Repeat wrapping with linear min and mag filtering.
    unsafe fn bind_texture_params() {
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
        gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
    }
}

/// Compiles `source`. The stage object is kept even if compilation fails, with the
/// complete info log attached.
unsafe fn compile(kind: GLenum, source: &str) -> Result<(GLuint, StageStatus)> {
    let c_str = CString::new(source.as_bytes());

    let shader = gl::CreateShader(kind);
    if shader == 0 {
        check()?;
        bail!("[GLVisitor] failed to create shader object.");
    }

    let c_str = match c_str {
        Ok(v) => v,
        Err(err) => {
            let log = format!("source contains a NUL byte at {}.", err.nul_position());
            return Ok((shader, StageStatus::Failed(log)));
        }
    };

    gl::ShaderSource(shader, 1, &c_str.as_ptr(), ::std::ptr::null());
    gl::CompileShader(shader);

    let mut status = GLint::from(gl::FALSE);
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len = 0;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl::GetShaderInfoLog(
            shader,
            buf.len() as GLsizei,
            &mut written,
            buf.as_mut_ptr() as *mut GLchar,
        );

        buf.truncate(written as usize);
        let log = String::from_utf8_lossy(&buf).into_owned();
        return Ok((shader, StageStatus::Failed(log)));
    }

    Ok((shader, StageStatus::Compiled))
}

unsafe fn link<T>(program: GLuint, shaders: T) -> LinkStatus
where
    T: IntoIterator<Item = GLuint>,
{
    for shader in shaders {
        gl::AttachShader(program, shader)
    }

    gl::LinkProgram(program);

    let mut status = GLint::from(gl::FALSE);
    gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

    if status != GLint::from(gl::TRUE) {
        let mut len: GLint = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buf = vec![0u8; len.max(1) as usize];
        let mut written = 0;
        gl::GetProgramInfoLog(
            program,
            buf.len() as GLsizei,
            &mut written,
            buf.as_mut_ptr() as *mut GLchar,
        );

        buf.truncate(written as usize);
        LinkStatus::Failed(String::from_utf8_lossy(&buf).into_owned())
    } else {
        LinkStatus::Linked
    }
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => {
            bail!("[GL] An unacceptable value is specified for an enumerated argument.")
        }

        gl::INVALID_VALUE => bail!("[GL] A numeric argument is out of range."),

        gl::INVALID_OPERATION => {
            bail!("[GL] The specified operation is not allowed in the current state.")
        }

        gl::INVALID_FRAMEBUFFER_OPERATION => bail!(
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        ),

        gl::OUT_OF_MEMORY => bail!("[GL] There is not enough memory left to execute the command."),
        _ => bail!("[GL] Oops, Unknown OpenGL error."),
    }
}
