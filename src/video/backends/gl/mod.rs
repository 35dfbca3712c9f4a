pub mod capabilities;
pub mod types;
pub mod visitor;

use std::os::raw::c_void;


use crate::errors::*;

/// Every entry point the crate calls, checked once right after loading.
const REQUIRED: &[(&str, fn() -> bool)] = &[
    ("glGetError", gl::GetError::is_loaded),
    ("glGetString", gl::GetString::is_loaded),
    ("glGetIntegerv", gl::GetIntegerv::is_loaded),
    ("glViewport", gl::Viewport::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glDetachShader", gl::DetachShader::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glGetAttribLocation", gl::GetAttribLocation::is_loaded),
    ("glGetUniformLocation", gl::GetUniformLocation::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glDeleteProgram", gl::DeleteProgram::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glBindVertexArray", gl::BindVertexArray::is_loaded),
    ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
    ("glGenTextures", gl::GenTextures::is_loaded),
    ("glActiveTexture", gl::ActiveTexture::is_loaded),
    ("glBindTexture", gl::BindTexture::is_loaded),
    ("glTexImage2D", gl::TexImage2D::is_loaded),
    ("glTexParameteri", gl::TexParameteri::is_loaded),
    ("glGenerateMipmap", gl::GenerateMipmap::is_loaded),
    ("glPixelStorei", gl::PixelStorei::is_loaded),
    ("glDeleteTextures", gl::DeleteTextures::is_loaded),
    ("glUniform1i", gl::Uniform1i::is_loaded),
    ("glUniform1f", gl::Uniform1f::is_loaded),
    ("glUniform2f", gl::Uniform2f::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
];

/// Loads the OpenGL function table from the current context, then makes sure
/// that every required entry point has been resolved.
pub fn load_with<F>(loader: F) -> Result<()>
where
    F: FnMut(&str) -> *const c_void,
{
    gl::load_with(loader);

    if let Some(v) = REQUIRED.iter().find(|v| !(v.1)()) {
        return Err(Error::FunctionLoad(v.0).into());
    }

    info!("[GL] loaded {} functions.", REQUIRED.len());
    Ok(())
}
