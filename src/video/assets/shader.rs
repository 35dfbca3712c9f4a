//! Shader stages, link results and the named inputs of the textured program.

/// The pipeline stage a shader source is compiled for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
}

/// One row per kind, in declaration order: the diagnostic name and the OpenGL
/// shader type.
const SHADER_KINDS: [(ShaderKind, &str, u32); 3] = [
    (ShaderKind::Vertex, "vertex", gl::VERTEX_SHADER),
    (ShaderKind::Fragment, "fragment", gl::FRAGMENT_SHADER),
    (ShaderKind::Geometry, "geometry", gl::GEOMETRY_SHADER),
];

impl ShaderKind {
    /// Human readable stage name, used in diagnostics.
    #[inline]
    pub fn name(self) -> &'static str {
        SHADER_KINDS[self as usize].1
    }

    /// The `glCreateShader` type of this stage.
    #[inline]
    pub fn gl_enum(self) -> u32 {
        SHADER_KINDS[self as usize].2
    }
}

/// The outcome of compiling one stage. A failed stage keeps the full driver log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageStatus {
    Compiled,
    Failed(String),
}

impl StageStatus {
    #[inline]
    pub fn is_ok(&self) -> bool {
        *self == StageStatus::Compiled
    }
}

/// The outcome of linking a program. A failed link keeps the full driver log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkStatus {
    Linked,
    Failed(String),
}

impl LinkStatus {
    #[inline]
    pub fn is_ok(&self) -> bool {
        *self == LinkStatus::Linked
    }
}

/// Slot index of an active vertex attribute.
pub type AttributeLocation = u32;
/// Slot index of an active uniform.
pub type UniformLocation = i32;

/// The uniforms read by the textured program.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Uniform {
    Translation,
    Sampler,
}

impl Uniform {
    pub const ALL: [Uniform; 2] = [Uniform::Translation, Uniform::Sampler];

    /// The identifier of this uniform in shader source.
    pub fn name(self) -> &'static str {
        match self {
            Uniform::Translation => "translationVector",
            Uniform::Sampler => "textureSampler",
        }
    }
}

/// Uniform variable for video program object.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformVariable {
    I32(i32),
    F32(f32),
    Vector2f([f32; 2]),
}

impl From<i32> for UniformVariable {
    fn from(v: i32) -> Self {
        UniformVariable::I32(v)
    }
}

impl From<f32> for UniformVariable {
    fn from(v: f32) -> Self {
        UniformVariable::F32(v)
    }
}

impl From<crate::math::Vector2<f32>> for UniformVariable {
    fn from(v: crate::math::Vector2<f32>) -> Self {
        UniformVariable::Vector2f(v.into())
    }
}
