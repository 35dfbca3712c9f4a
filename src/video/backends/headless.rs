//! A video backend without GPU. Object names are handed out sequentially and
//! every state change or draw is appended to a shared `Trace`.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

use super::super::assets::prelude::*;
use super::Visitor;

use crate::errors::*;
use crate::math::prelude::{Color, Vector2};

/// The state visible to a single draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub program: ProgramHandle,
    pub vertex_array: VertexArrayHandle,
    pub textures: Vec<(u32, TextureHandle)>,
    pub first: u32,
    pub count: u32,
    /// Every uniform of the bound program that has been set, by location.
    pub uniforms: Vec<(UniformLocation, UniformVariable)>,
}

impl DrawRecord {
    /// Returns the value of the uniform at `location` when this draw was issued.
    pub fn uniform(&self, location: UniformLocation) -> Option<UniformVariable> {
        self.uniforms
            .iter()
            .find(|v| v.0 == location)
            .map(|v| v.1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Create(Resource),
    Delete(Resource),
    UploadTexture {
        handle: TextureHandle,
        params: TextureParams,
        bytes: Vec<u8>,
    },
    DescribeVertexArray {
        handle: VertexArrayHandle,
        buffer: BufferHandle,
        stride: u8,
        slots: Vec<(AttributeLocation, VertexAttributeDesc)>,
    },
    Clear {
        dimensions: Vector2<u32>,
        color: Color<f32>,
    },
    BindProgram(Option<ProgramHandle>),
    BindVertexArray(Option<VertexArrayHandle>),
    BindTexture(u32, Option<TextureHandle>),
    BindUniform(UniformLocation, UniformVariable),
    Draw(DrawRecord),
}

/// A shared, append-only log of the operations a `HeadlessVisitor` received.
#[derive(Debug, Clone, Default)]
pub struct Trace(Rc<RefCell<Vec<Op>>>);

impl Trace {
    pub fn new() -> Self {
        Trace::default()
    }

    /// Returns a copy of every recorded operation.
    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    /// Returns the draws in submission order.
    pub fn draws(&self) -> Vec<DrawRecord> {
        self.0
            .borrow()
            .iter()
            .filter_map(|v| match *v {
                Op::Draw(ref dc) => Some(dc.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns the number of recorded operations matching `func`.
    pub fn count<F: Fn(&Op) -> bool>(&self, func: F) -> usize {
        self.0.borrow().iter().filter(|v| func(v)).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, op: Op) {
        self.0.borrow_mut().push(op);
    }
}

struct StageData {
    kind: ShaderKind,
    source: String,
    compiled: bool,
}

#[derive(Default)]
struct ProgramData {
    linked: bool,
    attributes: Vec<String>,
    uniforms: Vec<String>,
    values: BTreeMap<UniformLocation, UniformVariable>,
}

pub struct HeadlessVisitor {
    trace: Trace,
    next: u32,
    stages: HashMap<ShaderHandle, StageData>,
    programs: HashMap<ProgramHandle, ProgramData>,
    buffers: HashSet<BufferHandle>,
    vertex_arrays: HashSet<VertexArrayHandle>,
    textures: HashSet<TextureHandle>,
    binded_program: Option<ProgramHandle>,
    binded_vertex_array: Option<VertexArrayHandle>,
    binded_textures: BTreeMap<u32, TextureHandle>,
}

impl HeadlessVisitor {
    pub fn new(trace: Trace) -> Self {
        HeadlessVisitor {
            trace,
            next: 0,
            stages: HashMap::new(),
            programs: HashMap::new(),
            buffers: HashSet::new(),
            vertex_arrays: HashSet::new(),
            textures: HashSet::new(),
            binded_program: None,
            binded_vertex_array: None,
            binded_textures: BTreeMap::new(),
        }
    }

    fn alloc(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    fn program(&self, handle: ProgramHandle) -> Result<&ProgramData> {
        match self.programs.get(&handle) {
            Some(v) => Ok(v),
            None => bail!("[HeadlessVisitor] {} is not a program.", handle),
        }
    }
}

/// Collects the names declared with `qualifier` at global scope, in declaration order.
fn declarations(source: &str, qualifier: &str) -> Vec<String> {
    let source: Vec<&str> = source
        .lines()
        .filter(|v| !v.trim_start().starts_with('#'))
        .map(|v| v.split("//").next().unwrap_or(""))
        .collect();
    let source = source.join("\n");

    let mut names = Vec::new();
    for statement in source.split(|c| c == ';' || c == '{' || c == '}') {
        let mut tokens: Vec<&str> = statement.split_whitespace().collect();
        if tokens.first().map(|v| v.starts_with("layout")).unwrap_or(false) {
            let close = tokens.iter().position(|v| v.ends_with(')')).unwrap_or(0);
            tokens.drain(..=close);
        }

        if tokens.len() >= 3 && tokens[0] == qualifier {
            let name = tokens[tokens.len() - 1];
            let name = name.split('[').next().unwrap_or(name);
            names.push(name.to_owned());
        }
    }

    names
}

impl Visitor for HeadlessVisitor {
    unsafe fn create_shader(
        &mut self,
        kind: ShaderKind,
        source: &str,
    ) -> Result<(ShaderHandle, StageStatus)> {
        let handle = ShaderHandle::new(self.alloc());
        let status = if let Some(i) = source.find('\0') {
            StageStatus::Failed(format!("source contains a NUL byte at {}.", i))
        } else if !source.contains("void main") {
            StageStatus::Failed(format!(
                "0:1(1): error: {} shader does not define `main`.",
                kind.name()
            ))
        } else {
            StageStatus::Compiled
        };

        let compiled = status.is_ok();

        self.stages.insert(
            handle,
            StageData {
                kind,
                source: source.to_owned(),
                compiled,
            },
        );

        self.trace.push(Op::Create(Resource::Shader(handle)));
        Ok((handle, status))
    }

    unsafe fn delete_shader(&mut self, handle: ShaderHandle) -> Result<()> {
        if self.stages.remove(&handle).is_none() {
            bail!("[HeadlessVisitor] {} is not a shader.", handle);
        }

        self.trace.push(Op::Delete(Resource::Shader(handle)));
        Ok(())
    }

    unsafe fn create_program(&mut self) -> Result<ProgramHandle> {
        let handle = ProgramHandle::new(self.alloc());
        self.programs.insert(handle, ProgramData::default());
        self.trace.push(Op::Create(Resource::Program(handle)));
        Ok(handle)
    }

    unsafe fn link_program(
        &mut self,
        handle: ProgramHandle,
        stages: &[ShaderHandle],
    ) -> Result<LinkStatus> {
        self.program(handle)?;

        let mut attributes = Vec::new();
        let mut uniforms = Vec::new();
        let mut errors = Vec::new();
        let mut has_vertex = false;

        for v in stages {
            let stage = match self.stages.get(v) {
                Some(stage) => stage,
                None => bail!("[HeadlessVisitor] {} is not a shader.", v),
            };

            if !stage.compiled {
                errors.push(format!("{} shader is not compiled.", stage.kind.name()));
                continue;
            }

            if stage.kind == ShaderKind::Vertex {
                has_vertex = true;
                attributes.extend(declarations(&stage.source, "in"));
            }

            for name in declarations(&stage.source, "uniform") {
                if !uniforms.contains(&name) {
                    uniforms.push(name);
                }
            }
        }

        if !has_vertex && errors.is_empty() {
            errors.push("missing vertex shader.".to_owned());
        }

        let program = self
            .programs
            .get_mut(&handle)
            .ok_or_else(|| format_err!("[HeadlessVisitor] {} is not a program.", handle))?;

        if errors.is_empty() {
            program.linked = true;
            program.attributes = attributes;
            program.uniforms = uniforms;
            Ok(LinkStatus::Linked)
        } else {
            program.linked = false;
            Ok(LinkStatus::Failed(format!("error: {}", errors.join(" "))))
        }
    }

    unsafe fn attribute_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<AttributeLocation>> {
        let program = self.program(handle)?;
        Ok(program
            .attributes
            .iter()
            .position(|v| v == name)
            .map(|v| v as AttributeLocation))
    }

    unsafe fn uniform_location(
        &mut self,
        handle: ProgramHandle,
        name: &str,
    ) -> Result<Option<UniformLocation>> {
        let program = self.program(handle)?;
        Ok(program
            .uniforms
            .iter()
            .position(|v| v == name)
            .map(|v| v as UniformLocation))
    }

    unsafe fn delete_program(&mut self, handle: ProgramHandle) -> Result<()> {
        if self.programs.remove(&handle).is_none() {
            bail!("[HeadlessVisitor] {} is not a program.", handle);
        }

        if self.binded_program == Some(handle) {
            self.binded_program = None;
        }

        self.trace.push(Op::Delete(Resource::Program(handle)));
        Ok(())
    }

    unsafe fn create_vertex_buffer(&mut self, bytes: &[u8]) -> Result<BufferHandle> {
        if bytes.is_empty() {
            bail!("[HeadlessVisitor] vertex buffer can not be empty.");
        }

        let handle = BufferHandle::new(self.alloc());
        self.buffers.insert(handle);
        self.trace.push(Op::Create(Resource::Buffer(handle)));
        Ok(handle)
    }

    unsafe fn delete_buffer(&mut self, handle: BufferHandle) -> Result<()> {
        if !self.buffers.remove(&handle) {
            bail!("[HeadlessVisitor] {} is not a buffer.", handle);
        }

        self.trace.push(Op::Delete(Resource::Buffer(handle)));
        Ok(())
    }

    unsafe fn create_vertex_array(
        &mut self,
        buffer: BufferHandle,
        stride: u8,
        slots: &[(AttributeLocation, VertexAttributeDesc)],
    ) -> Result<VertexArrayHandle> {
        if !self.buffers.contains(&buffer) {
            bail!("[HeadlessVisitor] {} is not a buffer.", buffer);
        }

        let handle = VertexArrayHandle::new(self.alloc());
        self.vertex_arrays.insert(handle);
        self.trace.push(Op::Create(Resource::VertexArray(handle)));
        self.trace.push(Op::DescribeVertexArray {
            handle,
            buffer,
            stride,
            slots: slots.to_vec(),
        });

        Ok(handle)
    }

    unsafe fn delete_vertex_array(&mut self, handle: VertexArrayHandle) -> Result<()> {
        if !self.vertex_arrays.remove(&handle) {
            bail!("[HeadlessVisitor] {} is not a vertex array.", handle);
        }

        if self.binded_vertex_array == Some(handle) {
            self.binded_vertex_array = None;
        }

        self.trace.push(Op::Delete(Resource::VertexArray(handle)));
        Ok(())
    }

    unsafe fn create_texture(
        &mut self,
        params: TextureParams,
        bytes: &[u8],
    ) -> Result<TextureHandle> {
        if bytes.len() != params.len() {
            bail!(
                "[HeadlessVisitor] texture of {}x{} can not be filled with {} bytes.",
                params.dimensions.x,
                params.dimensions.y,
                bytes.len()
            );
        }

        let handle = TextureHandle::new(self.alloc());
        self.textures.insert(handle);
        self.trace.push(Op::Create(Resource::Texture(handle)));
        self.trace.push(Op::UploadTexture {
            handle,
            params,
            bytes: bytes.to_vec(),
        });

        Ok(handle)
    }

    unsafe fn delete_texture(&mut self, handle: TextureHandle) -> Result<()> {
        if !self.textures.remove(&handle) {
            bail!("[HeadlessVisitor] {} is not a texture.", handle);
        }

        self.binded_textures.retain(|_, v| *v != handle);
        self.trace.push(Op::Delete(Resource::Texture(handle)));
        Ok(())
    }

    unsafe fn clear(&mut self, dimensions: Vector2<u32>, color: Color<f32>) -> Result<()> {
        self.trace.push(Op::Clear { dimensions, color });
        Ok(())
    }

    unsafe fn bind_program(&mut self, handle: Option<ProgramHandle>) -> Result<()> {
        if let Some(handle) = handle {
            if !self.program(handle)?.linked {
                bail!("[HeadlessVisitor] {} is not linked.", handle);
            }
        }

        self.binded_program = handle;
        self.trace.push(Op::BindProgram(handle));
        Ok(())
    }

    unsafe fn bind_vertex_array(&mut self, handle: Option<VertexArrayHandle>) -> Result<()> {
        if let Some(handle) = handle {
            if !self.vertex_arrays.contains(&handle) {
                bail!("[HeadlessVisitor] {} is not a vertex array.", handle);
            }
        }

        self.binded_vertex_array = handle;
        self.trace.push(Op::BindVertexArray(handle));
        Ok(())
    }

    unsafe fn bind_texture(&mut self, unit: u32, handle: Option<TextureHandle>) -> Result<()> {
        match handle {
            Some(handle) => {
                if !self.textures.contains(&handle) {
                    bail!("[HeadlessVisitor] {} is not a texture.", handle);
                }

                self.binded_textures.insert(unit, handle);
            }
            None => {
                self.binded_textures.remove(&unit);
            }
        }

        self.trace.push(Op::BindTexture(unit, handle));
        Ok(())
    }

    unsafe fn bind_uniform(
        &mut self,
        location: UniformLocation,
        variable: UniformVariable,
    ) -> Result<()> {
        let handle = match self.binded_program {
            Some(v) => v,
            None => bail!("[HeadlessVisitor] no program is bound."),
        };

        let program = self
            .programs
            .get_mut(&handle)
            .ok_or_else(|| format_err!("[HeadlessVisitor] {} is not a program.", handle))?;

        if location < 0 || location as usize >= program.uniforms.len() {
            bail!(
                "[HeadlessVisitor] {} has no uniform at location {}.",
                handle,
                location
            );
        }

        program.values.insert(location, variable);
        self.trace.push(Op::BindUniform(location, variable));
        Ok(())
    }

    unsafe fn draw(&mut self, first: u32, count: u32) -> Result<()> {
        let program = match self.binded_program {
            Some(v) => v,
            None => bail!("[HeadlessVisitor] draw without a program."),
        };

        let vertex_array = match self.binded_vertex_array {
            Some(v) => v,
            None => bail!("[HeadlessVisitor] draw without a vertex array."),
        };

        let uniforms = self
            .program(program)?
            .values
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect();

        let textures = self.binded_textures.iter().map(|(k, v)| (*k, *v)).collect();

        self.trace.push(Op::Draw(DrawRecord {
            program,
            vertex_array,
            textures,
            first,
            count,
            uniforms,
        }));

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reflection() {
        let source = r"
            #version 330 core
            layout(location = 0) in vec2 position;
            in vec4 vertexColor;
            uniform vec2 translationVector;
            uniform sampler2D textures[2];
            void main() { gl_Position = vec4(position + translationVector, 0.0, 1.0); }
        ";

        assert_eq!(declarations(source, "in"), vec!["position", "vertexColor"]);
        assert_eq!(
            declarations(source, "uniform"),
            vec!["translationVector", "textures"]
        );
    }

    #[test]
    fn draw_requires_bindings() {
        let trace = Trace::new();
        let mut visitor = HeadlessVisitor::new(trace.clone());
        unsafe {
            assert!(visitor.draw(0, 3).is_err());
            assert!(visitor.bind_uniform(0, UniformVariable::I32(0)).is_err());
            assert!(visitor.delete_texture(TextureHandle::new(9)).is_err());
        }

        assert!(trace.draws().is_empty());
    }
}
