
use std::{fmt, path::{Path, PathBuf}};
use anyhow::Context;
use super::{ogl::*, reader::ShaderSource};

// ------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage
{
    Vertex,
    Fragment
}

impl ShaderStage
{
    pub fn kind(self) -> GLenum
    {
        match self
        {
            Self::Vertex => VERTEX_SHADER,
            Self::Fragment => FRAGMENT_SHADER
        }
    }
}

impl fmt::Display for ShaderStage
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::Vertex => write!(formatter, "vertex"),
            Self::Fragment => write!(formatter, "fragment")
        }
    }
}

// ------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ShaderSpec
{
    pub path: PathBuf,
    pub stage: ShaderStage
}

impl ShaderSpec
{
    pub fn new<P: AsRef<Path>>(path: P, stage: ShaderStage) -> Self
    {
        Self{path: path.as_ref().to_owned(), stage}
    }

    fn describe(&self) -> String
    {
        format!("{} shader {}", self.stage, self.path.display())
    }
}

// ------------------------------------------------------------

pub fn load_source(spec: &ShaderSpec, capacity: usize) -> anyhow::Result<ShaderSource>
{
    ShaderSource::load(&spec.path, capacity)
        .with_context(|| format!("Failed to load shader source of {}", spec.describe()))
}

pub fn load_shader
(
    pointers: &FunctionPointers,
    spec: &ShaderSpec,
    capacity: usize
) -> anyhow::Result<Shader>
{
    let source = load_source(spec, capacity)?;
    let shader = compile_shader(pointers, spec.stage.kind(), &source.text)
        .with_context(|| format!("Failed to compile {}", spec.describe()))?;
    log::debug!("compiled {} ({} bytes)", source.path.display(), source.text.len());
    Ok(shader)
}

// ------------------------------------------------------------

/// Compiles every stage, links them and makes the result the current program.
/// The individual shader objects are released once linking is done.
pub fn create_shader_program
(
    pointers: &FunctionPointers,
    specs: &[ShaderSpec],
    capacity: usize
) -> anyhow::Result<Program>
{
    let shaders = specs.iter()
        .map(|spec| load_shader(pointers, spec, capacity))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let program = link_program(pointers, &shaders.iter().collect::<Vec<_>>())
        .context("Failed to link shader program")?;
    program.activate();
    Ok(program)
}

// ------------------------------------------------------------
