
use std::{ffi::{CStr, c_void}, ops::Deref, rc::Rc, fmt};

// ----------------------------------------------------------------------------------------------------

mod bindings{include!{concat!{env!{"OUT_DIR"}, "/gl_bindings.rs"}}}
pub use bindings::{*, types::*};

// ----------------------------------------------------------------------------------------------------

/// Upper bound, in bytes, on the driver diagnostics kept for one shader or program.
pub const INFO_LOG_CAPACITY: usize = 512;

// ----------------------------------------------------------------------------------------------------

#[derive(Clone)]
pub struct FunctionPointers(Rc<Gl>);

impl FunctionPointers
{
    pub fn load<F>(pointer_loader: F) -> Result<Self>
    where
        F: FnMut(&'static str) -> *const c_void
    {
        let pointers = Gl::load_with(pointer_loader);
        let required =
        [
            ("glClear", pointers.Clear.is_loaded()),
            ("glCreateShader", pointers.CreateShader.is_loaded()),
            ("glCreateProgram", pointers.CreateProgram.is_loaded()),
            ("glGenVertexArrays", pointers.GenVertexArrays.is_loaded()),
            ("glDrawArrays", pointers.DrawArrays.is_loaded())
        ];
        match required.iter().find(|(_, loaded)| !loaded)
        {
            Some((name, _)) => Err(Error::FunctionNotLoaded(*name)),
            None => Ok(Self(Rc::new(pointers)))
        }
    }

    pub fn get_string(&self, symbol: GLenum) -> Option<String>
    {
        let raw = unsafe{self.GetString(symbol)};
        match raw.is_null()
        {
            true => None,
            false => Some
            (
                unsafe{CStr::from_ptr(raw as _)}
                    .to_string_lossy()
                    .into_owned()
            )
        }
    }
}

impl Deref for FunctionPointers
{
    type Target = Gl;
    fn deref(&self) -> &Self::Target
    {
        &self.0
    }
}

// ----------------------------------------------------------------------------------------------------

pub struct Buffer
{
    pointers: FunctionPointers,
    handle: GLuint
}

impl Buffer
{
    pub fn new(pointers: &FunctionPointers) -> Self
    {
        let mut handle = 0;
        unsafe{pointers.GenBuffers(1, &mut handle)}
        Self{pointers: pointers.clone(), handle}
    }
}

impl Drop for Buffer
{
    fn drop(&mut self) -> ()
    {
        unsafe{self.pointers.DeleteBuffers(1, &self.handle)}
    }
}

impl Deref for Buffer
{
    type Target = GLuint;
    fn deref(&self) -> &Self::Target
    {
        &self.handle
    }
}

// ----------------------------------------------------------------------

pub struct VertexArrayObject
{
    pointers: FunctionPointers,
    handle: GLuint
}

impl VertexArrayObject
{
    pub fn new(pointers: &FunctionPointers) -> Self
    {
        let mut handle = 0;
        unsafe{pointers.GenVertexArrays(1, &mut handle)}
        Self{pointers: pointers.clone(), handle}
    }

    pub fn bind(&self) -> ()
    {
        unsafe{self.pointers.BindVertexArray(self.handle)}
    }
}

impl Drop for VertexArrayObject
{
    fn drop(&mut self) -> ()
    {
        unsafe{self.pointers.DeleteVertexArrays(1, &self.handle)}
    }
}

// ----------------------------------------------------------------------

pub struct Shader
{
    pointers: FunctionPointers,
    handle: GLuint
}

impl Shader
{
    pub fn new(pointers: &FunctionPointers, kind: GLenum) -> Result<Self>
    {
        match unsafe{pointers.CreateShader(kind)}
        {
            0 => Err(Error::ShaderCreation(kind)),
            handle => Ok(Self{pointers: pointers.clone(), handle})
        }
    }
}

impl Drop for Shader
{
    fn drop(&mut self) -> ()
    {
        unsafe{self.pointers.DeleteShader(self.handle)}
    }
}

impl Deref for Shader
{
    type Target = GLuint;
    fn deref(&self) -> &Self::Target
    {
        &self.handle
    }
}

// ----------------------------------------------------------------------

pub struct Program
{
    pointers: FunctionPointers,
    handle: GLuint
}

impl Program
{
    pub fn new(pointers: &FunctionPointers) -> Result<Self>
    {
        match unsafe{pointers.CreateProgram()}
        {
            0 => Err(Error::ProgramCreation),
            handle => Ok(Self{pointers: pointers.clone(), handle})
        }
    }

    pub fn activate(&self) -> ()
    {
        unsafe{self.pointers.UseProgram(self.handle)}
    }
}

impl Drop for Program
{
    fn drop(&mut self) -> ()
    {
        unsafe{self.pointers.DeleteProgram(self.handle)}
    }
}

impl Deref for Program
{
    type Target = GLuint;
    fn deref(&self) -> &Self::Target
    {
        &self.handle
    }
}

// ----------------------------------------------------------------------------------------------------

#[derive(Debug)]
pub enum Error
{
    FunctionNotLoaded(&'static str),
    ShaderCreation(GLenum),
    ProgramCreation,
    ShaderCompilation(String),
    ProgramLinking(String),
    GLError(GLenum)
}

impl std::error::Error for Error {}

impl fmt::Display for Error
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            Self::FunctionNotLoaded(name) => write!
            (
                formatter,
                "OpenGL function `{name}` could not be loaded from the current context"
            ),
            Self::ShaderCreation(kind) => write!
            (
                formatter,
                "The driver refused to create a shader object of kind {kind:#06x}"
            ),
            Self::ProgramCreation => write!
            (
                formatter,
                "The driver refused to create a program object"
            ),
            Self::ShaderCompilation(log) => write!(formatter, "{log}"),
            Self::ProgramLinking(log) => write!(formatter, "{log}"),
            Self::GLError(flag) => write!
            (
                formatter,
                "{}",
                match *flag
                {
                    INVALID_ENUM => "An unacceptable value is specified for an enumerated argument",
                    INVALID_VALUE => "A numeric argument is out of range",
                    INVALID_OPERATION => "The specified operation is not allowed in the current state",
                    INVALID_FRAMEBUFFER_OPERATION => "The framebuffer object is not complete",
                    OUT_OF_MEMORY => "There is not enough memory left to execute the command",
                    NO_ERROR => "Conflicting error reports",
                    _ => "Unknown OpenGL error"
                }
            )
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

// ----------------------------------------------------------------------------------------------------

pub fn check_for_gl_errors(pointers: &FunctionPointers) -> Result<()>
{
    match unsafe{pointers.GetError()}
    {
        NO_ERROR => Ok(()),
        flag @ _ => Err(Error::GLError(flag))
    }
}

// ----------------------------------------------------------------------------------------------------

pub fn gl_get(pointers: &FunctionPointers, symbol: GLenum) -> GLint
{
    let mut result = 0;
    unsafe{pointers.GetIntegerv(symbol, &mut result)}
    result
}

// ----------------------------------------------------------------------------------------------------

// `written` comes straight from the driver and is clamped before use.
fn info_log_from_bytes(mut log: Vec<u8>, written: GLsizei, fallback: &str) -> String
{
    let written = (written.max(0) as usize).min(log.len());
    log.truncate(written);
    while log.last() == Some(&0)
    {
        log.pop();
    }
    match log.is_empty()
    {
        true => String::from(fallback),
        false => String::from_utf8_lossy(&log).into_owned()
    }
}

// ----------------------------------------------------------------------------------------------------

pub fn compile_shader
(
    pointers: &FunctionPointers,
    kind: GLenum,
    code: &str,
) -> Result<Shader>
{
    let mut success = 0;
    let shader = Shader::new(pointers, kind)?;
    let length = code.len() as GLint;
    unsafe
    {
        pointers.ShaderSource(*shader, 1, [code.as_ptr() as *const GLchar].as_ptr(), &length);
        pointers.CompileShader(*shader);
        pointers.GetShaderiv(*shader, COMPILE_STATUS, &mut success)
    }
    match success as GLboolean
    {
        TRUE => Ok(shader),
        _ =>
        {
            let mut log = vec![0u8; INFO_LOG_CAPACITY];
            let mut written: GLsizei = 0;
            unsafe
            {
                pointers.GetShaderInfoLog
                (
                    *shader,
                    INFO_LOG_CAPACITY as _,
                    &mut written,
                    log.as_mut_ptr() as _
                )
            }
            Err
            (
                Error::ShaderCompilation
                (
                    info_log_from_bytes(log, written, "Unknown shader compilation error")
                )
            )
        }
    }
}

// ----------------------------------------------------------------------------------------------------

pub fn link_program(pointers: &FunctionPointers, shaders: &[&Shader]) -> Result<Program>
{
    let program = Program::new(pointers)?;
    let mut success = 0;
    unsafe
    {
        shaders.iter().for_each(|shader| pointers.AttachShader(*program, ***shader));
        pointers.LinkProgram(*program);
        shaders.iter().for_each(|shader| pointers.DetachShader(*program, ***shader));
        pointers.GetProgramiv(*program, LINK_STATUS, &mut success)
    }
    match success as GLboolean
    {
        TRUE => Ok(program),
        _ =>
        {
            let mut log = vec![0u8; INFO_LOG_CAPACITY];
            let mut written: GLsizei = 0;
            unsafe
            {
                pointers.GetProgramInfoLog
                (
                    *program,
                    INFO_LOG_CAPACITY as _,
                    &mut written,
                    log.as_mut_ptr() as _
                )
            }
            Err
            (
                Error::ProgramLinking
                (
                    info_log_from_bytes(log, written, "Unknown program linking error")
                )
            )
        }
    }
}

// ----------------------------------------------------------------------------------------------------

fn fill_buffer<T>
(
    pointers: &FunctionPointers,
    target: GLenum,
    data: &[T],
    usage: GLenum
) -> ()
{
    unsafe
    {
        pointers.BufferData
        (
            target,
            std::mem::size_of_val(data) as _,
            data.as_ptr() as _,
            usage
        )
    }
}

// ----------------------------------------------------------------------------------------------------

/// Uploads vertex data into a fresh buffer and describes it to the currently bound
/// vertex array at `location`, tightly packed.
pub trait Attribute
{
    fn to_attribute
    (
        &self,
        pointers: &FunctionPointers,
        location: GLuint
    ) -> Result<Buffer>;
}

impl<const N: usize> Attribute for [[GLfloat; 3]; N]
{
    fn to_attribute
    (
        &self,
        pointers: &FunctionPointers,
        location: GLuint
    ) -> Result<Buffer>
    {
        unsafe{pointers.GetError()};
        let flattened: Vec<GLfloat> = self.iter().flatten().copied().collect();
        let vbo = Buffer::new(pointers);
        let previously_bound = gl_get(pointers, ARRAY_BUFFER_BINDING);
        unsafe{pointers.BindBuffer(ARRAY_BUFFER, *vbo)}
        fill_buffer(pointers, ARRAY_BUFFER, &flattened, STATIC_DRAW);
        unsafe
        {
            pointers.VertexAttribPointer
            (
                location,
                3,
                FLOAT,
                FALSE,
                (3 * std::mem::size_of::<GLfloat>()) as _,
                0 as _
            );
            pointers.EnableVertexAttribArray(location);
            pointers.BindBuffer(ARRAY_BUFFER, previously_bound as _);
        }
        check_for_gl_errors(pointers)?;
        Ok(vbo)
    }
}

// ----------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn info_log_keeps_only_written_bytes()
    {
        let mut log = vec![0u8; INFO_LOG_CAPACITY];
        log[..5].copy_from_slice(b"error");
        assert_eq!(info_log_from_bytes(log, 5, "fallback"), "error");
    }

    #[test]
    fn info_log_never_exceeds_capacity()
    {
        let log = vec![b'x'; INFO_LOG_CAPACITY];
        let text = info_log_from_bytes(log, 4096, "fallback");
        assert_eq!(text.len(), INFO_LOG_CAPACITY);
    }

    #[test]
    fn info_log_strips_trailing_terminator()
    {
        let mut log = vec![0u8; INFO_LOG_CAPACITY];
        log[..4].copy_from_slice(b"bad\0");
        assert_eq!(info_log_from_bytes(log, 4, "fallback"), "bad");
    }

    #[test]
    fn empty_info_log_uses_fallback()
    {
        let log = vec![0u8; INFO_LOG_CAPACITY];
        assert_eq!
        (
            info_log_from_bytes(log.clone(), 0, "Unknown shader compilation error"),
            "Unknown shader compilation error"
        );
        assert_eq!(info_log_from_bytes(log, -3, "nothing"), "nothing");
    }

    #[test]
    fn gl_error_messages_are_specific()
    {
        assert_eq!
        (
            Error::GLError(OUT_OF_MEMORY).to_string(),
            "There is not enough memory left to execute the command"
        );
        assert_eq!(Error::GLError(0xdead).to_string(), "Unknown OpenGL error");
    }
}
