//! Error types shared by every sub-system.
//!
//! Fatal bootstrap failures are reported with a typed `Error` wrapped into `failure::Error`,
//! so callers could `downcast_ref::<Error>()` to tell them apart.

pub type Result<T> = ::std::result::Result<T, ::failure::Error>;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Failed to create window: {}", _0)]
    WindowCreation(String),
    #[fail(display = "Failed to create OpenGL context: {}", _0)]
    ContextCreation(String),
    #[fail(display = "Failed to load OpenGL function `{}`.", _0)]
    FunctionLoad(&'static str),
    #[fail(display = "OpenGL implementation doesn't support {}.", _0)]
    Requirement(String),
    #[fail(display = "Failed to create program object.")]
    ProgramCreation,
    #[fail(display = "Compile failure in {} shader:\n{}", _0, _1)]
    ShaderCompilation(&'static str, String),
    #[fail(display = "Linker failure: {}", _0)]
    ProgramLink(String),
    #[fail(display = "Failed to decode image {}: {}", path, reason)]
    ImageDecode { path: String, reason: String },
    #[fail(display = "Not enough memory for image inversion ({} bytes per row).", _0)]
    RowScratchAllocation(usize),
    #[fail(
        display = "Pixel buffer of {} bytes can not hold {} rows of {} bytes.",
        len, height, pitch
    )]
    PixelBufferSize {
        len: usize,
        pitch: usize,
        height: usize,
    },
}

impl From<::glutin::CreationError> for Error {
    fn from(err: ::glutin::CreationError) -> Error {
        match err {
            ::glutin::CreationError::Window(_) => Error::WindowCreation(format!("{}", err)),
            _ => Error::ContextCreation(format!("{}", err)),
        }
    }
}

impl From<::glutin::ContextError> for Error {
    fn from(err: ::glutin::ContextError) -> Error {
        Error::ContextCreation(format!("{}", err))
    }
}
