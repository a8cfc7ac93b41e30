//! Error types for the renderer.

use thiserror::Error;

/// Errors that can occur while configuring a render or writing its output.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image buffer does not match {width}x{height}")]
    BufferSize { width: u32, height: u32 },

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised when constructing scene geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Sphere radius must be finite and non-zero, got {0}")]
    DegenerateRadius(f32),

    #[error("Sphere center must be finite, got {0:?}")]
    NonFiniteCenter([f32; 3]),
}
