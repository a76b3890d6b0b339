//! Error types for the render crate.

use thiserror::Error;

/// Errors raised by rendering collaborators.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A shader stage failed to compile.
    #[error("failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    /// A shader program failed to link.
    #[error("failed to link shader program: {0}")]
    ShaderLink(String),

    /// Image bytes could not be decoded into a texture.
    #[error("failed to decode texture: {0}")]
    TextureDecode(#[from] image::ImageError),

    /// Font bytes are not a usable typeface.
    #[error("failed to parse font: {0}")]
    FontParse(String),

    /// The platform failed to create a surface.
    #[error("failed to create surface: {0}")]
    SurfaceCreation(String),

    /// Invalid surface dimensions (zero width or height).
    #[error("invalid surface dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A model's buffers are inconsistent.
    #[error("invalid model: {0}")]
    InvalidModel(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::ShaderCompile {
            stage: "vertex",
            log: "syntax error".into(),
        };
        assert_eq!(err.to_string(), "failed to compile vertex shader: syntax error");

        let err = RenderError::InvalidDimensions { width: 0, height: 600 };
        assert_eq!(err.to_string(), "invalid surface dimensions: 0x600");
    }
}
