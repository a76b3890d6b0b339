//! Error types for Glint.

use std::fmt;

/// The main error type for Glint operations.
///
/// Most lifecycle operations report only coarse success through `bool`
/// returns. This type covers the few operations that can fail for a reason
/// the caller is expected to act on: window setup and configuration.
#[derive(Debug)]
pub enum GlintError {
    /// The window has already been initialized.
    WindowAlreadyInitialized,
    /// The window has not been initialized yet.
    WindowNotInitialized,
    /// The platform failed to create the window surface.
    SurfaceCreation(String),
    /// The window thread could not be spawned.
    ThreadSpawn(String),
    /// A configuration value is out of range or malformed.
    InvalidConfig(String),
}

impl fmt::Display for GlintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowAlreadyInitialized => {
                write!(f, "Window has already been initialized")
            }
            Self::WindowNotInitialized => {
                write!(f, "Window has not been initialized. Call Window::init() first")
            }
            Self::SurfaceCreation(msg) => {
                write!(f, "Failed to create window surface: {msg}")
            }
            Self::ThreadSpawn(msg) => {
                write!(f, "Failed to spawn window thread: {msg}")
            }
            Self::InvalidConfig(msg) => {
                write!(f, "Invalid configuration: {msg}")
            }
        }
    }
}

impl std::error::Error for GlintError {}

/// A specialized Result type for Glint operations.
pub type Result<T> = std::result::Result<T, GlintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GlintError::SurfaceCreation("no display".to_string());
        assert_eq!(err.to_string(), "Failed to create window surface: no display");

        let err = GlintError::InvalidConfig("framerate must be non-zero".to_string());
        assert!(err.to_string().contains("framerate"));
    }
}
