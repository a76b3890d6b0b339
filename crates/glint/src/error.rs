//! Error types for asset loading.

use glint_render::RenderError;
use thiserror::Error;

/// Errors raised while turning an asset's source into a usable resource.
///
/// These never cross the lifecycle API: a failing asset logs the error and
/// returns `false` from `init`.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The asset has no in-memory source to load from.
    #[error("asset '{0}' has no source")]
    MissingSource(String),

    /// Reading the source from local storage failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The source bytes were rejected by a render collaborator.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result type for asset loading.
pub type AssetResult<T> = Result<T, AssetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AssetError::MissingSource("logo".into());
        assert_eq!(err.to_string(), "asset 'logo' has no source");

        let err: AssetError = RenderError::FontParse("bad magic".into()).into();
        assert_eq!(err.to_string(), "failed to parse font: bad magic");
    }
}
