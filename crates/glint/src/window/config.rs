//! Window configuration and builder.

use glint_core::{GlintError, Result};
use glint_render::{Color, SurfaceConfig};
use serde::{Deserialize, Serialize};

/// Configuration for a [`Window`](super::Window).
///
/// Built in code or loaded from TOML:
///
/// ```
/// use glint::window::WindowConfig;
///
/// let config = WindowConfig::new("Scope")
///     .with_size(1280, 720)
///     .with_framerate(30);
/// assert_eq!(config.size(), (1280, 720));
///
/// let config = WindowConfig::from_toml_str(r#"
///     title = "Scope"
///     width = 640
///     height = 480
///     clear_color = { r = 0.1, g = 0.1, b = 0.1, a = 1.0 }
/// "#).unwrap();
/// assert_eq!(config.framerate(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    title: String,
    width: u32,
    height: u32,
    position: Option<(i32, i32)>,
    /// Target ticks per second.
    framerate: u32,
    clear_color: Color,
    fullscreen: bool,
    resizable: bool,
    vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::from("Glint"),
            width: 800,
            height: 600,
            position: None,
            framerate: 60,
            clear_color: Color::BLACK,
            fullscreen: false,
            resizable: true,
            vsync: true,
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|err| GlintError::InvalidConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| GlintError::InvalidConfig(err.to_string()))
    }

    /// Reject values a window cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GlintError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.framerate == 0 {
            return Err(GlintError::InvalidConfig(
                "framerate must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    // =========================================================================
    // Builder
    // =========================================================================

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    pub fn with_framerate(mut self, framerate: u32) -> Self {
        self.framerate = framerate;
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn position(&self) -> Option<(i32, i32)> {
        self.position
    }

    pub fn framerate(&self) -> u32 {
        self.framerate
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn resizable(&self) -> bool {
        self.resizable
    }

    pub fn vsync(&self) -> bool {
        self.vsync
    }

    pub(crate) fn to_surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            title: self.title.clone(),
            width: self.width,
            height: self.height,
            position: self.position,
            fullscreen: self.fullscreen,
            resizable: self.resizable,
            vsync: self.vsync,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(WindowConfig::default().validate().is_ok());
        assert!(matches!(
            WindowConfig::default().with_size(0, 10).validate(),
            Err(GlintError::InvalidConfig(_))
        ));
        assert!(WindowConfig::default().with_framerate(0).validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = WindowConfig::new("Plot")
            .with_size(320, 200)
            .with_position(5, 6)
            .with_clear_color(Color::WHITE);
        let text = config.to_toml_string().unwrap();
        assert_eq!(WindowConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_toml_rejects_bad_values() {
        assert!(WindowConfig::from_toml_str("framerate = 0").is_err());
        assert!(WindowConfig::from_toml_str("width = \"wide\"").is_err());
    }
}
