//! Cross-fade transitions drawn over the whole window.

use glint_render::{Color, Mat4, Quad};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// From the fade color to the scene.
    In,
    /// From the scene to the fade color.
    Out,
}

/// A full-window quad whose alpha follows elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    direction: FadeDirection,
    color: Color,
    duration: f32,
    elapsed: f32,
}

impl Transition {
    pub fn new(direction: FadeDirection, duration: f32, color: Color) -> Self {
        Self {
            direction,
            color,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.elapsed = (self.elapsed + delta_time).min(self.duration);
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Overlay alpha, scaled by the fade color's own alpha.
    pub fn alpha(&self) -> f32 {
        let t = self.progress();
        let alpha = match self.direction {
            FadeDirection::In => 1.0 - t,
            FadeDirection::Out => t,
        };
        alpha * self.color.a
    }

    pub fn quad(&self) -> Quad {
        Quad {
            transform: Mat4::IDENTITY,
            color: self.color.with_alpha(self.alpha()),
            blur: None,
        }
    }
}
