//! Paint context passed down the tree during drawing.

use glint_render::Renderer;

/// Everything a window object needs to draw itself.
pub struct PaintContext<'a> {
    renderer: &'a mut dyn Renderer,
    delta_time: f32,
    window_size: (u32, u32),
}

impl<'a> PaintContext<'a> {
    pub fn new(renderer: &'a mut dyn Renderer, delta_time: f32, window_size: (u32, u32)) -> Self {
        Self {
            renderer,
            delta_time,
            window_size,
        }
    }

    pub fn renderer(&mut self) -> &mut dyn Renderer {
        &mut *self.renderer
    }

    /// Seconds since the previous frame.
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }
}
