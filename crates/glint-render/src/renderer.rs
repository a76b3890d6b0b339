//! The renderer command sink.
//!
//! Window objects do not talk to the GPU. They describe what to draw through
//! the [`Renderer`] trait, and a backend (OpenGL in production, the
//! [`RecordingRenderer`] in tests) turns those calls into pixels.
//!
//! Every primitive is positioned by a world matrix built from the object's
//! [`Transform`](crate::Transform), in normalized window space: `[-1, 1]` on
//! both axes with +y up.

use crate::types::{Color, Mat4, Vec2};

/// Statistics from a frame render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of draw calls submitted.
    pub draw_calls: u32,
}

/// A filled unit quad (or ellipse) placed by a world matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub transform: Mat4,
    pub color: Color,
    /// Blur intensity, or `None` when blur is disabled.
    pub blur: Option<f32>,
}

/// A run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub transform: Mat4,
    pub color: Color,
    pub text: String,
    /// Name of the font asset to rasterize with.
    pub font: String,
    pub size: f32,
}

/// An open line strip in the local space of `transform`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub transform: Mat4,
    pub color: Color,
    pub points: Vec<Vec2>,
    pub width: f32,
}

/// The drawing interface window objects render through.
///
/// A frame looks like:
///
/// ```ignore
/// renderer.begin_frame(clear_color, (width, height));
/// renderer.draw_quad(&quad);
/// let stats = renderer.end_frame();
/// ```
pub trait Renderer {
    /// Begin a new frame cleared to `clear_color`.
    fn begin_frame(&mut self, clear_color: Color, viewport_size: (u32, u32));

    /// Finish the current frame.
    fn end_frame(&mut self) -> FrameStats;

    /// Fill a unit square spanning `[-1, 1]` in local space.
    fn draw_quad(&mut self, quad: &Quad);

    /// Fill the unit circle inscribed in the local `[-1, 1]` square.
    fn draw_ellipse(&mut self, quad: &Quad);

    fn draw_text(&mut self, text: &TextRun);

    fn draw_polyline(&mut self, line: &Polyline);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Quad(Quad),
    Ellipse(Quad),
    Text(TextRun),
    Polyline(Polyline),
}

impl DrawCommand {
    /// The color the command was drawn with.
    pub fn color(&self) -> Color {
        match self {
            Self::Quad(q) | Self::Ellipse(q) => q.color,
            Self::Text(t) => t.color,
            Self::Polyline(p) => p.color,
        }
    }
}

/// A renderer that records draw calls instead of rasterizing them.
///
/// Used by the virtual platform and by tests that assert on what a scene
/// drew and in which order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    commands: Vec<DrawCommand>,
    clear_color: Option<Color>,
    viewport_size: (u32, u32),
    frames: u64,
    in_frame: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands recorded since the last [`take_commands`](Self::take_commands).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Clear color of the most recent frame.
    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        self.viewport_size
    }

    /// Number of completed frames.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    fn record(&mut self, command: DrawCommand) {
        if !self.in_frame {
            tracing::trace!(target: "glint_render", "draw call outside a frame");
        }
        self.commands.push(command);
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self, clear_color: Color, viewport_size: (u32, u32)) {
        self.commands.clear();
        self.clear_color = Some(clear_color);
        self.viewport_size = viewport_size;
        self.in_frame = true;
    }

    fn end_frame(&mut self) -> FrameStats {
        self.in_frame = false;
        self.frames += 1;
        FrameStats {
            draw_calls: self.commands.len() as u32,
        }
    }

    fn draw_quad(&mut self, quad: &Quad) {
        self.record(DrawCommand::Quad(*quad));
    }

    fn draw_ellipse(&mut self, quad: &Quad) {
        self.record(DrawCommand::Ellipse(*quad));
    }

    fn draw_text(&mut self, text: &TextRun) {
        self.record(DrawCommand::Text(text.clone()));
    }

    fn draw_polyline(&mut self, line: &Polyline) {
        self.record(DrawCommand::Polyline(line.clone()));
    }
}
