//! Rendering contracts for Glint.
//!
//! Glint's scene graph never talks to the GPU or the windowing system
//! directly. This crate defines the narrow interfaces it consumes and the
//! math it shares with backends:
//!
//! - [`Transform`] - hierarchical position/rotation/scale/origin
//! - [`Color`] and the re-exported `glam` vector types
//! - [`Renderer`] - the draw command sink window objects paint through
//! - [`Platform`] and [`Surface`] - windowing glue: surface creation, input
//!   events, buffer swaps, fullscreen switching
//! - [`ShaderProgram`], [`Texture`], [`FontFace`] and [`Model`] - contracts
//!   for GPU resources owned by assets
//!
//! # Testing without a display
//!
//! [`VirtualPlatform`] creates surfaces backed by a [`RecordingRenderer`].
//! Input is scripted through the platform and presented frames can be
//! inspected afterwards:
//!
//! ```
//! use glint_render::{Color, Mat4, Platform, Quad, SurfaceConfig, VirtualPlatform};
//!
//! let platform = VirtualPlatform::new();
//! let mut surface = platform
//!     .create_surface(&SurfaceConfig {
//!         title: "demo".into(),
//!         width: 320,
//!         height: 240,
//!         position: None,
//!         fullscreen: false,
//!         resizable: false,
//!         vsync: false,
//!     })
//!     .unwrap();
//!
//! let renderer = surface.renderer();
//! renderer.begin_frame(Color::BLACK, (320, 240));
//! renderer.draw_quad(&Quad { transform: Mat4::IDENTITY, color: Color::RED, blur: None });
//! renderer.end_frame();
//! surface.swap_buffers();
//!
//! assert_eq!(platform.frames_presented(), 1);
//! ```

mod error;
pub mod font;
pub mod model;
pub mod renderer;
pub mod shader;
pub mod surface;
pub mod texture;
pub mod transform;
pub mod types;

pub use error::{RenderError, RenderResult};
pub use font::FontFace;
pub use model::{Face, Material, Mesh, Model};
pub use renderer::{DrawCommand, FrameStats, Polyline, Quad, RecordingRenderer, Renderer, TextRun};
pub use shader::{ShaderProgram, ShaderSource, ShaderStage};
pub use surface::{
    KeyAction, Modifiers, MouseButton, Platform, Surface, SurfaceConfig, SurfaceEvent,
    SurfaceGeometry, VirtualPlatform, VirtualSurface,
};
pub use texture::{Texture, TextureData};
pub use transform::Transform;
pub use types::{Color, EulerRot, Mat4, Quat, Vec2, Vec3, Vec4};
