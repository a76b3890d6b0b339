//! Glint - a retained-mode graphics and GUI toolkit core.
//!
//! This is the main crate: windows and their tick loop, the window object
//! scene graph with anchor layout and pointer hit-testing, built-in widgets,
//! and asset libraries. Lifecycle, signals and logging come from
//! `glint-core`; drawing and platform contracts from `glint-render`.
//!
//! # Example
//!
//! ```no_run
//! use glint::prelude::*;
//! use glint::render::VirtualPlatform;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::new(VirtualPlatform::new());
//!     let window = Window::new(&ctx, WindowConfig::new("Hello").with_size(800, 600));
//!
//!     let button = Button::new("ok", "OK");
//!     button.window_base().set_scale(Vec3::new(0.2, 0.1, 1.0));
//!     button.window_base().set_anchor(Anchor::Center);
//!     button.on_click(|_| println!("clicked"));
//!     window.add_object(button);
//!
//!     let cancel = CancellationToken::new();
//!     window.init(cancel.clone())?;
//!     // ... later, from any thread:
//!     window.close();
//!     Ok(())
//! }
//! ```

pub mod asset;
mod context;
mod error;
pub mod prelude;
pub mod service;
pub mod widget;
pub mod window;

pub use context::Context;
pub use error::{AssetError, AssetResult};
pub use glint_core::{
    CancellationToken, ConnectionGuard, ConnectionId, DrawableObjectBase, GlintError, Object,
    ObjectBase, PerfSpan, Result, Signal, Tag, logging, object_cast,
};

/// Drawing primitives, transforms and platform contracts.
pub mod render {
    pub use glint_render::*;
}

static_assertions::assert_impl_all!(window::Window: Send, Sync);
static_assertions::assert_impl_all!(asset::AssetLibrary: Send, Sync);
static_assertions::assert_impl_all!(Context: Send, Sync);
static_assertions::assert_impl_all!(widget::WindowObjectBase: Send, Sync);
